use std::io;

pub type DbResult<T, E = Error> = Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested table is not present in the database.
    #[error("table `{0}` not found")]
    TableNotFound(String),

    /// `create_table` with a name that is already taken.
    #[error("table `{0}` already exists")]
    TableAlreadyExists(String),

    /// The catalog page cannot fit another entry.
    #[error("catalog page is full")]
    CatalogFull,

    /// The record cannot fit even in an empty page.
    #[error("record of {0} bytes exceeds the capacity of an empty page")]
    RecordTooLarge(usize),

    /// A row does not agree with the schema of the table it is inserted
    /// into.
    #[error("row does not match the table schema: {0}")]
    SchemaMismatch(&'static str),

    /// A slot references a record region outside the page bounds.
    #[error("corrupted slot")]
    CorruptedSlot,

    /// A catalog entry violated a layout invariant.
    #[error("corrupted catalog entry: {0}")]
    CorruptedEntry(&'static str),

    /// Invalid column type tag.
    #[error("corrupted type tag")]
    CorruptedTypeTag,

    /// Invalid text length prefix.
    #[error("corrupted text length")]
    CorruptedTextLength,

    /// Invalid boolean encoding.
    #[error("corrupted boolean")]
    CorruptedBool,

    /// UTF-8 error.
    #[error("utf-8 error while decoding string")]
    CorruptedUtf8,

    /// A generic IO error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
