use fixbuf::Buff;

use crate::{
    catalog::table_schema::TableSchema,
    error::DbResult,
    page::PageId,
    util::io::{Serde, VarString},
};

/// One catalog record, describing a single user table.
///
/// Wire format, all integers little-endian: u16-length-prefixed name, u64
/// first page, u32 page count, u16-counted column list.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    /// The table name, unique across the database.
    pub name: String,
    /// The first page id of the table's heap. Assigned at creation, never
    /// changes.
    pub first_page: PageId,
    /// The number of pages currently owned by the heap. Non-decreasing.
    pub page_count: u32,
    /// The table schema.
    pub schema: TableSchema,
}

impl TableEntry {
    /// Returns the first page id past the range this entry reserves.
    ///
    /// A table with zero pages still reserves its first page.
    pub fn end_page(&self) -> u64 {
        self.first_page.get() + u64::from(self.page_count.max(1))
    }
}

impl Serde for TableEntry {
    fn size(&self) -> u32 {
        VarString::from(self.name.as_str()).size() + 8 + 4 + self.schema.size()
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        VarString::from(self.name.as_str()).serialize(buf)?;
        buf.write(self.first_page.get());
        buf.write(self.page_count);
        self.schema.serialize(buf)?;
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        Ok(TableEntry {
            name: VarString::deserialize(buf)?.into(),
            first_page: PageId::new(buf.read()),
            page_count: buf.read(),
            schema: TableSchema::deserialize(buf)?,
        })
    }
}
