use fixbuf::Buff;

use crate::{
    catalog::column::Column,
    error::DbResult,
    util::io::{Serde, VarList},
};

/// A table schema.
///
/// This in-memory vector is assumed to be in the same order as the columns
/// are represented on the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// The table columns.
    pub columns: Vec<Column>,
}

impl Serde for TableSchema {
    fn size(&self) -> u32 {
        VarList::from(self.columns.as_slice()).size()
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        VarList::from(self.columns.as_slice()).serialize(buf)?;
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        Ok(TableSchema {
            columns: VarList::deserialize(buf)?.into(),
        })
    }
}
