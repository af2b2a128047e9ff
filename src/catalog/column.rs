use fixbuf::Buff;

use crate::{
    catalog::ty::TypeId,
    error::DbResult,
    util::io::{Serde, VarString},
};

/// A column definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// The column identifier.
    pub name: String,
    /// The column value type.
    pub ty: TypeId,
}

impl Serde for Column {
    fn size(&self) -> u32 {
        VarString::from(self.name.as_str()).size() + self.ty.size()
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        VarString::from(self.name.as_str()).serialize(buf)?;
        self.ty.serialize(buf)?;
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        Ok(Column {
            name: VarString::deserialize(buf)?.into(),
            ty: TypeId::deserialize(buf)?,
        })
    }
}
