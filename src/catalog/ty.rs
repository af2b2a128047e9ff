use fixbuf::Buff;
use tracing::error;

use crate::{
    error::{DbResult, Error},
    util::io::Serde,
};

/// `reldb` possible column value types.
///
/// The discriminants are written to disk as one-byte tags and must not be
/// renumbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeId {
    Int = 0,
    Text = 1,
    Bool = 2,
    Float = 3,
}

impl Serde for TypeId {
    fn size(&self) -> u32 {
        1
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        buf.write(self.to_u8());
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        Self::try_from_u8(buf.read())
    }
}

impl TypeId {
    /// Returns the canonical type name.
    pub fn name(self) -> &'static str {
        match self {
            TypeId::Int => "int",
            TypeId::Text => "text",
            TypeId::Bool => "boolean",
            TypeId::Float => "float",
        }
    }

    /// Serialized representation.
    fn to_u8(self) -> u8 {
        self as u8
    }

    /// Deserializes the type id from the given byte.
    fn try_from_u8(serialized: u8) -> DbResult<Self> {
        match serialized {
            0 => Ok(TypeId::Int),
            1 => Ok(TypeId::Text),
            2 => Ok(TypeId::Bool),
            3 => Ok(TypeId::Float),
            unexpected => {
                error!(?unexpected, "invalid `TypeId` discriminant");
                Err(Error::CorruptedTypeTag)
            }
        }
    }
}
