use std::borrow::Cow;

use fixbuf::Buff;

use crate::error::{DbResult, Error};

/// Defines a common serialization/deserialization interface based in the
/// [`Buff`] type.
///
/// During serialization, it is the caller's responsibility to ensure that the
/// destination buffer has capacity for `size` more bytes. If this contract is
/// not upheld, `Buff`'s implementation will panic once the buffer is full.
pub trait Serde {
    /// Returns the size of the serialized representation.
    fn size(&self) -> u32;

    /// Serializes the value.
    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()>;

    /// Deserializes the value.
    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized;
}

/// [`Serde`] wrapper for strings stored with a u16 length prefix, without a
/// terminator.
pub struct VarString<'a>(pub Cow<'a, str>);

impl Serde for VarString<'_> {
    fn size(&self) -> u32 {
        2 + self.0.len() as u32
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        let len = u16::try_from(self.0.len()).expect("u16 length");
        buf.write(len);
        buf.write_slice(self.0.as_bytes());
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        let len: u16 = buf.read();
        let mut bytes = vec![0; len as usize];
        buf.read_slice(&mut bytes);
        let string = String::from_utf8(bytes).map_err(|_| Error::CorruptedUtf8)?;
        Ok(VarString(Cow::Owned(string)))
    }
}

impl<'a> From<&'a str> for VarString<'a> {
    fn from(value: &'a str) -> Self {
        VarString(Cow::Borrowed(value))
    }
}

impl From<VarString<'_>> for String {
    fn from(value: VarString<'_>) -> Self {
        value.0.into_owned()
    }
}

/// [`Serde`] wrapper for a list stored with a u16 count prefix.
pub struct VarList<'a, T>(pub Cow<'a, [T]>)
where
    T: Clone;

impl<T> Serde for VarList<'_, T>
where
    T: Serde + Clone,
{
    fn size(&self) -> u32 {
        2 + self.0.iter().map(Serde::size).sum::<u32>()
    }

    fn serialize(&self, buf: &mut Buff<'_>) -> DbResult<()> {
        let len = u16::try_from(self.0.len()).expect("u16 length");
        buf.write(len);
        for item in self.0.iter() {
            item.serialize(buf)?;
        }
        Ok(())
    }

    fn deserialize(buf: &mut Buff<'_>) -> DbResult<Self>
    where
        Self: Sized,
    {
        let len: u16 = buf.read();
        let inner: Vec<T> = (0..len)
            .map(|_| T::deserialize(buf))
            .collect::<Result<_, _>>()?;
        Ok(VarList(Cow::Owned(inner)))
    }
}

impl<'a, T> From<&'a [T]> for VarList<'a, T>
where
    T: Clone,
{
    fn from(value: &'a [T]) -> Self {
        VarList(Cow::Borrowed(value))
    }
}

impl<T> From<VarList<'_, T>> for Vec<T>
where
    T: Clone,
{
    fn from(value: VarList<'_, T>) -> Self {
        value.0.into_owned()
    }
}
