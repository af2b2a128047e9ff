//! Row values and the record codec layered above the heap's opaque bytes.
//!
//! A record is the fields of one row in schema order, little-endian, with no
//! padding, no field tags and no nullability.

use std::fmt;

use fixbuf::Buff;

use crate::{
    catalog::{column::Column, ty::TypeId},
    error::{DbResult, Error},
};

/// A single database value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    Bool(bool),
    Float(f64),
}

/// A decoded row: one value per schema column, in schema order.
pub type Row = Vec<Value>;

impl Value {
    /// Returns the corresponding type id.
    pub fn type_id(&self) -> TypeId {
        match self {
            Value::Int(_) => TypeId::Int,
            Value::Text(_) => TypeId::Text,
            Value::Bool(_) => TypeId::Bool,
            Value::Float(_) => TypeId::Float,
        }
    }

    /// Returns the size of the serialized representation.
    pub fn size(&self) -> u32 {
        match self {
            Value::Int(_) => 8,
            // 4-byte length.
            Value::Text(text) => 4 + u32::try_from(text.len()).expect("u32 length"),
            Value::Bool(_) => 1,
            Value::Float(_) => 8,
        }
    }

    /// Serializes the value.
    pub fn serialize(&self, buf: &mut Buff<'_>) {
        match self {
            Value::Int(inner) => buf.write(*inner),
            Value::Text(inner) => {
                buf.write(inner.len() as i32);
                buf.write_slice(inner.as_bytes());
            }
            Value::Bool(inner) => buf.write(*inner),
            Value::Float(inner) => buf.write(*inner),
        }
    }

    /// Deserializes a value of the given type.
    pub fn deserialize(buf: &mut Buff<'_>, ty: TypeId) -> DbResult<Value> {
        let value = match ty {
            TypeId::Int => Value::Int(buf.read()),
            TypeId::Text => {
                let len: i32 = buf.read();
                let len = usize::try_from(len).map_err(|_| Error::CorruptedTextLength)?;
                if len > buf.remaining() {
                    return Err(Error::CorruptedTextLength);
                }
                let mut bytes = vec![0; len];
                buf.read_slice(&mut bytes);
                Value::Text(String::from_utf8(bytes).map_err(|_| Error::CorruptedUtf8)?)
            }
            TypeId::Bool => match buf.read::<1, u8>() {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                _ => return Err(Error::CorruptedBool),
            },
            TypeId::Float => Value::Float(buf.read()),
        };
        Ok(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(inner) => inner.fmt(f),
            Value::Text(inner) => inner.fmt(f),
            Value::Bool(inner) => inner.fmt(f),
            Value::Float(inner) => inner.fmt(f),
        }
    }
}

/// Encodes a row as raw record bytes.
pub fn encode_row(row: &[Value]) -> Vec<u8> {
    let size: u32 = row.iter().map(Value::size).sum();
    let mut data = vec![0; size as usize];
    let mut buf = Buff::new(&mut data);
    for value in row {
        value.serialize(&mut buf);
    }
    data
}

/// Decodes record bytes against the given column schema.
pub fn decode_row(record: &[u8], schema: &[Column]) -> DbResult<Row> {
    let mut data = record.to_vec();
    let mut buf = Buff::new(&mut data);

    let mut row = Row::with_capacity(schema.len());
    for column in schema {
        row.push(Value::deserialize(&mut buf, column.ty)?);
    }
    Ok(row)
}
