//! Pre-encoding check for values JSON cannot carry exactly
//!
//! serde_json writes `None`, `()`, unit structs and non-finite floats all as
//! `null`. Once a `Some` wraps something that encodes as `null`, decoding gives
//! back `None`, and `NaN` / `±inf` come back as `null` too. This serializer
//! walks the value without producing output and rejects those shapes, so
//! `encode` fails instead of storing something `decode` would silently change.

use serde::ser::{self, Serialize, Serializer};
use std::fmt::Display;

/// How a value appears in the JSON payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Null,
    Value,
}

/// A value that would not survive a JSON round-trip
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub(super) struct LossyValue(String);

impl ser::Error for LossyValue {
    fn custom<T: Display>(msg: T) -> Self {
        Self(msg.to_string())
    }
}

/// Reject `value` if the JSON payload could not reproduce it
pub(super) fn check<T>(value: &T) -> Result<(), LossyValue>
where
    T: Serialize + ?Sized,
{
    value.serialize(LossCheck).map(|_| ())
}

fn finite(is_finite: bool) -> Result<Shape, LossyValue> {
    if is_finite {
        Ok(Shape::Value)
    } else {
        Err(LossyValue(
            "non-finite float (NaN or infinity) has no JSON representation".to_string(),
        ))
    }
}

fn nested<T>(value: &T) -> Result<(), LossyValue>
where
    T: Serialize + ?Sized,
{
    value.serialize(LossCheck).map(|_| ())
}

struct LossCheck;

impl Serializer for LossCheck {
    type Ok = Shape;
    type Error = LossyValue;
    type SerializeSeq = Compound;
    type SerializeTuple = Compound;
    type SerializeTupleStruct = Compound;
    type SerializeTupleVariant = Compound;
    type SerializeMap = Compound;
    type SerializeStruct = Compound;
    type SerializeStructVariant = Compound;

    fn serialize_bool(self, _v: bool) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_i8(self, _v: i8) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_i16(self, _v: i16) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_i32(self, _v: i32) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_i64(self, _v: i64) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_i128(self, _v: i128) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_u8(self, _v: u8) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_u16(self, _v: u16) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_u32(self, _v: u32) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_u64(self, _v: u64) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_u128(self, _v: u128) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_f32(self, v: f32) -> Result<Shape, LossyValue> {
        finite(v.is_finite())
    }

    fn serialize_f64(self, v: f64) -> Result<Shape, LossyValue> {
        finite(v.is_finite())
    }

    fn serialize_char(self, _v: char) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_str(self, _v: &str) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    fn serialize_none(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Shape, LossyValue>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(LossCheck)? {
            Shape::Null => Err(LossyValue(
                "Some wraps a value that encodes as null and would decode as None".to_string(),
            )),
            Shape::Value => Ok(Shape::Value),
        }
    }

    fn serialize_unit(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Shape, LossyValue> {
        Ok(Shape::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }

    // newtype structs are transparent in JSON
    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Shape, LossyValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<Shape, LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)?;
        Ok(Shape::Value)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Compound, LossyValue> {
        Ok(Compound)
    }
}

/// Checks every element of a sequence, map, tuple or struct
struct Compound;

impl ser::SerializeSeq for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeTuple for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeTupleStruct for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeTupleVariant for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeMap for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(key)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeStruct for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}

impl ser::SerializeStructVariant for Compound {
    type Ok = Shape;
    type Error = LossyValue;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), LossyValue>
    where
        T: ?Sized + Serialize,
    {
        nested(value)
    }

    fn end(self) -> Result<Shape, LossyValue> {
        Ok(Shape::Value)
    }
}
