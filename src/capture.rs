//! Capturing arbitrary `Serialize` data into [`Value`]s.
//!
//! Rust has no runtime reflection, so the bridge from live data to the
//! dynamic value model is serde: [`to_value`] runs a type's `Serialize`
//! impl against a serializer whose output type is [`Value`]. Struct and
//! variant names survive the trip, so the rendered output can still say
//! `Point(x: 1, y: 2)` rather than an anonymous bag of fields.

use serde::{ser, Serialize};

use crate::error::{Error, Result};
use crate::value::{Field, Float, Int, IntWidth, MapValue, Record, Seq, SeqKind, Value};

/// Captures any `Serialize` data as a [`Value`].
///
/// ```
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let value = reprs::to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(reprs::to_repr(&value), "Point(x: 1, y: 2)");
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// A serde serializer whose output is a [`Value`].
pub struct ValueSerializer;

pub struct SeqCapture {
    kind: SeqKind,
    type_name: Option<String>,
    items: Vec<Value>,
}

pub struct MapCapture {
    entries: Vec<(Value, Value)>,
    pending_key: Option<Value>,
}

pub struct RecordCapture {
    type_name: String,
    fields: Vec<Field>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SeqCapture;
    type SerializeTuple = SeqCapture;
    type SerializeTupleStruct = SeqCapture;
    type SerializeTupleVariant = SeqCapture;
    type SerializeMap = MapCapture;
    type SerializeStruct = RecordCapture;
    type SerializeStructVariant = RecordCapture;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::I8)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::I16)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::I32)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::I64)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::U8)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::U16)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::U32)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Int(Int::new(v as i128, IntWidth::U64)))
    }

    // The widest hosted integer width is 64 bits.
    fn serialize_i128(self, _v: i128) -> Result<Value> {
        Err(Error::unsupported("i128 exceeds the hosted integer widths"))
    }

    fn serialize_u128(self, _v: u128) -> Result<Value> {
        Err(Error::unsupported("u128 exceeds the hosted integer widths"))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(Float::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(Float::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let items = v.iter().map(|&b| Value::from(b)).collect();
        Ok(Value::list(items))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Opt(None))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(Value::Opt(Some(Box::new(to_value(value)?))))
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Ok(Value::record(name, vec![]))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Enum {
            type_name: name.to_string(),
            variant: variant.to_string(),
        })
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut seq = Seq::new(SeqKind::Tuple, vec![to_value(value)?]);
        seq.type_name = Some(format!("{}::{}", name, variant));
        Ok(Value::Seq(seq))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqCapture> {
        Ok(SeqCapture::new(SeqKind::List, None, len))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqCapture> {
        Ok(SeqCapture::new(SeqKind::Tuple, None, Some(len)))
    }

    fn serialize_tuple_struct(self, name: &'static str, len: usize) -> Result<SeqCapture> {
        Ok(SeqCapture::new(
            SeqKind::Tuple,
            Some(name.to_string()),
            Some(len),
        ))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqCapture> {
        Ok(SeqCapture::new(
            SeqKind::Tuple,
            Some(format!("{}::{}", name, variant)),
            Some(len),
        ))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapCapture> {
        Ok(MapCapture {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            pending_key: None,
        })
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<RecordCapture> {
        Ok(RecordCapture {
            type_name: name.to_string(),
            fields: Vec::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<RecordCapture> {
        Ok(RecordCapture {
            type_name: format!("{}::{}", name, variant),
            fields: Vec::with_capacity(len),
        })
    }
}

impl SeqCapture {
    fn new(kind: SeqKind, type_name: Option<String>, len: Option<usize>) -> Self {
        SeqCapture {
            kind,
            type_name,
            items: Vec::with_capacity(len.unwrap_or(0)),
        }
    }

    fn finish(self) -> Value {
        let mut seq = Seq::new(self.kind, self.items);
        seq.type_name = self.type_name;
        Value::Seq(seq)
    }
}

impl ser::SerializeSeq for SeqCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SeqCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SeqCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SeqCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for MapCapture {
    type Ok = Value;
    type Error = Error;

    // Keys are full values, not strings: the rendered form quotes string
    // keys and formats the rest like any other value.
    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .pending_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Map(MapValue {
            type_name: None,
            entries: self.entries,
        }))
    }
}

impl ser::SerializeStruct for RecordCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push(Field::public(key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(Record::new(&self.type_name, self.fields)))
    }
}

impl ser::SerializeStructVariant for RecordCapture {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.push(Field::public(key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(Record::new(&self.type_name, self.fields)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_struct_keeps_its_name() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let Value::Record(record) = &value else {
            panic!("expected record");
        };
        assert_eq!(record.type_name, "Point");
        assert_eq!(record.fields.len(), 2);
        assert_eq!(record.fields[0].name, "x");
    }

    #[test]
    fn test_int_widths_survive_capture() {
        let value = to_value(&300u16).unwrap();
        assert_eq!(value, Value::Int(Int::new(300, IntWidth::U16)));

        let value = to_value(&u64::MAX).unwrap();
        assert_eq!(value, Value::Int(Int::new(u64::MAX as i128, IntWidth::U64)));
    }

    #[test]
    fn test_128_bit_integers_are_rejected() {
        let err = to_value(&1i128).unwrap_err();
        assert!(matches!(err, Error::Unsupported(_)));
        let err = to_value(&1u128).unwrap_err();
        assert!(err.to_string().contains("u128"));
    }

    #[test]
    fn test_variants() {
        #[derive(Serialize)]
        enum Shape {
            Point,
            Circle(f64),
            Rect { w: i32, h: i32 },
        }

        let point = to_value(&Shape::Point).unwrap();
        assert_eq!(
            point,
            Value::Enum {
                type_name: "Shape".to_string(),
                variant: "Point".to_string(),
            }
        );

        let circle = to_value(&Shape::Circle(1.5)).unwrap();
        let Value::Seq(seq) = &circle else {
            panic!("expected tuple");
        };
        assert_eq!(seq.type_name.as_deref(), Some("Shape::Circle"));

        let rect = to_value(&Shape::Rect { w: 2, h: 3 }).unwrap();
        let Value::Record(record) = &rect else {
            panic!("expected record");
        };
        assert_eq!(record.type_name, "Shape::Rect");
    }

    #[test]
    fn test_option_and_unit() {
        assert_eq!(to_value(&()).unwrap(), Value::Null);
        assert_eq!(to_value(&None::<i32>).unwrap(), Value::Opt(None));
        let some = to_value(&Some(5i32)).unwrap();
        assert_eq!(some, Value::Opt(Some(Box::new(Value::from(5i32)))));
    }

    #[test]
    fn test_map_keys_are_values() {
        use std::collections::BTreeMap;
        let mut map = BTreeMap::new();
        map.insert(1i32, "one");
        map.insert(2i32, "two");

        let value = to_value(&map).unwrap();
        let Value::Map(map) = &value else {
            panic!("expected map");
        };
        assert_eq!(map.entries[0].0, Value::from(1i32));
        assert_eq!(map.entries[0].1, Value::from("one"));
    }
}
