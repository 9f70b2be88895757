//! Flat-path serialization.
//!
//! This module provides the [`Serializer`] implementation that converts Rust
//! data structures into flat `key=value` lines, one line per scalar.
//!
//! ## Overview
//!
//! The serializer never materializes a tree. It threads a single growable
//! path buffer through the open scopes: entering a child key truncates the
//! buffer back to the scope's base length (removing the previous sibling's
//! suffix) and appends the escaped key; entering an array element appends an
//! index instead. When a scalar is reached, the buffer holds exactly the full
//! dotted path for that scalar and one line is emitted. Container boundaries
//! themselves produce no output, so empty maps and sequences leave no trace.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_flatpath::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let flat = to_string(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(flat, "x=1\ny=2\n");
//! ```
//!
//! ## Direct serializer usage
//!
//! ```rust
//! use serde_flatpath::{FlatOptions, Serializer};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(FlatOptions::new());
//! vec![10, 20].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "1=10\n2=20\n");
//! ```

use crate::escape::{escape_segment, escape_value};
use crate::{Error, FlatMap, FlatOptions, FlatValue, Result};
use serde::{ser, Serialize};

enum ScopeKind {
    Object,
    Array { next_index: u64 },
}

/// One open structural scope: only the buffer length to truncate back to and,
/// for arrays, the running element counter.
struct Scope {
    base_len: usize,
    kind: ScopeKind,
}

/// The flat-path serializer.
///
/// Converts Rust values implementing `Serialize` into flat key/value lines.
/// Created via [`Serializer::new`] with customizable options.
pub struct Serializer {
    output: String,
    path: String,
    options: FlatOptions,
    scopes: Vec<Scope>,
    header_written: bool,
}

impl Serializer {
    pub fn new(options: FlatOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            path: String::with_capacity(64),
            options,
            scopes: Vec::new(),
            header_written: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn push_scope(&mut self, kind: ScopeKind) {
        self.scopes.push(Scope {
            base_len: self.path.len(),
            kind,
        });
    }

    fn pop_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            self.path.truncate(scope.base_len);
        }
    }

    /// Truncates back to the scope base and appends the escaped key. The
    /// empty key addresses a branch's own value: the path stays at the base.
    fn enter_key(&mut self, name: &str) {
        let base = self.scopes.last().map_or(0, |s| s.base_len);
        let Serializer { path, options, .. } = self;
        path.truncate(base);
        if name.is_empty() {
            return;
        }
        if !path.is_empty() {
            path.push_str(&options.path_separator);
        }
        let escaped = escape_segment(name, options);
        path.push_str(&escaped);
    }

    /// Truncates back to the scope base and appends the next element index,
    /// either bare 1-based or wrapped in the configured marker envelope and
    /// numbered from `first_array_offset`.
    fn enter_index(&mut self) -> Result<()> {
        let Serializer {
            path,
            options,
            scopes,
            ..
        } = self;
        let (base, n) = match scopes.last_mut() {
            Some(Scope {
                base_len,
                kind: ScopeKind::Array { next_index },
            }) => {
                let n = *next_index;
                *next_index += 1;
                (*base_len, n)
            }
            _ => {
                return Err(Error::unsupported_type(
                    "sequence element outside of a sequence",
                ))
            }
        };
        path.truncate(base);
        match (&options.index_marker, options.write_index_using_markers) {
            (Some(marker), true) => {
                path.push_str(&marker.open);
                path.push_str(&(options.first_array_offset + n).to_string());
                path.push_str(&marker.close);
            }
            _ => {
                if !path.is_empty() {
                    path.push_str(&options.path_separator);
                }
                path.push_str(&(n + 1).to_string());
            }
        }
        Ok(())
    }

    /// Emits one `indentation prefix path separator value line-ending` line,
    /// writing the configured header first if this is the first line.
    fn write_scalar(&mut self, value: &str) {
        let Serializer {
            output,
            path,
            options,
            header_written,
            ..
        } = self;
        if !*header_written {
            *header_written = true;
            if let Some(header) = &options.header {
                output.push_str(header);
            }
        }
        output.push_str(&options.line_indentation);
        if !options.key_prefix.is_empty() {
            output.push_str(&options.key_prefix);
            if !path.is_empty() {
                output.push_str(&options.path_separator);
            }
        }
        output.push_str(path);
        output.push_str(&options.key_value_separator);
        output.push_str(&escape_value(value));
        output.push_str(&options.line_ending);
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqEmitter<'a>;
    type SerializeTuple = SeqEmitter<'a>;
    type SerializeTupleStruct = SeqEmitter<'a>;
    type SerializeTupleVariant = VariantSeqEmitter<'a>;
    type SerializeMap = MapEmitter<'a>;
    type SerializeStruct = StructEmitter<'a>;
    type SerializeStructVariant = VariantStructEmitter<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.write_scalar(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.write_scalar(&v.to_string());
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_scalar(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        // absent values leave no line; the key simply never appears
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.write_scalar("");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.push_scope(ScopeKind::Object);
        self.enter_key(variant);
        value.serialize(&mut *self)?;
        self.pop_scope();
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.push_scope(ScopeKind::Array { next_index: 0 });
        Ok(SeqEmitter { ser: self })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.push_scope(ScopeKind::Object);
        self.enter_key(variant);
        self.push_scope(ScopeKind::Array { next_index: 0 });
        Ok(VariantSeqEmitter { ser: self })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.push_scope(ScopeKind::Object);
        Ok(MapEmitter { ser: self })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.push_scope(ScopeKind::Object);
        Ok(StructEmitter { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.push_scope(ScopeKind::Object);
        self.enter_key(variant);
        self.push_scope(ScopeKind::Object);
        Ok(VariantStructEmitter { ser: self })
    }
}

pub struct SeqEmitter<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeSeq for SeqEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.enter_index()?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.pop_scope();
        Ok(())
    }
}

impl ser::SerializeTuple for SeqEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Self::Ok> {
        ser::SerializeSeq::end(self)
    }
}

pub struct VariantSeqEmitter<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeTupleVariant for VariantSeqEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.enter_index()?;
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.pop_scope();
        self.ser.pop_scope();
        Ok(())
    }
}

pub struct MapEmitter<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeMap for MapEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(KeySerializer)?;
        self.ser.enter_key(&key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.pop_scope();
        Ok(())
    }
}

pub struct StructEmitter<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeStruct for StructEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.enter_key(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.pop_scope();
        Ok(())
    }
}

pub struct VariantStructEmitter<'a> {
    ser: &'a mut Serializer,
}

impl ser::SerializeStructVariant for VariantStructEmitter<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.enter_key(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.pop_scope();
        self.ser.pop_scope();
        Ok(())
    }
}

/// Renders map keys to path segments. Only string-like and numeric keys can
/// appear in a flat key path.
struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = ser::Impossible<String, Error>;
    type SerializeTuple = ser::Impossible<String, Error>;
    type SerializeTupleStruct = ser::Impossible<String, Error>;
    type SerializeTupleVariant = ser::Impossible<String, Error>;
    type SerializeMap = ser::Impossible<String, Error>;
    type SerializeStruct = ser::Impossible<String, Error>;
    type SerializeStructVariant = ser::Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Error::unsupported_type("byte keys are not supported"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(Error::unsupported_type("none keys are not supported"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Error::unsupported_type("unit keys are not supported"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(Error::unsupported_type("unit struct keys are not supported"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
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
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("variant keys are not supported"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::unsupported_type("sequence keys are not supported"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::unsupported_type("tuple keys are not supported"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::unsupported_type("tuple keys are not supported"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple keys are not supported"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported_type("map keys are not supported"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::unsupported_type("struct keys are not supported"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("variant keys are not supported"))
    }
}

/// Serializer producing a [`FlatValue`] tree instead of text; backs
/// [`crate::to_value`].
pub struct FlatValueSerializer;

fn leaf(text: impl ToString) -> FlatValue {
    FlatValue::Leaf(text.to_string())
}

/// Folds a collected map into a value, lifting an empty-key scalar entry into
/// a branch self-value.
fn map_into_value(mut map: FlatMap) -> FlatValue {
    if matches!(map.get(""), Some(FlatValue::Leaf(_))) {
        if let Some(FlatValue::Leaf(value)) = map.shift_remove("") {
            return FlatValue::Branch {
                value,
                children: Box::new(FlatValue::Object(map)),
            };
        }
    }
    FlatValue::Object(map)
}

impl ser::Serializer for FlatValueSerializer {
    type Ok = FlatValue;
    type Error = Error;

    type SerializeSeq = ValueSeq;
    type SerializeTuple = ValueSeq;
    type SerializeTupleStruct = ValueSeq;
    type SerializeTupleVariant = ValueVariantSeq;
    type SerializeMap = ValueMap;
    type SerializeStruct = ValueMap;
    type SerializeStructVariant = ValueVariantMap;

    fn serialize_bool(self, v: bool) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_i8(self, v: i8) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_i16(self, v: i16) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_i32(self, v: i32) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_i64(self, v: i64) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_u8(self, v: u8) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_u16(self, v: u16) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_u32(self, v: u32) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_u64(self, v: u64) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_f32(self, v: f32) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_f64(self, v: f64) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_char(self, v: char) -> Result<FlatValue> {
        Ok(leaf(v))
    }

    fn serialize_str(self, v: &str) -> Result<FlatValue> {
        Ok(FlatValue::Leaf(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<FlatValue> {
        Ok(FlatValue::Array(v.iter().map(leaf).collect()))
    }

    fn serialize_none(self) -> Result<FlatValue> {
        Ok(FlatValue::Leaf(String::new()))
    }

    fn serialize_some<T>(self, value: &T) -> Result<FlatValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<FlatValue> {
        Ok(FlatValue::Leaf(String::new()))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<FlatValue> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<FlatValue> {
        Ok(FlatValue::Leaf(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<FlatValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<FlatValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = FlatMap::new();
        map.insert(variant.to_string(), value.serialize(FlatValueSerializer)?);
        Ok(FlatValue::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ValueSeq {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(ValueVariantSeq {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(ValueMap {
            map: FlatMap::with_capacity(len.unwrap_or(0)),
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(ValueVariantMap {
            variant,
            map: FlatMap::with_capacity(len),
        })
    }
}

pub struct ValueSeq {
    items: Vec<FlatValue>,
}

impl ser::SerializeSeq for ValueSeq {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(FlatValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FlatValue> {
        Ok(FlatValue::Array(self.items))
    }
}

impl ser::SerializeTuple for ValueSeq {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<FlatValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for ValueSeq {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<FlatValue> {
        ser::SerializeSeq::end(self)
    }
}

pub struct ValueVariantSeq {
    variant: &'static str,
    items: Vec<FlatValue>,
}

impl ser::SerializeTupleVariant for ValueVariantSeq {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(FlatValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FlatValue> {
        let mut map = FlatMap::new();
        map.insert(self.variant.to_string(), FlatValue::Array(self.items));
        Ok(FlatValue::Object(map))
    }
}

pub struct ValueMap {
    map: FlatMap,
    key: Option<String>,
}

impl ser::SerializeMap for ValueMap {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("map value without a preceding key"))?;
        self.map.insert(key, value.serialize(FlatValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FlatValue> {
        Ok(map_into_value(self.map))
    }
}

impl ser::SerializeStruct for ValueMap {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(FlatValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FlatValue> {
        Ok(map_into_value(self.map))
    }
}

pub struct ValueVariantMap {
    variant: &'static str,
    map: FlatMap,
}

impl ser::SerializeStructVariant for ValueVariantMap {
    type Ok = FlatValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(key.to_string(), value.serialize(FlatValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<FlatValue> {
        let mut outer = FlatMap::new();
        outer.insert(self.variant.to_string(), FlatValue::Object(self.map));
        Ok(FlatValue::Object(outer))
    }
}
