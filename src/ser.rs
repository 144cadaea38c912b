//! YAML representation
//!
//! This module turns any `Serialize` value into a `yaml_rust2::Yaml` node tree
//! with the type [`Representer`]. Emitting the tree as text is the job of the
//! [`Engine`](crate::Engine).

use crate::error::{self, Error, Result};
use crate::yamlformat::{Format, MemberId, Registration};
use serde::ser;
use std::{fmt, num};
use yaml_rust2::yaml::{Array, Hash};
use yaml_rust2::Yaml;

/// Controls how Rust values map to YAML nodes.
///
/// # Example
///
/// ```
/// use serde_derive::Serialize;
/// use yaml_rust2::Yaml;
/// use yamlconf::Representer;
///
/// #[derive(Serialize)]
/// struct Player {
///     name: &'static str,
///     nickname: Option<&'static str>,
/// }
///
/// let representer = Representer {
///     skip_nulls: true,
/// };
/// let node = representer
///     .represent(&Player { name: "Steve", nickname: None })
///     .unwrap();
/// assert_eq!(node["name"], Yaml::String("Steve".to_owned()));
/// assert!(node["nickname"].is_badvalue());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Representer {
    /// Leaves out struct fields whose value is null.
    pub skip_nulls: bool,
}

impl Representer {
    /// Builds the node tree for `value`.
    pub fn represent<T>(&self, value: &T) -> Result<Yaml>
    where
        T: ?Sized + ser::Serialize,
    {
        to_yaml(self, value, None)
    }
}

pub(crate) fn to_yaml<T>(representer: &Representer, elem: &T, format: Option<Format>) -> Result<Yaml>
where
    T: ?Sized + ser::Serialize,
{
    let registration = Registration::of::<T>();
    elem.serialize(NodeSerializer {
        representer,
        registration,
        format,
    })
}

struct NodeSerializer<'r> {
    representer: &'r Representer,
    registration: Option<&'static Registration>,
    format: Option<Format>,
}

impl<'r> NodeSerializer<'r> {
    fn field_format(&self, variant: Option<&str>, field: &MemberId) -> Option<Format> {
        self.registration
            .and_then(|registration| registration.format(variant, field))
    }
}

fn radix<I>(value: I, bits: usize, format: Option<Format>) -> Option<Yaml>
where
    I: fmt::Binary + fmt::LowerHex + fmt::Octal,
{
    let text = match format? {
        Format::Decimal => return None,
        Format::Binary => format!("{:#0width$b}", value, width = bits + 2),
        Format::Hex => format!("{:#0width$x}", value, width = bits / 4 + 2),
        Format::Octal => format!("{:#0width$o}", value, width = (bits + 2) / 3 + 2),
    };
    Some(Yaml::Real(text))
}

impl<'r> ser::Serializer for NodeSerializer<'r> {
    type Ok = Yaml;
    type Error = Error;

    type SerializeSeq = SerializeArray<'r>;
    type SerializeTuple = SerializeArray<'r>;
    type SerializeTupleStruct = SerializeArray<'r>;
    type SerializeTupleVariant = SerializeTupleVariant<'r>;
    type SerializeMap = SerializeMap<'r>;
    type SerializeStruct = SerializeStruct<'r>;
    type SerializeStructVariant = SerializeStructVariant<'r>;

    fn serialize_bool(self, v: bool) -> Result<Yaml> {
        Ok(Yaml::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Yaml> {
        Ok(radix(v, 8, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Yaml> {
        Ok(radix(v, 16, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Yaml> {
        Ok(radix(v, 32, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Yaml> {
        Ok(radix(v, 64, self.format).unwrap_or(Yaml::Integer(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Yaml> {
        Ok(radix(v, 128, self.format).unwrap_or_else(|| Yaml::Real(v.to_string())))
    }

    fn serialize_u8(self, v: u8) -> Result<Yaml> {
        Ok(radix(v, 8, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Yaml> {
        Ok(radix(v, 16, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Yaml> {
        Ok(radix(v, 32, self.format).unwrap_or(Yaml::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Yaml> {
        let decimal = match v {
            v if v <= i64::MAX as u64 => Yaml::Integer(v as i64),
            v => Yaml::Real(v.to_string()),
        };
        Ok(radix(v, 64, self.format).unwrap_or(decimal))
    }

    fn serialize_u128(self, v: u128) -> Result<Yaml> {
        Ok(radix(v, 128, self.format).unwrap_or_else(|| Yaml::Real(v.to_string())))
    }

    fn serialize_f32(self, v: f32) -> Result<Yaml> {
        Ok(Yaml::Real(match v.classify() {
            num::FpCategory::Infinite if v.is_sign_positive() => ".inf".into(),
            num::FpCategory::Infinite => "-.inf".into(),
            num::FpCategory::Nan => ".nan".into(),
            _ => ryu::Buffer::new().format_finite(v).into(),
        }))
    }

    fn serialize_f64(self, v: f64) -> Result<Yaml> {
        Ok(Yaml::Real(match v.classify() {
            num::FpCategory::Infinite if v.is_sign_positive() => ".inf".into(),
            num::FpCategory::Infinite => "-.inf".into(),
            num::FpCategory::Nan => ".nan".into(),
            _ => ryu::Buffer::new().format_finite(v).into(),
        }))
    }

    fn serialize_char(self, value: char) -> Result<Yaml> {
        Ok(Yaml::String(value.to_string()))
    }

    fn serialize_str(self, value: &str) -> Result<Yaml> {
        Ok(Yaml::String(value.to_owned()))
    }

    fn serialize_bytes(self, value: &[u8]) -> Result<Yaml> {
        let vec = value.iter().map(|&b| Yaml::Integer(b as i64)).collect();
        Ok(Yaml::Array(vec))
    }

    fn serialize_unit(self) -> Result<Yaml> {
        Ok(Yaml::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Yaml> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &str,
        _variant_index: u32,
        variant: &str,
    ) -> Result<Yaml> {
        Ok(Yaml::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Yaml>
    where
        T: ?Sized + ser::Serialize,
    {
        let format = self.format.or_else(|| self.field_format(None, &MemberId::Index(0)));
        to_yaml(self.representer, value, format)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &str,
        _variant_index: u32,
        variant: &str,
        value: &T,
    ) -> Result<Yaml>
    where
        T: ?Sized + ser::Serialize,
    {
        let format = self.field_format(Some(variant), &MemberId::Index(0));
        Ok(singleton_hash(
            Yaml::String(variant.to_owned()),
            to_yaml(self.representer, value, format)?,
        ))
    }

    fn serialize_none(self) -> Result<Yaml> {
        self.serialize_unit()
    }

    fn serialize_some<V>(self, value: &V) -> Result<Yaml>
    where
        V: ?Sized + ser::Serialize,
    {
        to_yaml(self.representer, value, self.format)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeArray<'r>> {
        let array = match len {
            None => Array::new(),
            Some(len) => Array::with_capacity(len),
        };
        Ok(SerializeArray {
            serializer: self,
            array,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeArray<'r>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeArray<'r>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _enum: &'static str,
        _idx: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant<'r>> {
        Ok(SerializeTupleVariant {
            serializer: self,
            name: variant,
            array: Array::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap<'r>> {
        Ok(SerializeMap {
            representer: self.representer,
            hash: Hash::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeStruct<'r>> {
        Ok(SerializeStruct {
            serializer: self,
            hash: Hash::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _enum: &'static str,
        _idx: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant<'r>> {
        Ok(SerializeStructVariant {
            serializer: self,
            name: variant,
            hash: Hash::new(),
        })
    }
}

#[doc(hidden)]
pub struct SerializeArray<'r> {
    serializer: NodeSerializer<'r>,
    array: Array,
}

#[doc(hidden)]
pub struct SerializeTupleVariant<'r> {
    serializer: NodeSerializer<'r>,
    name: &'static str,
    array: Array,
}

#[doc(hidden)]
pub struct SerializeMap<'r> {
    representer: &'r Representer,
    hash: Hash,
    next_key: Option<Yaml>,
}

#[doc(hidden)]
pub struct SerializeStruct<'r> {
    serializer: NodeSerializer<'r>,
    hash: Hash,
}

#[doc(hidden)]
pub struct SerializeStructVariant<'r> {
    serializer: NodeSerializer<'r>,
    name: &'static str,
    hash: Hash,
}

impl<'r> ser::SerializeSeq for SerializeArray<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_element<T>(&mut self, elem: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.array
            .push(to_yaml(self.serializer.representer, elem, None)?);
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        Ok(Yaml::Array(self.array))
    }
}

impl<'r> ser::SerializeTuple for SerializeArray<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_element<T>(&mut self, elem: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        ser::SerializeSeq::serialize_element(self, elem)
    }

    fn end(self) -> Result<Yaml> {
        ser::SerializeSeq::end(self)
    }
}

impl<'r> ser::SerializeTupleStruct for SerializeArray<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_field<V>(&mut self, value: &V) -> Result<()>
    where
        V: ?Sized + ser::Serialize,
    {
        let field = MemberId::Index(self.array.len() as u32);
        let format = self.serializer.field_format(None, &field);
        self.array
            .push(to_yaml(self.serializer.representer, value, format)?);
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        ser::SerializeSeq::end(self)
    }
}

impl<'r> ser::SerializeTupleVariant for SerializeTupleVariant<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_field<V>(&mut self, v: &V) -> Result<()>
    where
        V: ?Sized + ser::Serialize,
    {
        let field = MemberId::Index(self.array.len() as u32);
        let format = self.serializer.field_format(Some(self.name), &field);
        self.array
            .push(to_yaml(self.serializer.representer, v, format)?);
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        Ok(singleton_hash(
            Yaml::String(self.name.to_owned()),
            Yaml::Array(self.array),
        ))
    }
}

impl<'r> ser::SerializeMap for SerializeMap<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.next_key = Some(to_yaml(self.representer, key, None)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        match self.next_key.take() {
            Some(key) => self
                .hash
                .insert(key, to_yaml(self.representer, value, None)?),
            None => return Err(error::message("serialize_value called before serialize_key")),
        };
        Ok(())
    }

    fn serialize_entry<K, V>(&mut self, key: &K, value: &V) -> Result<()>
    where
        K: ?Sized + ser::Serialize,
        V: ?Sized + ser::Serialize,
    {
        self.hash.insert(
            to_yaml(self.representer, key, None)?,
            to_yaml(self.representer, value, None)?,
        );
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        Ok(Yaml::Hash(self.hash))
    }
}

impl<'r> ser::SerializeStruct for SerializeStruct<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_field<V>(&mut self, key: &'static str, value: &V) -> Result<()>
    where
        V: ?Sized + ser::Serialize,
    {
        let format = self.serializer.field_format(None, &MemberId::Name(key));
        let value = to_yaml(self.serializer.representer, value, format)?;
        if value.is_null() && self.serializer.representer.skip_nulls {
            return Ok(());
        }
        self.hash.insert(Yaml::String(key.to_owned()), value);
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        Ok(Yaml::Hash(self.hash))
    }
}

impl<'r> ser::SerializeStructVariant for SerializeStructVariant<'r> {
    type Ok = Yaml;
    type Error = Error;

    fn serialize_field<V>(&mut self, field: &'static str, v: &V) -> Result<()>
    where
        V: ?Sized + ser::Serialize,
    {
        let format = self
            .serializer
            .field_format(Some(self.name), &MemberId::Name(field));
        let value = to_yaml(self.serializer.representer, v, format)?;
        if value.is_null() && self.serializer.representer.skip_nulls {
            return Ok(());
        }
        self.hash.insert(Yaml::String(field.to_owned()), value);
        Ok(())
    }

    fn end(self) -> Result<Yaml> {
        Ok(singleton_hash(
            Yaml::String(self.name.to_owned()),
            Yaml::Hash(self.hash),
        ))
    }
}

fn singleton_hash(k: Yaml, v: Yaml) -> Yaml {
    let mut hash = Hash::new();
    hash.insert(k, v);
    Yaml::Hash(hash)
}
