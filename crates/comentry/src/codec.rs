//! Attribute encoding of entries
//!
//! An entry is written as a flat set of text attributes:
//!
//! | Key     | Field              | Notes                     |
//! |---------|--------------------|---------------------------|
//! | `name`  | name               |                           |
//! | `iid`   | iid                | canonical GUID text       |
//! | `proxy` | proxy_clsid        | canonical GUID text       |
//! | `num`   | num_methods        | decimal                   |
//! | `base`  | base               | omitted when empty        |
//! | `ver`   | type_lib_version   | omitted when empty        |
//! | `tlib`  | type_lib           | canonical GUID text       |
//!
//! Decoding is the exact inverse. It does not re-apply the normalizer's
//! defaults: an absent `base` reads back as an empty string, not `IUnknown`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::GUID;
use crate::entry::InterfaceEntry;
use crate::error::{CodecError, Result};

pub const NAME_ATTR: &str = "name";
pub const IID_ATTR: &str = "iid";
pub const PROXY_ATTR: &str = "proxy";
pub const NUM_METHODS_ATTR: &str = "num";
pub const BASE_ATTR: &str = "base";
pub const VERSION_ATTR: &str = "ver";
pub const TYPE_LIB_ATTR: &str = "tlib";

// =============================================================================
// Reader / Writer
// =============================================================================

/// Source of named text attributes.
pub trait AttributeReader {
    /// Raw attribute text, `None` when absent.
    fn read_string(&self, key: &str) -> Option<String>;

    /// Attribute parsed as a GUID. Present but malformed text is an error.
    fn read_guid(&self, key: &str) -> Result<Option<GUID>> {
        self.read_string(key)
            .map(|value| {
                value.parse().map_err(|_| CodecError::InvalidGuid {
                    key: key.to_owned(),
                    value,
                })
            })
            .transpose()
    }

    /// Attribute parsed as a decimal integer. Present but malformed text is an error.
    fn read_int(&self, key: &str) -> Result<Option<i64>> {
        self.read_string(key)
            .map(|value| {
                value.trim().parse().map_err(|_| CodecError::InvalidInteger {
                    key: key.to_owned(),
                    value,
                })
            })
            .transpose()
    }
}

/// Sink for named text attributes.
pub trait AttributeWriter {
    fn write_string(&mut self, key: &str, value: &str);

    fn write_guid(&mut self, key: &str, value: GUID) {
        self.write_string(key, &value.to_string());
    }

    fn write_int(&mut self, key: &str, value: i64) {
        self.write_string(key, &value.to_string());
    }

    /// Write `value` only if it is non-empty.
    fn write_optional_string(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.write_string(key, value);
        }
    }
}

// =============================================================================
// AttributeMap
// =============================================================================

/// Sorted in-memory attribute set. Serializes as a plain string map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, String>);

impl AttributeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl AttributeReader for AttributeMap {
    fn read_string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

impl AttributeWriter for AttributeMap {
    fn write_string(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }
}

// =============================================================================
// Encode / Decode
// =============================================================================

impl InterfaceEntry {
    /// Write this entry's attributes.
    pub fn encode<W: AttributeWriter + ?Sized>(&self, writer: &mut W) {
        writer.write_string(NAME_ATTR, self.name());
        writer.write_guid(IID_ATTR, self.iid());
        writer.write_guid(PROXY_ATTR, self.proxy_clsid());
        writer.write_int(NUM_METHODS_ATTR, i64::from(self.num_methods()));
        writer.write_optional_string(BASE_ATTR, self.base());
        writer.write_optional_string(VERSION_ATTR, self.type_lib_version());
        writer.write_guid(TYPE_LIB_ATTR, self.type_lib());
    }

    /// Encode into a fresh [`AttributeMap`].
    #[must_use]
    pub fn to_attributes(&self) -> AttributeMap {
        let mut map = AttributeMap::new();
        self.encode(&mut map);
        map
    }

    /// Read an entry back from its attributes.
    ///
    /// Absent attributes decode as empty text, `GUID::ZERO` or 0. A GUID or
    /// integer attribute that is present but malformed fails the whole entry.
    /// `num` must fit a `u32`: a negative count is rejected as
    /// [`CodecError::InvalidInteger`] rather than kept.
    pub fn decode<R: AttributeReader + ?Sized>(reader: &R) -> Result<Self> {
        decode_parts(reader).inspect_err(|err| debug!(%err, "failed to decode interface entry"))
    }
}

fn decode_parts<R: AttributeReader + ?Sized>(reader: &R) -> Result<InterfaceEntry> {
    let name = reader.read_string(NAME_ATTR).unwrap_or_default();
    let iid = reader.read_guid(IID_ATTR)?.unwrap_or(GUID::ZERO);
    let proxy_clsid = reader.read_guid(PROXY_ATTR)?.unwrap_or(GUID::ZERO);
    let num_methods = match reader.read_int(NUM_METHODS_ATTR)? {
        Some(raw) => u32::try_from(raw).map_err(|_| CodecError::InvalidInteger {
            key: NUM_METHODS_ATTR.to_owned(),
            value: raw.to_string(),
        })?,
        None => 0,
    };
    let base = reader.read_string(BASE_ATTR).unwrap_or_default();
    let type_lib_version = reader.read_string(VERSION_ATTR).unwrap_or_default();
    let type_lib = reader.read_guid(TYPE_LIB_ATTR)?.unwrap_or(GUID::ZERO);

    Ok(InterfaceEntry::from_parts(
        iid,
        name,
        proxy_clsid,
        num_methods,
        base,
        type_lib,
        type_lib_version,
    ))
}

// =============================================================================
// Serde - entries travel as their attribute map
// =============================================================================

impl Serialize for InterfaceEntry {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        self.to_attributes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InterfaceEntry {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let map = AttributeMap::deserialize(deserializer)?;
        InterfaceEntry::decode(&map).map_err(serde::de::Error::custom)
    }
}
