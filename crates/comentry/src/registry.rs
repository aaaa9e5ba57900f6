//! Read-only view of registration data
//!
//! [`RegistryKey`] is a key node in a hierarchical store. Reads address a
//! value by an optional subkey path (components separated by `\`) and an
//! optional value name, where `None` means the key's default value. A missing
//! value is an ordinary outcome and reads as `None`.
//!
//! [`MemoryKey`] is an in-memory store used for snapshots and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::GUID;

/// A typed registration value.
///
/// Snapshot text always deserializes as `String`, so names that happen to be
/// GUID text are kept verbatim; [`RegistryKey::read_guid`] parses on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegValue {
    Integer(i64),
    #[serde(skip_deserializing)]
    Guid(GUID),
    String(String),
}

impl From<&str> for RegValue {
    fn from(value: &str) -> Self {
        RegValue::String(value.to_owned())
    }
}

impl From<String> for RegValue {
    fn from(value: String) -> Self {
        RegValue::String(value)
    }
}

impl From<i64> for RegValue {
    fn from(value: i64) -> Self {
        RegValue::Integer(value)
    }
}

impl From<GUID> for RegValue {
    fn from(value: GUID) -> Self {
        RegValue::Guid(value)
    }
}

// =============================================================================
// RegistryKey
// =============================================================================

/// A readable key in a registration store.
pub trait RegistryKey {
    /// Point read of `value` under `subkey`.
    fn read(&self, subkey: Option<&str>, value: Option<&str>) -> Option<RegValue>;

    /// Read a value as text. Integers and GUIDs are rendered.
    fn read_string(&self, subkey: Option<&str>, value: Option<&str>) -> Option<String> {
        match self.read(subkey, value)? {
            RegValue::String(s) => Some(s),
            RegValue::Integer(i) => Some(i.to_string()),
            RegValue::Guid(g) => Some(g.to_braced_string()),
        }
    }

    /// Read a value as an integer. Strings holding decimal or `0x` hex parse.
    fn read_int(&self, subkey: Option<&str>, value: Option<&str>) -> Option<i64> {
        match self.read(subkey, value)? {
            RegValue::Integer(i) => Some(i),
            RegValue::String(s) => parse_int(&s),
            RegValue::Guid(_) => None,
        }
    }

    /// Read a value as a GUID. Strings in any GUID text form parse.
    fn read_guid(&self, subkey: Option<&str>, value: Option<&str>) -> Option<GUID> {
        match self.read(subkey, value)? {
            RegValue::Guid(g) => Some(g),
            RegValue::String(s) => s.parse().ok(),
            RegValue::Integer(_) => None,
        }
    }
}

impl<K: RegistryKey + ?Sized> RegistryKey for &K {
    fn read(&self, subkey: Option<&str>, value: Option<&str>) -> Option<RegValue> {
        (**self).read(subkey, value)
    }
}

fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<i64>().ok()?
        }
        None => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// MemoryKey
// =============================================================================

/// In-memory registry key.
///
/// The default value is stored under the empty name. Subkey and value names
/// match case-insensitively, as they do in the Windows registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryKey {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<String, RegValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    subkeys: BTreeMap<String, MemoryKey>,
}

impl MemoryKey {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set this key's default value.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<RegValue>) -> Self {
        self.values.insert(String::new(), value.into());
        self
    }

    /// Set a named value on this key.
    #[must_use]
    pub fn with_value(mut self, name: &str, value: impl Into<RegValue>) -> Self {
        self.values.insert(name.to_owned(), value.into());
        self
    }

    /// Set the default value of `subkey`, creating it if needed.
    #[must_use]
    pub fn with_subkey_default(self, subkey: &str, value: impl Into<RegValue>) -> Self {
        self.with_subkey_value(subkey, "", value)
    }

    /// Set a named value of `subkey`, creating it if needed.
    #[must_use]
    pub fn with_subkey_value(
        mut self,
        subkey: &str,
        name: &str,
        value: impl Into<RegValue>,
    ) -> Self {
        let mut key = &mut self;
        for component in subkey.split('\\').filter(|c| !c.is_empty()) {
            key = key.subkeys.entry(component.to_owned()).or_default();
        }
        key.values.insert(name.to_owned(), value.into());
        self
    }

    fn subkey(&self, path: &str) -> Option<&MemoryKey> {
        path.split('\\')
            .filter(|c| !c.is_empty())
            .try_fold(self, |key, component| lookup(&key.subkeys, component))
    }
}

fn lookup<'a, V>(map: &'a BTreeMap<String, V>, name: &str) -> Option<&'a V> {
    map.get(name).or_else(|| {
        map.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    })
}

impl RegistryKey for MemoryKey {
    fn read(&self, subkey: Option<&str>, value: Option<&str>) -> Option<RegValue> {
        let key = match subkey {
            Some(path) => self.subkey(path)?,
            None => self,
        };
        lookup(&key.values, value.unwrap_or_default()).cloned()
    }
}
