//! GUID support types
//!
//! ## Key Types
//! - [`GUID`] - 128-bit globally unique identifier for interfaces and classes
//! - [`GuidParseError`] - returned when text is not a GUID
//!
//! ## Text forms
//! - `Display`: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` (lowercase, no braces)
//! - [`GUID::to_braced_string`] and `Debug`: `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
//!
//! Parsing accepts any case and the hyphenated, braced, simple and URN forms.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// =============================================================================
// GUID - Globally Unique Identifier
// =============================================================================

/// 128-bit globally unique identifier (GUID/UUID/IID/CLSID).
///
/// Field layout matches the Windows `GUID` structure.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GUID {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl GUID {
    /// Create a new GUID from components
    #[must_use]
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }

    /// The nil/zero GUID. Used as the "absent" sentinel for optional identifiers.
    pub const ZERO: GUID = GUID::new(0, 0, 0, [0; 8]);

    /// Whether this is the nil GUID.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.to_u128() == 0
    }

    /// Pack into a big-endian `u128` (data1 in the most significant bits).
    #[must_use]
    pub const fn to_u128(&self) -> u128 {
        let d = self.data4;
        ((self.data1 as u128) << 96)
            | ((self.data2 as u128) << 80)
            | ((self.data3 as u128) << 64)
            | (u64::from_be_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]]) as u128)
    }

    /// Inverse of [`GUID::to_u128`].
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        let tail = (value as u64).to_be_bytes();
        Self::new((value >> 96) as u32, (value >> 80) as u16, (value >> 64) as u16, tail)
    }

    /// Uppercase hyphenated text wrapped in braces, the registry's key-name form.
    #[must_use]
    pub fn to_braced_string(&self) -> String {
        format!("{{{}}}", Upper(self))
    }
}

struct Upper<'a>(&'a GUID);

impl fmt::Display for Upper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.0;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            g.data1,
            g.data2,
            g.data3,
            g.data4[0],
            g.data4[1],
            g.data4[2],
            g.data4[3],
            g.data4[4],
            g.data4[5],
            g.data4[6],
            g.data4[7]
        )
    }
}

impl fmt::Debug for GUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", Upper(self))
    }
}

impl fmt::Display for GUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1,
            self.data2,
            self.data3,
            self.data4[0],
            self.data4[1],
            self.data4[2],
            self.data4[3],
            self.data4[4],
            self.data4[5],
            self.data4[6],
            self.data4[7]
        )
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Text that could not be read as a GUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid GUID '{input}': {reason}")]
pub struct GuidParseError {
    pub input: String,
    pub reason: String,
}

impl FromStr for GUID {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim())
            .map(GUID::from)
            .map_err(|e| GuidParseError {
                input: s.to_owned(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<uuid::Uuid> for GUID {
    fn from(value: uuid::Uuid) -> Self {
        let (data1, data2, data3, data4) = value.as_fields();
        Self::new(data1, data2, data3, *data4)
    }
}

impl From<GUID> for uuid::Uuid {
    fn from(value: GUID) -> Self {
        uuid::Uuid::from_fields(value.data1, value.data2, value.data3, &value.data4)
    }
}

impl From<u128> for GUID {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<GUID> for u128 {
    fn from(value: GUID) -> Self {
        value.to_u128()
    }
}

#[cfg(feature = "windows-compat")]
impl From<windows_core::GUID> for GUID {
    fn from(value: windows_core::GUID) -> Self {
        Self::new(value.data1, value.data2, value.data3, value.data4)
    }
}

#[cfg(feature = "windows-compat")]
impl From<GUID> for windows_core::GUID {
    fn from(value: GUID) -> Self {
        windows_core::GUID::from_values(value.data1, value.data2, value.data3, value.data4)
    }
}

// =============================================================================
// Serde - GUIDs travel as their canonical text
// =============================================================================

impl serde::Serialize for GUID {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for GUID {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
