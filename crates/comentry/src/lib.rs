//! Normalized COM interface entries
//!
//! This crate models one registered COM interface as an immutable value:
//! its IID, display name, vtable size, base interface, proxy/stub class and
//! type library reference.
//!
//! ## Construction paths
//!
//! | Path | Function | Source |
//! |------|----------|--------|
//! | Registration | [`InterfaceEntry::from_registry`] | a [`RegistryKey`] for `Interface\{IID}` |
//! | Unregistered | [`InterfaceEntry::unregistered`] | an IID only |
//! | Well-known | [`InterfaceEntry::known`] | [`KnownInterface`] table |
//! | Persisted | [`InterfaceEntry::decode`] | an [`AttributeReader`] |
//!
//! ## Example
//! ```
//! use comentry::{InterfaceEntry, MemoryKey, guid};
//!
//! let key = MemoryKey::new()
//!     .with_default("IDispatch")
//!     .with_subkey_default("NumMethods", "7");
//!
//! let entry = InterfaceEntry::from_registry(guid!("00020400-0000-0000-C000-000000000046"), &key);
//! assert!(entry.is_dispatch());
//! assert_eq!(entry.num_methods(), 7);
//! assert_eq!(entry.base(), "IUnknown");
//! ```
//!
//! ## Features
//!
//! - `windows-compat`: conversions between [`GUID`] and `windows_core::GUID`

// Lets `guid!` expand to `::comentry::GUID` inside this crate too.
extern crate self as comentry;

pub mod codec;
pub mod entry;
pub mod error;
pub mod guid;
pub mod known;
pub mod normalize;
pub mod registry;

/// Compile-time GUID literal - re-exported from comentry-macro
pub use comentry_macro::guid;

// Re-export paste for use by declarative macros
#[doc(hidden)]
pub use paste::paste;

pub use codec::{AttributeMap, AttributeReader, AttributeWriter};
pub use entry::{ByName, InterfaceEntry};
pub use error::{CodecError, Result};
pub use guid::{GUID, GuidParseError};
pub use known::{KnownInterface, MIN_METHODS, UNKNOWN_NAME};
pub use registry::{MemoryKey, RegValue, RegistryKey};
