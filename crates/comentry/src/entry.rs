//! The interface entry value type
//!
//! An [`InterfaceEntry`] is built once by one of its constructors and never
//! mutated afterwards:
//! - [`InterfaceEntry::from_registry`] - normalized from a registration key
//! - [`InterfaceEntry::unregistered`] - referenced but never registered
//! - [`InterfaceEntry::known`] - fixed well-known entry
//! - [`InterfaceEntry::decode`] - read back from its attribute encoding
//!
//! Entries from the first three paths always have `num_methods >= 3` and a
//! non-empty `name` and `base` (except the fixed roots, whose base is empty).
//! Decoded entries carry exactly what was persisted and are not re-normalized.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use xxhash_rust::xxh3::xxh3_64;

use crate::GUID;
use crate::known::{
    IID_ICLASSFACTORY, IID_IDISPATCH, IID_IMARSHAL, IID_IOLECONTROL, IID_IPERSISTSTREAM,
    IID_IPERSISTSTREAMINIT, IID_IUNKNOWN, KnownInterface, MIN_METHODS, UNKNOWN_NAME,
};

/// Normalized description of a COM interface.
#[derive(Clone)]
pub struct InterfaceEntry {
    iid: GUID,
    name: String,
    proxy_clsid: GUID,
    num_methods: u32,
    base: String,
    type_lib: GUID,
    type_lib_version: String,
}

impl InterfaceEntry {
    pub(crate) fn from_parts(
        iid: GUID,
        name: String,
        proxy_clsid: GUID,
        num_methods: u32,
        base: String,
        type_lib: GUID,
        type_lib_version: String,
    ) -> Self {
        Self {
            iid,
            name,
            proxy_clsid,
            num_methods,
            base,
            type_lib,
            type_lib_version,
        }
    }

    /// Entry for an interface that is referenced but has no registration.
    ///
    /// The name is the braced IID, e.g. `{00020400-0000-0000-C000-000000000046}`.
    #[must_use]
    pub fn unregistered(iid: GUID) -> Self {
        Self::from_parts(
            iid,
            iid.to_braced_string(),
            GUID::ZERO,
            MIN_METHODS,
            UNKNOWN_NAME.to_owned(),
            GUID::ZERO,
            String::new(),
        )
    }

    /// Fixed entry for a well-known interface. These are roots, so `base` is empty.
    #[must_use]
    pub fn known(known: KnownInterface) -> Self {
        Self::from_parts(
            known.iid(),
            known.name().to_owned(),
            GUID::ZERO,
            known.num_methods(),
            String::new(),
            GUID::ZERO,
            String::new(),
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn iid(&self) -> GUID {
        self.iid
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Proxy/stub class, or `GUID::ZERO` when the interface has no custom proxy.
    #[must_use]
    pub const fn proxy_clsid(&self) -> GUID {
        self.proxy_clsid
    }

    /// Vtable size, including the three IUnknown slots.
    #[must_use]
    pub const fn num_methods(&self) -> u32 {
        self.num_methods
    }

    /// Name of the immediate base interface. Not resolved to an entry.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Type library ID, or `GUID::ZERO` when absent.
    #[must_use]
    pub const fn type_lib(&self) -> GUID {
        self.type_lib
    }

    /// Type library version, empty when absent.
    #[must_use]
    pub fn type_lib_version(&self) -> &str {
        &self.type_lib_version
    }

    #[must_use]
    pub const fn has_proxy(&self) -> bool {
        !self.proxy_clsid.is_zero()
    }

    #[must_use]
    pub const fn has_type_lib(&self) -> bool {
        !self.type_lib.is_zero()
    }

    // =========================================================================
    // Identity predicates
    // =========================================================================

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.iid == IID_IUNKNOWN
    }

    #[must_use]
    pub fn is_dispatch(&self) -> bool {
        self.iid == IID_IDISPATCH
    }

    #[must_use]
    pub fn is_ole_control(&self) -> bool {
        self.iid == IID_IOLECONTROL
    }

    #[must_use]
    pub fn is_marshal(&self) -> bool {
        self.iid == IID_IMARSHAL
    }

    /// True for both `IPersistStream` and `IPersistStreamInit`.
    #[must_use]
    pub fn is_persist_stream(&self) -> bool {
        self.iid == IID_IPERSISTSTREAM || self.iid == IID_IPERSISTSTREAMINIT
    }

    #[must_use]
    pub fn is_class_factory(&self) -> bool {
        self.iid == IID_ICLASSFACTORY
    }

    // =========================================================================
    // Ordering and hashing
    // =========================================================================

    /// Case-sensitive comparison of display names only.
    ///
    /// Entries with equal names compare `Equal` even when other fields differ,
    /// so this is a preorder and not consistent with `==`. Use with `sort_by`,
    /// or wrap in [`ByName`] for ordered collections.
    #[must_use]
    pub fn compare_by_name(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    /// Hash of all seven fields, combined with XOR. Empty strings hash to 0.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        hash_str(&self.name)
            ^ hash_guid(&self.iid)
            ^ hash_guid(&self.proxy_clsid)
            ^ xxh3_64(&self.num_methods.to_le_bytes())
            ^ hash_str(&self.base)
            ^ hash_guid(&self.type_lib)
            ^ hash_str(&self.type_lib_version)
    }
}

fn hash_str(s: &str) -> u64 {
    if s.is_empty() { 0 } else { xxh3_64(s.as_bytes()) }
}

fn hash_guid(g: &GUID) -> u64 {
    xxh3_64(&g.to_u128().to_be_bytes())
}

impl PartialEq for InterfaceEntry {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        self.name == other.name
            && self.iid == other.iid
            && self.proxy_clsid == other.proxy_clsid
            && self.num_methods == other.num_methods
            && self.base == other.base
            && self.type_lib == other.type_lib
            && self.type_lib_version == other.type_lib_version
    }
}

impl Eq for InterfaceEntry {}

impl Hash for InterfaceEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Debug for InterfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfaceEntry")
            .field("name", &self.name)
            .field("iid", &self.iid)
            .field("proxy_clsid", &self.proxy_clsid)
            .field("num_methods", &self.num_methods)
            .field("base", &self.base)
            .field("type_lib", &self.type_lib)
            .field("type_lib_version", &self.type_lib_version)
            .finish()
    }
}

impl fmt::Display for InterfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InterfaceEntry: {}", self.name)
    }
}

// =============================================================================
// ByName - name ordering for sorted collections
// =============================================================================

/// Borrowed entry ordered and compared by display name alone.
///
/// Two distinct interfaces with the same name are equal under this wrapper,
/// so a `BTreeSet<ByName>` keeps only one of them.
#[derive(Debug, Clone, Copy)]
pub struct ByName<'a>(pub &'a InterfaceEntry);

impl PartialEq for ByName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for ByName<'_> {}

impl PartialOrd for ByName<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByName<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.compare_by_name(other.0)
    }
}
