//! Building entries from registration data
//!
//! Layout of an interface registration key (`HKCR\Interface\{IID}`):
//!
//! ```text
//! {IID}                      (default) = display name
//! ├── ProxyStubCLSID32       (default) = {CLSID}
//! ├── NumMethods             (default) = vtable size
//! ├── TypeLib                (default) = {LIBID}, Version = "1.0"
//! └── BaseInterface          (default) = base interface name
//! ```
//!
//! Every value is optional. Missing or empty values fall back to defaults;
//! normalization never fails.

use tracing::trace;

use crate::GUID;
use crate::entry::InterfaceEntry;
use crate::known::{MIN_METHODS, UNKNOWN_NAME};
use crate::registry::RegistryKey;

pub const PROXY_STUB_KEY: &str = "ProxyStubCLSID32";
pub const NUM_METHODS_KEY: &str = "NumMethods";
pub const TYPE_LIB_KEY: &str = "TypeLib";
pub const TYPE_LIB_VERSION_VALUE: &str = "Version";
pub const BASE_INTERFACE_KEY: &str = "BaseInterface";

impl InterfaceEntry {
    /// Normalize the registration rooted at `key` for interface `iid`.
    pub fn from_registry<K: RegistryKey + ?Sized>(iid: GUID, key: &K) -> Self {
        let name = match key.read_string(None, None) {
            Some(name) if !name.is_empty() => name,
            _ => {
                trace!(%iid, "no display name, using braced IID");
                iid.to_braced_string()
            }
        };

        let proxy_clsid = key
            .read_guid(Some(PROXY_STUB_KEY), None)
            .unwrap_or(GUID::ZERO);

        let raw_methods = key.read_int(Some(NUM_METHODS_KEY), None).unwrap_or(0);
        let num_methods = clamp_methods(raw_methods);
        if i64::from(num_methods) != raw_methods {
            trace!(%iid, raw_methods, num_methods, "clamped method count");
        }

        let type_lib = key
            .read_guid(Some(TYPE_LIB_KEY), None)
            .unwrap_or(GUID::ZERO);
        let type_lib_version = key
            .read_string(Some(TYPE_LIB_KEY), Some(TYPE_LIB_VERSION_VALUE))
            .unwrap_or_default();

        let base = match key.read_string(Some(BASE_INTERFACE_KEY), None) {
            Some(base) if !base.is_empty() => base,
            _ => {
                trace!(%iid, "no base interface, assuming IUnknown");
                UNKNOWN_NAME.to_owned()
            }
        };

        Self::from_parts(
            iid,
            name,
            proxy_clsid,
            num_methods,
            base,
            type_lib,
            type_lib_version,
        )
    }
}

/// Raise to the IUnknown floor; saturate values that do not fit a `u32`.
fn clamp_methods(raw: i64) -> u32 {
    if raw <= i64::from(MIN_METHODS) {
        MIN_METHODS
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}
