//! Tests for building entries from registration keys

use comentry::{GUID, InterfaceEntry, MemoryKey, RegValue, RegistryKey, guid};

const IID_SAMPLE: GUID = guid!("1cf2b120-547d-101b-8e65-08002b2bd119");
const CLSID_PSOAINTERFACE: GUID = guid!("00020424-0000-0000-C000-000000000046");
const LIBID_SAMPLE: GUID = guid!("00020430-0000-0000-C000-000000000046");

fn full_key() -> MemoryKey {
    MemoryKey::new()
        .with_default("IErrorInfo")
        .with_subkey_default("ProxyStubCLSID32", "{00020424-0000-0000-C000-000000000046}")
        .with_subkey_default("NumMethods", "8")
        .with_subkey_default("TypeLib", "{00020430-0000-0000-C000-000000000046}")
        .with_subkey_value("TypeLib", "Version", "2.0")
        .with_subkey_default("BaseInterface", "IDispatch")
}

// =============================================================================
// Test: Fully registered interface
// =============================================================================

#[test]
fn test_full_registration() {
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &full_key());
    assert_eq!(entry.iid(), IID_SAMPLE);
    assert_eq!(entry.name(), "IErrorInfo");
    assert_eq!(entry.proxy_clsid(), CLSID_PSOAINTERFACE);
    assert!(entry.has_proxy());
    assert_eq!(entry.num_methods(), 8);
    assert_eq!(entry.type_lib(), LIBID_SAMPLE);
    assert!(entry.has_type_lib());
    assert_eq!(entry.type_lib_version(), "2.0");
    assert_eq!(entry.base(), "IDispatch");
}

#[test]
fn test_typed_values() {
    let key = MemoryKey::new()
        .with_default("ITyped")
        .with_subkey_default("ProxyStubCLSID32", CLSID_PSOAINTERFACE)
        .with_subkey_default("NumMethods", 12_i64);
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.proxy_clsid(), CLSID_PSOAINTERFACE);
    assert_eq!(entry.num_methods(), 12);
}

#[test]
fn test_name_used_verbatim() {
    let key = MemoryKey::new().with_default("  odd Name  ");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.name(), "  odd Name  ");
}

// =============================================================================
// Test: Defaults for missing values
// =============================================================================

#[test]
fn test_empty_key_defaults() {
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &MemoryKey::new());
    assert_eq!(entry.name(), "{1CF2B120-547D-101B-8E65-08002B2BD119}");
    assert!(entry.proxy_clsid().is_zero());
    assert_eq!(entry.num_methods(), 3);
    assert!(entry.type_lib().is_zero());
    assert_eq!(entry.type_lib_version(), "");
    assert_eq!(entry.base(), "IUnknown");
}

#[test]
fn test_empty_name_uses_braced_iid() {
    let key = MemoryKey::new().with_default("");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.name(), IID_SAMPLE.to_braced_string());
}

#[test]
fn test_empty_base_defaults_to_iunknown() {
    let key = MemoryKey::new().with_subkey_default("BaseInterface", "");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.base(), "IUnknown");
}

#[test]
fn test_num_methods_floor() {
    for (raw, expected) in [("0", 3), ("1", 3), ("2", 3), ("3", 3), ("10", 10), ("-7", 3)] {
        let key = MemoryKey::new().with_subkey_default("NumMethods", raw);
        let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
        assert_eq!(entry.num_methods(), expected, "raw {raw}");
    }
}

#[test]
fn test_unparseable_values_read_as_absent() {
    let key = MemoryKey::new()
        .with_subkey_default("ProxyStubCLSID32", "not a clsid")
        .with_subkey_default("NumMethods", "many")
        .with_subkey_default("TypeLib", "{broken");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert!(entry.proxy_clsid().is_zero());
    assert_eq!(entry.num_methods(), 3);
    assert!(entry.type_lib().is_zero());
}

#[test]
fn test_version_without_typelib_id() {
    let key = MemoryKey::new().with_subkey_value("TypeLib", "Version", "1.0");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert!(entry.type_lib().is_zero());
    assert_eq!(entry.type_lib_version(), "1.0");
}

#[test]
fn test_subkey_names_are_case_insensitive() {
    let key = MemoryKey::new()
        .with_subkey_default("nummethods", "6")
        .with_subkey_default("BASEINTERFACE", "IPersist");
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.num_methods(), 6);
    assert_eq!(entry.base(), "IPersist");
}

// =============================================================================
// Test: Degenerate constructor
// =============================================================================

#[test]
fn test_unregistered() {
    let entry = InterfaceEntry::unregistered(IID_SAMPLE);
    assert_eq!(entry.name(), "{1CF2B120-547D-101B-8E65-08002B2BD119}");
    assert!(entry.proxy_clsid().is_zero());
    assert_eq!(entry.num_methods(), 3);
    assert_eq!(entry.base(), "IUnknown");
    assert!(entry.type_lib().is_zero());
    assert_eq!(entry.type_lib_version(), "");
}

#[test]
fn test_unregistered_matches_empty_registration() {
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &MemoryKey::new());
    assert_eq!(entry, InterfaceEntry::unregistered(IID_SAMPLE));
}

// =============================================================================
// Test: Custom store
// =============================================================================

/// A store that only answers default-value reads of the key itself.
struct NameOnly(&'static str);

impl RegistryKey for NameOnly {
    fn read(&self, subkey: Option<&str>, value: Option<&str>) -> Option<RegValue> {
        match (subkey, value) {
            (None, None) => Some(RegValue::String(self.0.to_owned())),
            _ => None,
        }
    }
}

#[test]
fn test_custom_store() {
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &NameOnly("ICustom"));
    assert_eq!(entry.name(), "ICustom");
    assert_eq!(entry.base(), "IUnknown");
    assert_eq!(entry.num_methods(), 3);
}

#[test]
fn test_store_behind_trait_object() {
    let key: Box<dyn RegistryKey> = Box::new(full_key());
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, key.as_ref());
    assert_eq!(entry.name(), "IErrorInfo");
}

// =============================================================================
// Test: Snapshot values read verbatim
// =============================================================================

#[test]
fn test_guid_like_text_from_json_kept_verbatim() {
    let key: MemoryKey = serde_json::from_str(
        r#"{
            "values": { "": "{0c733a30-2a1c-11ce-ade5-00aa0044773d}" },
            "subkeys": {
                "BaseInterface": { "values": { "": "0c733a302a1c11ceade500aa0044773d" } },
                "ProxyStubCLSID32": { "values": { "": "{00020424-0000-0000-c000-000000000046}" } }
            }
        }"#,
    )
    .unwrap();
    let entry = InterfaceEntry::from_registry(IID_SAMPLE, &key);
    assert_eq!(entry.name(), "{0c733a30-2a1c-11ce-ade5-00aa0044773d}");
    assert_eq!(entry.base(), "0c733a302a1c11ceade500aa0044773d");
    assert_eq!(entry.proxy_clsid(), CLSID_PSOAINTERFACE);
}

#[test]
fn test_malformed_num_methods_reads_as_absent() {
    for raw in ["--12", "+12", "0x-5", "-0x-5"] {
        let key = MemoryKey::new().with_subkey_default("NumMethods", raw);
        assert_eq!(key.read_int(Some("NumMethods"), None), None, "raw {raw}");
        assert_eq!(InterfaceEntry::from_registry(IID_SAMPLE, &key).num_methods(), 3);
    }
}
