//! Registry snapshot files
//!
//! A snapshot is a JSON dump of `HKCR\Interface`:
//!
//! ```json
//! {
//!   "interfaces": {
//!     "{00020400-0000-0000-C000-000000000046}": {
//!       "values": { "": "IDispatch" },
//!       "subkeys": { "NumMethods": { "values": { "": "7" } } }
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use comentry::{GUID, InterfaceEntry, KnownInterface, MemoryKey};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub interfaces: BTreeMap<String, MemoryKey>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing snapshot {}", path.display()))
    }

    /// Normalize every registered interface and add the well-known roots.
    ///
    /// Key names that are not IIDs are skipped. A registration for a
    /// well-known IID replaces its fixed entry.
    pub fn entries(&self) -> Vec<InterfaceEntry> {
        let mut by_iid: BTreeMap<GUID, InterfaceEntry> = KnownInterface::ALL
            .into_iter()
            .map(|known| (known.iid(), known.entry()))
            .collect();

        for (name, key) in &self.interfaces {
            match name.parse::<GUID>() {
                Ok(iid) => {
                    let entry = InterfaceEntry::from_registry(iid, key);
                    debug!(%iid, name = entry.name(), "normalized interface");
                    by_iid.insert(iid, entry);
                }
                Err(err) => warn!(key = %name, %err, "skipping non-IID interface key"),
            }
        }

        let mut entries: Vec<InterfaceEntry> = by_iid.into_values().collect();
        entries.sort_by(InterfaceEntry::compare_by_name);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_include_known_and_skip_bad_keys() {
        let json = r#"{
            "interfaces": {
                "{00020400-0000-0000-C000-000000000046}": {
                    "values": { "": "IDispatch" },
                    "subkeys": { "NumMethods": { "values": { "": "7" } } }
                },
                "not-an-iid": { "values": { "": "IBogus" } }
            }
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let entries = snapshot.entries();
        let names: Vec<&str> = entries.iter().map(InterfaceEntry::name).collect();
        assert_eq!(names, ["IDispatch", "IMarshal", "IUnknown"]);
        assert!(entries[0].is_dispatch());
        assert_eq!(entries[0].num_methods(), 7);
    }
}
