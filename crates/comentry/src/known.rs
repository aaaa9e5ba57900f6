//! Well-known COM interfaces
//!
//! These interfaces are defined by convention and never discovered through the
//! registration store. Their IIDs are compile-time constants; two of them
//! (`IUnknown` and `IMarshal`) also have full fixed entries, see [`KnownInterface`].

use crate::GUID;
use crate::entry::InterfaceEntry;

/// Name of the universal base interface.
pub const UNKNOWN_NAME: &str = "IUnknown";

/// Slot count of the IUnknown vtable: QueryInterface, AddRef, Release.
///
/// No interface can have fewer methods than this.
pub const MIN_METHODS: u32 = 3;

/// Define the table of well-known interface IDs.
///
/// For each `Name = "guid"` line this emits `pub const IID_NAME: GUID` and an
/// entry in [`WELL_KNOWN_IIDS`].
macro_rules! define_known_iids {
    (
        $(
            $(#[$meta:meta])*
            $name:ident = $guid:literal
        ),* $(,)?
    ) => {
        $crate::paste! {
            $(
                $(#[$meta])*
                pub const [<IID_ $name:upper>]: GUID = $crate::guid!($guid);
            )*

            /// Every well-known IID with its interface name.
            pub const WELL_KNOWN_IIDS: &[(&str, GUID)] = &[
                $( (stringify!($name), [<IID_ $name:upper>]), )*
            ];
        }
    };
}

define_known_iids! {
    /// Root of every COM interface.
    IUnknown = "00000000-0000-0000-C000-000000000046",
    /// Class factory used for activation.
    IClassFactory = "00000001-0000-0000-C000-000000000046",
    /// Custom marshaling.
    IMarshal = "00000003-0000-0000-C000-000000000046",
    /// Persistence to a stream.
    IPersistStream = "00000109-0000-0000-C000-000000000046",
    /// Late-bound automation.
    IDispatch = "00020400-0000-0000-C000-000000000046",
    /// Stream persistence with explicit initialization.
    IPersistStreamInit = "7FD52380-4E07-101B-AE2D-08002B2EC713",
    /// OLE control mnemonics and ambient properties.
    IOleControl = "B196B288-BAB4-101A-B69C-00AA00341D07",
}

/// Look up the conventional name of a well-known IID.
#[must_use]
pub fn well_known_name(iid: &GUID) -> Option<&'static str> {
    WELL_KNOWN_IIDS
        .iter()
        .find(|(_, known)| known == iid)
        .map(|(name, _)| *name)
}

// =============================================================================
// KnownInterface - interfaces with fixed entries
// =============================================================================

/// Interfaces whose whole entry is fixed rather than registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownInterface {
    IUnknown,
    IMarshal,
}

impl KnownInterface {
    pub const ALL: [KnownInterface; 2] = [KnownInterface::IUnknown, KnownInterface::IMarshal];

    #[must_use]
    pub const fn iid(self) -> GUID {
        match self {
            KnownInterface::IUnknown => IID_IUNKNOWN,
            KnownInterface::IMarshal => IID_IMARSHAL,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            KnownInterface::IUnknown => UNKNOWN_NAME,
            KnownInterface::IMarshal => "IMarshal",
        }
    }

    /// Vtable size including the three IUnknown slots.
    #[must_use]
    pub const fn num_methods(self) -> u32 {
        match self {
            KnownInterface::IUnknown => MIN_METHODS,
            KnownInterface::IMarshal => 9,
        }
    }

    #[must_use]
    pub fn from_iid(iid: GUID) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.iid() == iid)
    }

    /// The fixed entry for this interface.
    #[must_use]
    pub fn entry(self) -> InterfaceEntry {
        InterfaceEntry::known(self)
    }
}
