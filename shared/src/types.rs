/// Registration-order position of a definition within its registry
pub type DefinitionId = usize;

/// Opaque handle for a remote viewer, as understood by the transport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerKey(pub u64);

/// Wire position of an attribute for the active protocol version.
///
/// `255` is reserved as the end-of-batch marker, so wire slots span `0..=254`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotIndex {
    Wire(u8),
    /// No wire slot in this protocol version
    Unsupported,
    /// Tooling-only attribute, never transmitted
    EditorOnly,
}

impl SlotIndex {
    pub const UNSUPPORTED_RAW: i32 = -1;
    pub const EDITOR_ONLY_RAW: i32 = -2;
    pub const MAX_WIRE: u8 = 254;

    pub fn from_raw(raw: i32) -> Self {
        match raw {
            Self::EDITOR_ONLY_RAW => SlotIndex::EditorOnly,
            0..=254 => SlotIndex::Wire(raw as u8),
            _ => SlotIndex::Unsupported,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            SlotIndex::Wire(slot) => i32::from(slot),
            SlotIndex::Unsupported => Self::UNSUPPORTED_RAW,
            SlotIndex::EditorOnly => Self::EDITOR_ONLY_RAW,
        }
    }

    pub fn wire(self) -> Option<u8> {
        match self {
            SlotIndex::Wire(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self != SlotIndex::Unsupported
    }

    pub fn is_transmittable(self) -> bool {
        self != SlotIndex::EditorOnly
    }
}

impl From<u8> for SlotIndex {
    fn from(slot: u8) -> Self {
        Self::from_raw(i32::from(slot))
    }
}

/// Identifies the masked group sharing one wire slot. Keyed directly by the
/// slot, so every masked attribute on that slot lands in the same group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaskGroupKey(u8);

impl MaskGroupKey {
    pub fn new(slot: u8) -> Self {
        Self(slot)
    }

    pub fn slot(&self) -> u8 {
        self.0
    }
}
