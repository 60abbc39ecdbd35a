use std::fmt;

use crate::types::SlotIndex;

/// Protocol revision spoken by every viewer of this process, e.g. `11_700`.
/// Fixed at registry construction and never changed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    /// Resolves every candidate table to its newest entry
    pub const LATEST: Self = Self(u32::MAX);

    pub fn new(version: u32) -> Self {
        Self(version)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl From<u32> for ProtocolVersion {
    fn from(version: u32) -> Self {
        Self(version)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::LATEST {
            write!(f, "latest")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Picks the candidate whose minimum version is the greatest one not above
/// `current`. Candidate order does not matter; on equal thresholds the first
/// listed wins. `None` means the value does not exist in this version.
pub fn resolve<V, T>(current: ProtocolVersion, candidates: &[(V, T)]) -> Option<T>
where
    V: Copy + Into<ProtocolVersion>,
    T: Clone,
{
    let mut best: Option<(ProtocolVersion, &T)> = None;
    for (min_version, value) in candidates {
        let min_version: ProtocolVersion = (*min_version).into();
        if min_version > current {
            continue;
        }
        match best {
            Some((best_version, _)) if best_version >= min_version => {}
            _ => best = Some((min_version, value)),
        }
    }
    best.map(|(_, value)| value.clone())
}

/// `resolve` over raw slot numbers, where `-1` in a candidate marks a version
/// range that dropped the attribute.
pub fn resolve_slot(current: ProtocolVersion, candidates: &[(u32, i32)]) -> SlotIndex {
    resolve(current, candidates)
        .map(SlotIndex::from_raw)
        .unwrap_or(SlotIndex::Unsupported)
}
