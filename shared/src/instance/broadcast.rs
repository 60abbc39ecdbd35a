use crate::{entry::MetaEntry, types::ViewerKey};

/// The simulated entity an instance's metadata belongs to
pub trait MetaEntity: Send + Sync {
    /// Wire entity id
    fn index(&self) -> i32;

    /// Viewers currently entitled to this entity's state
    fn current_viewers(&self) -> Vec<ViewerKey>;
}

/// Hands encoded entries to remote viewers. Called synchronously from the
/// write path while the written attribute is still locked, so it must not
/// block and must not write back into that same attribute. Delivery failures
/// are the transport's own concern.
pub trait ViewerTransport: Send + Sync {
    fn deliver(&self, viewers: &[ViewerKey], entity_index: i32, entries: &[MetaEntry]);
}
