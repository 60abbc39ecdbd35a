mod mask_group;
mod meta_store;

pub use mask_group::MaskGroup;
pub use meta_store::MetaStore;
