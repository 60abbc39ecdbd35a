mod broadcast;
mod meta_instance;

pub use broadcast::{MetaEntity, ViewerTransport};
pub use meta_instance::MetaInstance;
