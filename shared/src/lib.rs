//! # Metasync Shared
//! Versioned entity metadata: attribute definitions resolved against a
//! protocol version, per-entity attribute stores, boolean bit-packing and the
//! broadcast of every write to an entity's viewers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use metasync_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, VarInt};

mod codec;
mod config;
mod editor;
mod entry;
mod error;
mod instance;
mod registry;
mod store;
mod types;
mod value;
mod version;

pub use codec::{BuiltinCodec, CodecTable, MetaCodec};
pub use config::{DuplicatePolicy, MetaConfig};
pub use editor::{EditorAction, EditorDisplay, EditorHook, EditorHooks};
pub use entry::{read_batch, write_batch, MetaEntry, END_OF_BATCH};
pub use error::MetaError;
pub use instance::{MetaEntity, MetaInstance, ViewerTransport};
pub use registry::{
    DefinitionForm, DefinitionHandle, MaskGroupSpec, MetaDefinition, MetaRegistry,
    MetaRegistryBuilder,
};
pub use store::{MaskGroup, MetaStore};
pub use types::{DefinitionId, MaskGroupKey, SlotIndex, ViewerKey};
pub use value::{BlockPosition, KindMismatch, MetaKind, MetaValue, Pose, Rotation, VillagerData};
pub use version::{resolve, resolve_slot, ProtocolVersion};
