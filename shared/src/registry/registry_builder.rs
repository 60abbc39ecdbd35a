use std::{collections::HashMap, sync::Arc};

use log::{debug, info, warn};

use crate::{
    codec::{CodecTable, MetaCodec},
    config::{DuplicatePolicy, MetaConfig},
    editor::{EditorHook, EditorHooks},
    error::MetaError,
    types::{DefinitionId, SlotIndex},
    value::{MetaKind, MetaValue},
    version::{resolve_slot, ProtocolVersion},
};

use super::{DefinitionForm, DefinitionHandle, MetaDefinition, MetaRegistry};

/// Collects definitions for one entity type. Codecs are bound here, once per
/// definition, from the kind of its default value.
pub struct MetaRegistryBuilder {
    config: MetaConfig,
    codecs: CodecTable,
    definitions: Vec<MetaDefinition>,
    names: HashMap<String, DefinitionId>,
}

impl MetaRegistryBuilder {
    pub fn new(config: MetaConfig) -> Self {
        Self {
            config,
            codecs: CodecTable::default(),
            definitions: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Replaces the codec table used by later registrations
    pub fn codecs(mut self, codecs: CodecTable) -> Self {
        self.codecs = codecs;
        self
    }

    pub fn codec_table(&self) -> &CodecTable {
        &self.codecs
    }

    pub fn version(&self) -> ProtocolVersion {
        self.config.protocol_version
    }

    /// Resolves a `(min_version, raw_slot)` table against the configured version
    pub fn at(&self, candidates: &[(u32, i32)]) -> SlotIndex {
        resolve_slot(self.config.protocol_version, candidates)
    }

    pub fn register(
        &mut self,
        slot: impl Into<SlotIndex>,
        name: &str,
        default: impl Into<MetaValue>,
    ) -> Result<DefinitionHandle, MetaError> {
        let default = default.into();
        let codec = self.codecs.get(default.kind());
        self.push(
            slot.into(),
            name,
            default,
            codec,
            DefinitionForm::Natural,
            EditorHook::Unbound,
        )
    }

    /// Registers one flag of a shared byte slot. Mask bits within one slot
    /// must be disjoint; overlaps are accepted but corrupt each other's flag
    /// on the wire.
    pub fn register_masked(
        &mut self,
        slot: impl Into<SlotIndex>,
        name: &str,
        mask: u8,
        default: bool,
    ) -> Result<DefinitionHandle, MetaError> {
        let slot = slot.into();
        if mask == 0 {
            warn!("MetaRegistry: Metadata {:?} has an empty mask and will never set a bit", name);
        }
        if let SlotIndex::Wire(index) = slot {
            for other in &self.definitions {
                if other.slot() != slot {
                    continue;
                }
                if let Some(other_mask) = other.mask() {
                    if other_mask & mask != 0 {
                        warn!(
                            "MetaRegistry: Metadata {:?} mask {:#04x} overlaps {:?} mask {:#04x} on slot {}",
                            name,
                            mask,
                            other.name(),
                            other_mask,
                            index
                        );
                    }
                }
            }
        }
        let codec = self.codecs.get(MetaKind::Byte);
        self.push(
            slot,
            name,
            MetaValue::Boolean(default),
            codec,
            DefinitionForm::Masked { mask },
            EditorHook::Unbound,
        )
    }

    /// Registers a tooling-only attribute with no wire representation
    pub fn register_editor_only(&mut self, name: &str) -> Result<DefinitionHandle, MetaError> {
        self.push(
            SlotIndex::EditorOnly,
            name,
            MetaValue::Int(0),
            None,
            DefinitionForm::Natural,
            EditorHook::Bound(EditorHooks::new()),
        )
    }

    /// Binds hooks to a definition registered on this builder
    pub fn editor(&mut self, handle: DefinitionHandle, hooks: EditorHooks) -> &mut Self {
        if let Some(definition) = self.definitions.get(handle.id()) {
            definition.bind_editor(hooks);
        }
        self
    }

    pub fn build(self) -> Arc<MetaRegistry> {
        let registry = MetaRegistry::from_parts(self.config, self.definitions, self.names);
        info!(
            "MetaRegistry: built {} definitions in {} mask groups for protocol {}",
            registry.len(),
            registry.mask_groups().len(),
            registry.version()
        );
        Arc::new(registry)
    }

    fn push(
        &mut self,
        slot: SlotIndex,
        name: &str,
        default: MetaValue,
        codec: Option<Arc<dyn MetaCodec>>,
        form: DefinitionForm,
        editor: EditorHook,
    ) -> Result<DefinitionHandle, MetaError> {
        if self.names.contains_key(name) {
            match self.config.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(MetaError::DuplicateAttribute {
                        name: name.to_string(),
                    });
                }
                DuplicatePolicy::FirstWins => {
                    warn!(
                        "MetaRegistry: Metadata {:?} registered more than once, lookups keep the first",
                        name
                    );
                }
            }
        }

        let slot = match (slot, &codec) {
            (SlotIndex::Wire(index), None) => {
                warn!(
                    "MetaRegistry: no codec for {} value of Metadata {:?}, slot {} treated as unsupported",
                    default.kind(),
                    name,
                    index
                );
                SlotIndex::Unsupported
            }
            (slot, _) => slot,
        };
        let codec = match slot {
            SlotIndex::EditorOnly => None,
            _ => codec,
        };
        if let (SlotIndex::Wire(index), Some(other)) =
            (slot, self.slot_conflict(slot, form.is_masked()))
        {
            warn!(
                "MetaRegistry: Metadata {:?} shares slot {} with {:?}, both will be sent for that slot",
                name,
                index,
                other.name()
            );
        }

        let id = self.definitions.len();
        self.names.entry(name.to_string()).or_insert(id);
        debug!("MetaRegistry: Registering Metadata {:?} at {:?}", name, slot);
        self.definitions.push(MetaDefinition::new(
            id, slot, name, default, codec, form, editor,
        ));

        Ok(DefinitionHandle(id))
    }

    /// An earlier definition on the same wire slot that cannot share it.
    /// Only masked definitions share a slot, through their group.
    fn slot_conflict(&self, slot: SlotIndex, masked: bool) -> Option<&MetaDefinition> {
        if slot.wire().is_none() {
            return None;
        }
        self.definitions
            .iter()
            .find(|other| other.slot() == slot && !(masked && other.is_masked()))
    }
}
