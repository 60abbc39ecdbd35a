use std::collections::HashMap;

use crate::{
    config::MetaConfig,
    editor::EditorHooks,
    error::MetaError,
    types::{DefinitionId, MaskGroupKey, SlotIndex},
    version::ProtocolVersion,
};

mod definition;
mod registry_builder;

pub use definition::{DefinitionForm, DefinitionHandle, MetaDefinition};
pub use registry_builder::MetaRegistryBuilder;

/// Masked definitions sharing one wire slot, in registration order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskGroupSpec {
    key: MaskGroupKey,
    members: Vec<DefinitionId>,
}

impl MaskGroupSpec {
    pub fn key(&self) -> MaskGroupKey {
        self.key
    }

    pub fn members(&self) -> &[DefinitionId] {
        &self.members
    }

    /// The member whose position carries the group's entry in a full snapshot
    pub fn leader(&self) -> Option<DefinitionId> {
        self.members.first().copied()
    }
}

/// Every attribute registered for one entity type, frozen for the protocol
/// version in its config. Shared by all instances of that type.
#[derive(Debug)]
pub struct MetaRegistry {
    config: MetaConfig,
    definitions: Vec<MetaDefinition>,
    names: HashMap<String, DefinitionId>,
    groups: Vec<MaskGroupSpec>,
}

impl MetaRegistry {
    pub fn builder(config: MetaConfig) -> MetaRegistryBuilder {
        MetaRegistryBuilder::new(config)
    }

    pub(crate) fn from_parts(
        config: MetaConfig,
        definitions: Vec<MetaDefinition>,
        names: HashMap<String, DefinitionId>,
    ) -> Self {
        let mut groups: Vec<MaskGroupSpec> = Vec::new();
        for definition in &definitions {
            let Some(key) = definition.group_key() else {
                continue;
            };
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.members.push(definition.id()),
                None => groups.push(MaskGroupSpec {
                    key,
                    members: vec![definition.id()],
                }),
            }
        }

        Self {
            config,
            definitions,
            names,
            groups,
        }
    }

    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    pub fn version(&self) -> ProtocolVersion {
        self.config.protocol_version
    }

    /// First definition registered under `name`
    pub fn definition(&self, name: &str) -> Option<&MetaDefinition> {
        self.names
            .get(name)
            .and_then(|id| self.definitions.get(*id))
    }

    pub fn get(&self, handle: DefinitionHandle) -> Option<&MetaDefinition> {
        self.definitions.get(handle.id())
    }

    pub fn definitions(&self) -> &[MetaDefinition] {
        &self.definitions
    }

    /// Everything but editor-only definitions. Unsupported ones are listed
    /// too, they simply never encode.
    pub fn list_transmittable(&self) -> Vec<&MetaDefinition> {
        self.definitions
            .iter()
            .filter(|definition| definition.slot().is_transmittable())
            .collect()
    }

    pub fn mask_groups(&self) -> &[MaskGroupSpec] {
        &self.groups
    }

    pub fn mask_group(&self, key: MaskGroupKey) -> Option<&MaskGroupSpec> {
        self.groups.iter().find(|group| group.key == key)
    }

    pub(crate) fn mask_group_position(&self, key: MaskGroupKey) -> Option<usize> {
        self.groups.iter().position(|group| group.key == key)
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.definition(name)
            .map(|definition| definition.slot() != SlotIndex::Unsupported)
            .unwrap_or(false)
    }

    /// Binds hooks to the named definition, replacing any bound before
    pub fn bind_editor(&self, name: &str, hooks: EditorHooks) -> Result<(), MetaError> {
        let definition = self
            .definition(name)
            .ok_or_else(|| MetaError::not_registered(name))?;
        definition.bind_editor(hooks);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
