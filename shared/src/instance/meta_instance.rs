use std::{collections::HashMap, sync::Arc};

use log::trace;

use crate::{
    entry::MetaEntry,
    error::MetaError,
    registry::{DefinitionForm, MetaDefinition, MetaRegistry},
    store::{MaskGroup, MetaStore},
    types::{SlotIndex, ViewerKey},
    value::{KindMismatch, MetaKind, MetaValue},
};

use super::broadcast::{MetaEntity, ViewerTransport};

/// Metadata of one live entity: its store, seeded from the shared registry,
/// and the wiring that pushes every write out to the entity's viewers.
pub struct MetaInstance {
    registry: Arc<MetaRegistry>,
    store: MetaStore,
    entity: Arc<dyn MetaEntity>,
    transport: Arc<dyn ViewerTransport>,
}

impl MetaInstance {
    pub fn new(
        registry: Arc<MetaRegistry>,
        entity: Arc<dyn MetaEntity>,
        transport: Arc<dyn ViewerTransport>,
    ) -> Self {
        let store = MetaStore::new(&registry);
        Self {
            registry,
            store,
            entity,
            transport,
        }
    }

    pub fn registry(&self) -> &Arc<MetaRegistry> {
        &self.registry
    }

    pub fn store(&self) -> &MetaStore {
        &self.store
    }

    pub fn entity_index(&self) -> i32 {
        self.entity.index()
    }

    // Get / Set

    /// Stores `value` and immediately broadcasts the affected entry. Once this
    /// returns, viewers have been handed the written value.
    pub fn set(&self, name: &str, value: impl Into<MetaValue>) -> Result<(), MetaError> {
        let value = value.into();
        let definition = self.supported_definition(name)?;
        let SlotIndex::Wire(slot) = definition.slot() else {
            return Err(MetaError::EditorOnlyAttribute {
                name: name.to_string(),
            });
        };

        match definition.form() {
            DefinitionForm::Masked { .. } => {
                let MetaValue::Boolean(flag) = value else {
                    return Err(MetaError::type_mismatch(
                        name,
                        KindMismatch::new(MetaKind::Boolean, value.kind()),
                    ));
                };
                let position = self
                    .store
                    .group_position(definition.id())
                    .ok_or_else(|| MetaError::not_registered(name))?;
                let mut group = self.store.lock_group(position, name)?;
                group.set(definition.id(), flag);
                if let Some(entry) = self.encode_group(definition, &group)? {
                    self.deliver(&[entry]);
                }
                Ok(())
            }
            DefinitionForm::Natural => {
                let Some(codec) = definition.codec() else {
                    return Err(MetaError::UnsupportedInVersion {
                        name: name.to_string(),
                    });
                };
                codec
                    .normalize(&value)
                    .map_err(|mismatch| MetaError::type_mismatch(name, mismatch))?;

                let mut cell = self.store.write_value(definition.id(), name)?;
                *cell = value;
                let entry = codec
                    .encode(slot, &cell)
                    .map_err(|mismatch| MetaError::type_mismatch(name, mismatch))?;
                self.deliver(&[entry]);
                Ok(())
            }
        }
    }

    /// Masked definitions answer with their stored flag, natural ones with the
    /// codec's canonical form of the stored value.
    pub fn get(&self, name: &str) -> Result<MetaValue, MetaError> {
        let definition = self.supported_definition(name)?;

        if let Some(position) = self.store.group_position(definition.id()) {
            let group = self.store.lock_group(position, name)?;
            return group
                .get(definition.id())
                .map(MetaValue::Boolean)
                .ok_or_else(|| MetaError::not_registered(name));
        }

        let raw = self.store.read_value(definition.id(), name)?.clone();
        match definition.codec() {
            Some(codec) => codec
                .normalize(&raw)
                .map_err(|mismatch| MetaError::type_mismatch(name, mismatch)),
            None => Ok(raw),
        }
    }

    pub fn get_as<T>(&self, name: &str) -> Result<T, MetaError>
    where
        T: TryFrom<MetaValue, Error = KindMismatch>,
    {
        let value = self.get(name)?;
        T::try_from(value).map_err(|mismatch| MetaError::type_mismatch(name, mismatch))
    }

    /// Sets the attribute back to its registered default
    pub fn reset(&self, name: &str) -> Result<(), MetaError> {
        let default = self.definition(name)?.default_value().clone();
        self.set(name, default)
    }

    /// Writes straight into the store, skipping version checks and broadcast.
    /// Meant for editor hooks, including on editor-only attributes.
    pub fn put_raw(&self, name: &str, value: impl Into<MetaValue>) -> Result<(), MetaError> {
        let definition = self.definition(name)?;
        self.store.put_raw(definition, value.into())
    }

    /// Every encodable attribute in registration order. Masked groups appear
    /// once, at the position of their first member.
    pub fn collect_all(&self) -> Result<Vec<MetaEntry>, MetaError> {
        let mut entries = Vec::new();
        for definition in self.registry.definitions() {
            if definition.slot().wire().is_none() {
                continue;
            }
            if let Some(key) = definition.group_key() {
                let leader = self
                    .registry
                    .mask_group(key)
                    .and_then(|group| group.leader());
                if leader != Some(definition.id()) {
                    continue;
                }
            }
            if let Some(entry) = self.encode_definition(definition)? {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    // Broadcast

    /// Re-sends one attribute, or its whole mask group
    pub fn broadcast_one(&self, name: &str) -> Result<(), MetaError> {
        let definition = self.supported_definition(name)?;
        if definition.slot() == SlotIndex::EditorOnly {
            return Err(MetaError::EditorOnlyAttribute {
                name: name.to_string(),
            });
        }
        if let Some(entry) = self.encode_definition(definition)? {
            self.deliver(&[entry]);
        }
        Ok(())
    }

    /// Full resync to every current viewer
    pub fn broadcast_all(&self) -> Result<(), MetaError> {
        let entries = self.collect_all()?;
        self.deliver(&entries);
        Ok(())
    }

    /// Full snapshot to the given viewers only, e.g. one that just started
    /// viewing the entity
    pub fn broadcast_to(&self, viewers: &[ViewerKey]) -> Result<(), MetaError> {
        let entries = self.collect_all()?;
        self.deliver_to(viewers, &entries);
        Ok(())
    }

    fn deliver(&self, entries: &[MetaEntry]) {
        if entries.is_empty() {
            return;
        }
        let viewers = self.entity.current_viewers();
        self.deliver_to(&viewers, entries);
    }

    fn deliver_to(&self, viewers: &[ViewerKey], entries: &[MetaEntry]) {
        let entity_index = self.entity.index();
        if viewers.is_empty() || entries.is_empty() {
            trace!("MetaInstance: nothing to deliver for entity {}", entity_index);
            return;
        }
        trace!(
            "MetaInstance: delivering {} entries of entity {} to {} viewers",
            entries.len(),
            entity_index,
            viewers.len()
        );
        self.transport.deliver(viewers, entity_index, entries);
    }

    // Encoding

    fn encode_definition(&self, definition: &MetaDefinition) -> Result<Option<MetaEntry>, MetaError> {
        let SlotIndex::Wire(slot) = definition.slot() else {
            return Ok(None);
        };
        let name = definition.name();

        if let Some(position) = self.store.group_position(definition.id()) {
            let group = self.store.lock_group(position, name)?;
            return self.encode_group(definition, &group);
        }

        let Some(codec) = definition.codec() else {
            return Ok(None);
        };
        let cell = self.store.read_value(definition.id(), name)?;
        codec
            .encode(slot, &cell)
            .map(Some)
            .map_err(|mismatch| MetaError::type_mismatch(name, mismatch))
    }

    fn encode_group(
        &self,
        definition: &MetaDefinition,
        group: &MaskGroup,
    ) -> Result<Option<MetaEntry>, MetaError> {
        let Some(codec) = definition.codec() else {
            return Ok(None);
        };
        let bits = MetaValue::Byte(group.bits() as i8);
        codec
            .encode(group.key().slot(), &bits)
            .map(Some)
            .map_err(|mismatch| MetaError::type_mismatch(definition.name(), mismatch))
    }

    // Lookup

    fn definition(&self, name: &str) -> Result<&MetaDefinition, MetaError> {
        self.registry
            .definition(name)
            .ok_or_else(|| MetaError::not_registered(name))
    }

    fn supported_definition(&self, name: &str) -> Result<&MetaDefinition, MetaError> {
        let definition = self.definition(name)?;
        if definition.slot() == SlotIndex::Unsupported {
            return Err(MetaError::UnsupportedInVersion {
                name: name.to_string(),
            });
        }
        Ok(definition)
    }

    // Tags

    pub fn set_tag(&self, key: &str, value: &str) {
        self.store.set_tag(key, value);
    }

    pub fn tag(&self, key: &str) -> Option<String> {
        self.store.tag(key)
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.store.has_tag(key)
    }

    pub fn remove_tag(&self, key: &str) -> Option<String> {
        self.store.remove_tag(key)
    }

    pub fn tags(&self) -> HashMap<String, String> {
        self.store.tags()
    }

    // Editor

    /// Runs the bound reset hook, or falls back to restoring the default.
    /// Returns false when the bound hooks forbid editing.
    pub fn editor_reset(&self, actor: ViewerKey, name: &str) -> Result<bool, MetaError> {
        let definition = self.definition(name)?;
        let editor = definition.editor();
        if let Some(hooks) = editor.hooks() {
            if !hooks.is_editable() {
                return Ok(false);
            }
            if let Some(on_reset) = hooks.on_reset() {
                on_reset(actor, self, definition);
                return Ok(true);
            }
        }
        match definition.slot() {
            SlotIndex::EditorOnly => self
                .store
                .put_raw(definition, definition.default_value().clone())?,
            _ => self.reset(name)?,
        }
        Ok(true)
    }

    /// Runs the bound modify hook. Returns false when there is none or the
    /// hooks forbid editing.
    pub fn editor_modify(&self, actor: ViewerKey, name: &str) -> Result<bool, MetaError> {
        let definition = self.definition(name)?;
        let editor = definition.editor();
        let Some(hooks) = editor.hooks() else {
            return Ok(false);
        };
        if !hooks.is_editable() {
            return Ok(false);
        }
        let Some(on_modify) = hooks.on_modify() else {
            return Ok(false);
        };
        on_modify(actor, self, definition);
        Ok(true)
    }

    /// Text shown for the attribute in tooling: the display hook's output, or
    /// the stored value.
    pub fn editor_display(&self, actor: ViewerKey, name: &str) -> Result<String, MetaError> {
        let definition = self.definition(name)?;
        let editor = definition.editor();
        if let Some(on_display) = editor.hooks().and_then(|hooks| hooks.on_display()) {
            return Ok(on_display(actor, self, definition));
        }
        Ok(self.store.raw(definition)?.to_string())
    }
}
