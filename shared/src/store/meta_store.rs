use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    error::MetaError,
    registry::{DefinitionForm, MetaDefinition, MetaRegistry},
    types::DefinitionId,
    value::{KindMismatch, MetaKind, MetaValue},
};

use super::mask_group::MaskGroup;

enum StoreSlot {
    Value(RwLock<MetaValue>),
    Grouped(usize),
}

/// Per-instance attribute state.
///
/// Every definition gets its own lock, and every mask group one mutex, laid
/// out once from the registry. Writes to different attributes never contend
/// unless they share a mask group.
pub struct MetaStore {
    slots: Vec<StoreSlot>,
    groups: Vec<Mutex<MaskGroup>>,
    tags: RwLock<HashMap<String, String>>,
}

impl MetaStore {
    /// Seeds every attribute with its registered default
    pub fn new(registry: &MetaRegistry) -> Self {
        let mut groups: Vec<MaskGroup> = registry
            .mask_groups()
            .iter()
            .map(|group| MaskGroup::new(group.key()))
            .collect();

        let mut slots = Vec::with_capacity(registry.len());
        for definition in registry.definitions() {
            let position = definition
                .group_key()
                .and_then(|key| registry.mask_group_position(key));
            match (definition.form(), position) {
                (DefinitionForm::Masked { mask }, Some(position)) => {
                    let default = matches!(definition.default_value(), MetaValue::Boolean(true));
                    if let Some(group) = groups.get_mut(position) {
                        group.add(definition.id(), mask, default);
                    }
                    slots.push(StoreSlot::Grouped(position));
                }
                _ => slots.push(StoreSlot::Value(RwLock::new(
                    definition.default_value().clone(),
                ))),
            }
        }

        Self {
            slots,
            groups: groups.into_iter().map(Mutex::new).collect(),
            tags: RwLock::new(HashMap::new()),
        }
    }

    /// Last value written for `definition`, bypassing codec normalization
    pub fn raw(&self, definition: &MetaDefinition) -> Result<MetaValue, MetaError> {
        let name = definition.name();
        match self.slot(definition.id(), name)? {
            StoreSlot::Value(_) => Ok(self.read_value(definition.id(), name)?.clone()),
            StoreSlot::Grouped(position) => {
                let group = self.lock_group(*position, name)?;
                group
                    .get(definition.id())
                    .map(MetaValue::Boolean)
                    .ok_or_else(|| MetaError::not_registered(name))
            }
        }
    }

    /// Writes a value without version checks and without broadcasting.
    /// Masked definitions still only take booleans, and definitions bound to
    /// a codec only take values that codec accepts.
    pub fn put_raw(&self, definition: &MetaDefinition, value: MetaValue) -> Result<(), MetaError> {
        let name = definition.name();
        match self.slot(definition.id(), name)? {
            StoreSlot::Value(_) => {
                check_raw_kind(definition, &value)?;
                *self.write_value(definition.id(), name)? = value;
                Ok(())
            }
            StoreSlot::Grouped(position) => {
                let MetaValue::Boolean(flag) = value else {
                    return Err(MetaError::type_mismatch(
                        name,
                        KindMismatch::new(MetaKind::Boolean, value.kind()),
                    ));
                };
                let mut group = self.lock_group(*position, name)?;
                group.set(definition.id(), flag);
                Ok(())
            }
        }
    }

    // Tags

    pub fn set_tag(&self, key: &str, value: &str) {
        let mut tags = match self.tags.write() {
            Ok(tags) => tags,
            Err(poisoned) => poisoned.into_inner(),
        };
        tags.insert(key.to_string(), value.to_string());
    }

    pub fn tag(&self, key: &str) -> Option<String> {
        self.read_tags().get(key).cloned()
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.read_tags().contains_key(key)
    }

    pub fn remove_tag(&self, key: &str) -> Option<String> {
        let mut tags = match self.tags.write() {
            Ok(tags) => tags,
            Err(poisoned) => poisoned.into_inner(),
        };
        tags.remove(key)
    }

    /// Snapshot of every tag
    pub fn tags(&self) -> HashMap<String, String> {
        self.read_tags().clone()
    }

    fn read_tags(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        match self.tags.read() {
            Ok(tags) => tags,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // Locks

    fn slot(&self, id: DefinitionId, name: &str) -> Result<&StoreSlot, MetaError> {
        self.slots
            .get(id)
            .ok_or_else(|| MetaError::not_registered(name))
    }

    pub(crate) fn group_position(&self, id: DefinitionId) -> Option<usize> {
        match self.slots.get(id)? {
            StoreSlot::Grouped(position) => Some(*position),
            StoreSlot::Value(_) => None,
        }
    }

    pub(crate) fn read_value(
        &self,
        id: DefinitionId,
        name: &str,
    ) -> Result<RwLockReadGuard<'_, MetaValue>, MetaError> {
        let StoreSlot::Value(cell) = self.slot(id, name)? else {
            return Err(MetaError::not_registered(name));
        };
        cell.read().map_err(|_| MetaError::lock_poisoned(name))
    }

    pub(crate) fn write_value(
        &self,
        id: DefinitionId,
        name: &str,
    ) -> Result<RwLockWriteGuard<'_, MetaValue>, MetaError> {
        let StoreSlot::Value(cell) = self.slot(id, name)? else {
            return Err(MetaError::not_registered(name));
        };
        cell.write().map_err(|_| MetaError::lock_poisoned(name))
    }

    pub(crate) fn lock_group(
        &self,
        position: usize,
        name: &str,
    ) -> Result<MutexGuard<'_, MaskGroup>, MetaError> {
        let group = self
            .groups
            .get(position)
            .ok_or_else(|| MetaError::not_registered(name))?;
        group.lock().map_err(|_| MetaError::lock_poisoned(name))
    }
}

// Masked cells hold booleans even on unsupported slots; natural cells must fit
// their codec. Editor-only cells have no codec and take anything.
fn check_raw_kind(definition: &MetaDefinition, value: &MetaValue) -> Result<(), MetaError> {
    let name = definition.name();
    if definition.is_masked() {
        return match value {
            MetaValue::Boolean(_) => Ok(()),
            other => Err(MetaError::type_mismatch(
                name,
                KindMismatch::new(MetaKind::Boolean, other.kind()),
            )),
        };
    }
    match definition.codec() {
        Some(codec) => codec
            .normalize(value)
            .map(|_| ())
            .map_err(|mismatch| MetaError::type_mismatch(name, mismatch)),
        None => Ok(()),
    }
}
