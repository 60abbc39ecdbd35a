use std::{fmt, sync::Arc, sync::RwLock};

use crate::{
    codec::MetaCodec,
    editor::{EditorHook, EditorHooks},
    types::{DefinitionId, MaskGroupKey, SlotIndex},
    value::MetaValue,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefinitionForm {
    /// Holds its own value in its own slot
    Natural,
    /// One flag of a byte shared with every masked definition on the same slot
    Masked { mask: u8 },
}

impl DefinitionForm {
    pub fn is_masked(&self) -> bool {
        matches!(self, DefinitionForm::Masked { .. })
    }
}

/// Returned by registration, used to bind editor hooks later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DefinitionHandle(pub(crate) DefinitionId);

impl DefinitionHandle {
    pub fn id(&self) -> DefinitionId {
        self.0
    }
}

/// A registered attribute. Immutable once its registry is built, apart from
/// the editor hook slot.
pub struct MetaDefinition {
    id: DefinitionId,
    slot: SlotIndex,
    name: String,
    default: MetaValue,
    codec: Option<Arc<dyn MetaCodec>>,
    form: DefinitionForm,
    editor: RwLock<EditorHook>,
}

impl MetaDefinition {
    pub(crate) fn new(
        id: DefinitionId,
        slot: SlotIndex,
        name: &str,
        default: MetaValue,
        codec: Option<Arc<dyn MetaCodec>>,
        form: DefinitionForm,
        editor: EditorHook,
    ) -> Self {
        Self {
            id,
            slot,
            name: name.to_string(),
            default,
            codec,
            form,
            editor: RwLock::new(editor),
        }
    }

    pub fn id(&self) -> DefinitionId {
        self.id
    }

    pub fn handle(&self) -> DefinitionHandle {
        DefinitionHandle(self.id)
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &MetaValue {
        &self.default
    }

    pub fn codec(&self) -> Option<&Arc<dyn MetaCodec>> {
        self.codec.as_ref()
    }

    pub fn form(&self) -> DefinitionForm {
        self.form
    }

    pub fn is_masked(&self) -> bool {
        self.form.is_masked()
    }

    pub fn mask(&self) -> Option<u8> {
        match self.form {
            DefinitionForm::Masked { mask } => Some(mask),
            DefinitionForm::Natural => None,
        }
    }

    /// Only masked definitions with a wire slot belong to a group
    pub fn group_key(&self) -> Option<MaskGroupKey> {
        match (self.form, self.slot) {
            (DefinitionForm::Masked { .. }, SlotIndex::Wire(slot)) => Some(MaskGroupKey::new(slot)),
            _ => None,
        }
    }

    /// Snapshot of the hook state. Hooks are advisory, so a poisoned lock
    /// still yields the last state written.
    pub fn editor(&self) -> EditorHook {
        match self.editor.read() {
            Ok(editor) => editor.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces any hooks bound before
    pub fn bind_editor(&self, hooks: EditorHooks) {
        self.set_editor(EditorHook::Bound(hooks));
    }

    pub fn unbind_editor(&self) {
        self.set_editor(EditorHook::Unbound);
    }

    fn set_editor(&self, hook: EditorHook) {
        match self.editor.write() {
            Ok(mut editor) => *editor = hook,
            Err(poisoned) => *poisoned.into_inner() = hook,
        }
    }
}

impl fmt::Debug for MetaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaDefinition")
            .field("id", &self.id)
            .field("slot", &self.slot)
            .field("name", &self.name)
            .field("default", &self.default)
            .field("codec", &self.codec.as_ref().map(|codec| codec.kind()))
            .field("form", &self.form)
            .field("editor", &self.editor().is_bound())
            .finish()
    }
}
