//! Interactive tooling callbacks attached to definitions. Nothing here is
//! consulted when encoding or broadcasting.

use std::{fmt, sync::Arc};

use crate::{instance::MetaInstance, registry::MetaDefinition, types::ViewerKey};

pub type EditorAction = Arc<dyn Fn(ViewerKey, &MetaInstance, &MetaDefinition) + Send + Sync>;
pub type EditorDisplay =
    Arc<dyn Fn(ViewerKey, &MetaInstance, &MetaDefinition) -> String + Send + Sync>;

/// One set of reset/modify/display callbacks
#[derive(Clone)]
pub struct EditorHooks {
    editable: bool,
    on_reset: Option<EditorAction>,
    on_modify: Option<EditorAction>,
    on_display: Option<EditorDisplay>,
}

impl EditorHooks {
    pub fn new() -> Self {
        Self {
            editable: true,
            on_reset: None,
            on_modify: None,
            on_display: None,
        }
    }

    pub fn can_edit(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn reset<F>(mut self, on_reset: F) -> Self
    where
        F: Fn(ViewerKey, &MetaInstance, &MetaDefinition) + Send + Sync + 'static,
    {
        self.on_reset = Some(Arc::new(on_reset));
        self
    }

    pub fn modify<F>(mut self, on_modify: F) -> Self
    where
        F: Fn(ViewerKey, &MetaInstance, &MetaDefinition) + Send + Sync + 'static,
    {
        self.on_modify = Some(Arc::new(on_modify));
        self
    }

    pub fn display<F>(mut self, on_display: F) -> Self
    where
        F: Fn(ViewerKey, &MetaInstance, &MetaDefinition) -> String + Send + Sync + 'static,
    {
        self.on_display = Some(Arc::new(on_display));
        self
    }

    /// Copies the callbacks of `other`, keeping this set's `editable` flag
    pub fn copy_from(mut self, other: &EditorHooks) -> Self {
        self.on_reset = other.on_reset.clone();
        self.on_modify = other.on_modify.clone();
        self.on_display = other.on_display.clone();
        self
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn on_reset(&self) -> Option<&EditorAction> {
        self.on_reset.as_ref()
    }

    pub fn on_modify(&self) -> Option<&EditorAction> {
        self.on_modify.as_ref()
    }

    pub fn on_display(&self) -> Option<&EditorDisplay> {
        self.on_display.as_ref()
    }
}

impl Default for EditorHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorHooks")
            .field("editable", &self.editable)
            .field("on_reset", &self.on_reset.is_some())
            .field("on_modify", &self.on_modify.is_some())
            .field("on_display", &self.on_display.is_some())
            .finish()
    }
}

/// Hook state of a definition
#[derive(Clone, Debug, Default)]
pub enum EditorHook {
    #[default]
    Unbound,
    Bound(EditorHooks),
}

impl EditorHook {
    pub fn hooks(&self) -> Option<&EditorHooks> {
        match self {
            EditorHook::Unbound => None,
            EditorHook::Bound(hooks) => Some(hooks),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, EditorHook::Bound(_))
    }
}
