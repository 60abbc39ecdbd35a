use thiserror::Error;

use crate::value::{KindMismatch, MetaKind};

/// Errors surfaced by attribute registration, get/set and broadcast.
///
/// None of these are retried or logged internally, every one is returned to
/// the call site that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetaError {
    /// No definition with this name exists in the registry
    #[error("Metadata \"{name}\" not registered")]
    NotRegistered { name: String },

    /// The definition resolved to no wire slot for the active protocol version
    #[error("Metadata \"{name}\" not supported in this protocol version")]
    UnsupportedInVersion { name: String },

    /// Editor-only definitions never flow through the wire set path
    #[error("Metadata \"{name}\" is editor-only and cannot be set through the wire path")]
    EditorOnlyAttribute { name: String },

    /// Value kind does not match the definition's codec or mask form
    #[error("Metadata \"{name}\" expects a {expected} value, got {found}")]
    TypeMismatch {
        name: String,
        expected: MetaKind,
        found: MetaKind,
    },

    /// A definition with this name was already registered
    #[error("Metadata \"{name}\" registered more than once")]
    DuplicateAttribute { name: String },

    /// A lock guarding this attribute was poisoned by a panicking writer
    #[error("Lock for metadata \"{name}\" was poisoned")]
    LockPoisoned { name: String },
}

impl MetaError {
    pub(crate) fn not_registered(name: &str) -> Self {
        Self::NotRegistered {
            name: name.to_string(),
        }
    }

    pub(crate) fn type_mismatch(name: &str, mismatch: KindMismatch) -> Self {
        Self::TypeMismatch {
            name: name.to_string(),
            expected: mismatch.expected,
            found: mismatch.found,
        }
    }

    pub(crate) fn lock_poisoned(name: &str) -> Self {
        Self::LockPoisoned {
            name: name.to_string(),
        }
    }
}
