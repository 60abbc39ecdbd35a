use std::{collections::HashMap, fmt, sync::Arc};

use crate::value::MetaKind;

use super::{BuiltinCodec, MetaCodec};

/// Maps each semantic value kind to the codec that puts it on the wire.
/// Kinds absent from the table have no wire form.
#[derive(Clone)]
pub struct CodecTable {
    codecs: HashMap<MetaKind, Arc<dyn MetaCodec>>,
}

impl CodecTable {
    /// A table with no codecs at all
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Adds or replaces the codec for its kind, returning the previous one
    pub fn insert(&mut self, codec: Arc<dyn MetaCodec>) -> Option<Arc<dyn MetaCodec>> {
        self.codecs.insert(codec.kind(), codec)
    }

    pub fn with(mut self, codec: Arc<dyn MetaCodec>) -> Self {
        self.insert(codec);
        self
    }

    pub fn remove(&mut self, kind: MetaKind) -> Option<Arc<dyn MetaCodec>> {
        self.codecs.remove(&kind)
    }

    pub fn get(&self, kind: MetaKind) -> Option<Arc<dyn MetaCodec>> {
        self.codecs.get(&kind).cloned()
    }

    pub fn contains(&self, kind: MetaKind) -> bool {
        self.codecs.contains_key(&kind)
    }

    /// Reverse lookup used when reading batches back
    pub fn by_serializer(&self, serializer: i32) -> Option<Arc<dyn MetaCodec>> {
        self.codecs
            .values()
            .find(|codec| codec.serializer() == serializer)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for CodecTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for codec in BuiltinCodec::defaults() {
            table.insert(Arc::new(codec));
        }
        table
    }
}

impl fmt::Debug for CodecTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .codecs
            .iter()
            .map(|(kind, codec)| (*kind, codec.serializer()))
            .collect();
        kinds.sort();
        f.debug_struct("CodecTable").field("codecs", &kinds).finish()
    }
}
