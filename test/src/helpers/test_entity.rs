use std::sync::Mutex;

use metasync_shared::{MetaEntity, ViewerKey};

/// Entity whose viewer set is driven by the test
pub struct TestEntity {
    index: i32,
    viewers: Mutex<Vec<ViewerKey>>,
}

impl TestEntity {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            viewers: Mutex::new(Vec::new()),
        }
    }

    pub fn with_viewers(index: i32, viewers: &[ViewerKey]) -> Self {
        Self {
            index,
            viewers: Mutex::new(viewers.to_vec()),
        }
    }

    pub fn add_viewer(&self, viewer: ViewerKey) {
        let mut viewers = self.viewers.lock().unwrap();
        if !viewers.contains(&viewer) {
            viewers.push(viewer);
        }
    }

    pub fn remove_viewer(&self, viewer: ViewerKey) {
        self.viewers.lock().unwrap().retain(|key| *key != viewer);
    }
}

impl MetaEntity for TestEntity {
    fn index(&self) -> i32 {
        self.index
    }

    fn current_viewers(&self) -> Vec<ViewerKey> {
        self.viewers.lock().unwrap().clone()
    }
}
