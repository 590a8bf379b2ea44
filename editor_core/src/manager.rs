//! Ownership and recycling of buffers.
//!
//! The manager owns every buffer it hands out. Callers keep a [`BufferId`]
//! and borrow the buffer through the manager, so a buffer can only go away
//! when the manager closes it.

use std::path::Path;

use crate::buffer::{Buffer, BufferKind};
use crate::config::EngineConfig;

/// Unique identifier for a buffer. Never reused within one manager.
pub type BufferId = usize;

/// Creates, tracks and recycles buffers.
#[derive(Debug)]
pub struct BufferManager {
    /// Live buffers, indexed by BufferId.
    buffers: Vec<Option<Buffer>>,
    /// Closed buffers kept for reuse, already cleared.
    pool: Vec<Buffer>,
    /// Next buffer ID to assign.
    next_id: BufferId,
    config: EngineConfig,
}

impl Default for BufferManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferManager {
    /// Creates a manager with default settings.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a manager whose buffers use `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            buffers: Vec::new(),
            pool: Vec::new(),
            next_id: 0,
            config,
        }
    }

    /// Returns the settings applied to new buffers.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Creates an empty buffer of `kind`, reusing a pooled one if available.
    pub fn allocate(&mut self, kind: BufferKind) -> BufferId {
        let id = self.next_id;
        self.next_id += 1;

        let buffer = match self.pool.pop() {
            Some(mut buffer) => {
                buffer.recycle(id, kind);
                log::debug!("buffer {}: reused from pool ({:?})", id, kind);
                buffer
            }
            None => {
                log::debug!("buffer {}: allocated ({:?})", id, kind);
                Buffer::with_config(id, kind, &self.config)
            }
        };

        if id >= self.buffers.len() {
            self.buffers.resize_with(id + 1, || None);
        }
        self.buffers[id] = Some(buffer);
        id
    }

    /// Returns a reference to a managed buffer.
    pub fn get(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(id).and_then(|opt| opt.as_ref())
    }

    /// Returns a mutable reference to a managed buffer.
    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut Buffer> {
        self.buffers.get_mut(id).and_then(|opt| opt.as_mut())
    }

    /// Returns true if `id` refers to a live buffer.
    pub fn is_managed(&self, id: BufferId) -> bool {
        self.get(id).is_some()
    }

    /// Closes a buffer. Its storage goes back to the pool while there is room.
    ///
    /// Returns false if `id` is not managed.
    pub fn request_close(&mut self, id: BufferId) -> bool {
        let Some(mut buffer) = self.buffers.get_mut(id).and_then(Option::take) else {
            return false;
        };

        if self.pool.len() < self.config.pool_limit {
            buffer.clear();
            self.pool.push(buffer);
            log::debug!("buffer {}: closed, recycled into pool", id);
        } else {
            log::debug!("buffer {}: closed, pool full", id);
        }
        true
    }

    /// Returns the number of live buffers.
    pub fn len(&self) -> usize {
        self.buffers.iter().filter(|b| b.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buffers waiting in the pool.
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    /// Returns the IDs of all live buffers in creation order.
    pub fn ids(&self) -> impl Iterator<Item = BufferId> + '_ {
        self.buffers
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_some())
            .map(|(id, _)| id)
    }

    /// Finds a live buffer by its file path.
    pub fn find_by_path(&self, path: &Path) -> Option<BufferId> {
        self.ids()
            .find(|&id| self.get(id).and_then(Buffer::file_path) == Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager() {
        let manager = BufferManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.pooled(), 0);
    }

    #[test]
    fn test_allocate() {
        let mut manager = BufferManager::new();
        let a = manager.allocate(BufferKind::Text);
        let b = manager.allocate(BufferKind::SingleLine);

        assert_ne!(a, b);
        assert_eq!(manager.len(), 2);
        assert!(manager.is_managed(a));
        assert_eq!(manager.get(b).map(Buffer::kind), Some(BufferKind::SingleLine));
        assert_eq!(manager.get(a).map(|buf| buf.cursor().buffer_id), Some(a));
    }

    #[test]
    fn test_close_recycles() {
        let mut manager = BufferManager::new();
        let id = manager.allocate(BufferKind::Text);
        manager.get_mut(id).unwrap().insert_str("some text\nmore");

        assert!(manager.request_close(id));
        assert!(!manager.is_managed(id));
        assert!(manager.get(id).is_none());
        assert_eq!(manager.pooled(), 1);
        assert!(!manager.request_close(id));

        let reused = manager.allocate(BufferKind::Text);
        assert_ne!(reused, id);
        assert_eq!(manager.pooled(), 0);
        let buffer = manager.get(reused).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.id(), reused);
        assert_eq!(buffer.cursor().buffer_id, reused);
        assert_eq!(buffer.lines_count(), 1);
    }

    #[test]
    fn test_recycled_buffer_takes_new_kind() {
        let mut manager = BufferManager::new();
        let id = manager.allocate(BufferKind::SingleLine);
        manager.request_close(id);

        let id = manager.allocate(BufferKind::Text);
        let buffer = manager.get_mut(id).unwrap();
        assert!(buffer.has_meta_data());
        buffer.insert_str("x\ny");
        assert!(buffer.set_bookmark());
    }

    #[test]
    fn test_pool_limit() {
        let config = EngineConfig {
            pool_limit: 1,
            ..EngineConfig::default()
        };
        let mut manager = BufferManager::with_config(config);
        let a = manager.allocate(BufferKind::Text);
        let b = manager.allocate(BufferKind::Text);
        manager.request_close(a);
        manager.request_close(b);
        assert_eq!(manager.pooled(), 1);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_find_by_path_and_ids() {
        let mut manager = BufferManager::new();
        let a = manager.allocate(BufferKind::Text);
        let b = manager.allocate(BufferKind::Text);
        let c = manager.allocate(BufferKind::Text);
        manager.get_mut(b).unwrap().set_file_path("/src/lib.rs");
        manager.request_close(a);

        assert_eq!(manager.ids().collect::<Vec<_>>(), vec![b, c]);
        assert_eq!(manager.find_by_path(Path::new("/src/lib.rs")), Some(b));
        assert_eq!(manager.find_by_path(Path::new("/src/main.rs")), None);
    }
}
