use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::cache::{CacheEntry, CacheManager, EntryKind, EntryState, FileId};
use crate::error::{Error, Result};

pub(crate) fn file_entry(cell: u32, volume: u32) -> Arc<CacheEntry> {
    Arc::new(CacheEntry::new(EntryState {
        id: FileId {
            cell,
            volume,
            vnode: 1,
            unique: 1,
        },
        kind: EntryKind::File,
        dfs_target: None,
    }))
}

pub(crate) fn dfs_link_entry(cell: u32, volume: u32, target: &str) -> Arc<CacheEntry> {
    Arc::new(CacheEntry::new(EntryState {
        id: FileId {
            cell,
            volume,
            vnode: 1,
            unique: 1,
        },
        kind: EntryKind::DfsLink,
        dfs_target: Some(target.to_string()),
    }))
}

/// Scriptable cache manager: one entry, switchable failure injection, call
/// counters for leak and fencing assertions.
pub(crate) struct MockCacheManager {
    pub(crate) entry: Arc<CacheEntry>,
    pub(crate) fail_resolve: AtomicBool,
    pub(crate) fail_sync: AtomicBool,
    pub(crate) resolve_calls: AtomicUsize,
    pub(crate) sync_calls: AtomicUsize,
    pub(crate) sync_done_calls: AtomicUsize,
}

impl MockCacheManager {
    pub(crate) fn new(entry: Arc<CacheEntry>) -> Self {
        Self {
            entry,
            fail_resolve: AtomicBool::new(false),
            fail_sync: AtomicBool::new(false),
            resolve_calls: AtomicUsize::new(0),
            sync_calls: AtomicUsize::new(0),
            sync_done_calls: AtomicUsize::new(0),
        }
    }
}

impl CacheManager for MockCacheManager {
    fn resolve_path(&self, share: &str, path: &str) -> Result<Arc<CacheEntry>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(Error::not_found(share, path, "no such entry"));
        }
        Ok(Arc::clone(&self.entry))
    }

    fn sync_entry(&self, _entry: &CacheEntry, _state: &mut EntryState, _needs: u32) -> Result<()> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_sync.load(Ordering::SeqCst) {
            return Err(Error::sync("status fetch failed"));
        }
        Ok(())
    }

    fn sync_done(&self, _entry: &CacheEntry, _state: &mut EntryState, _needs: u32) {
        self.sync_done_calls.fetch_add(1, Ordering::SeqCst);
    }
}
