//! Interface to the cache manager's status cache.
//!
//! The namespace walker and the status synchronizer live elsewhere in the
//! client; this module defines the contract the bridge composes them through,
//! plus the scoped lease that brackets every read of an entry's identity
//! fields.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// Ensure the entry holds a valid server callback before the read.
pub const SYNC_NEED_CALLBACK: u32 = 1 << 0;
/// Ensure the entry's status fields are populated before the read.
pub const SYNC_NEED_STATUS: u32 = 1 << 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub cell: u32,
    pub volume: u32,
    pub vnode: u32,
    pub unique: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    SymbolicLink,
    MountPoint,
    DfsLink,
}

#[derive(Debug, Clone)]
pub struct EntryState {
    pub id: FileId,
    pub kind: EntryKind,
    /// Redirection target; meaningful only when `kind` is
    /// [`EntryKind::DfsLink`].
    pub dfs_target: Option<String>,
}

/// In-memory record for one cached filesystem object.
///
/// Entries are shared (`Arc`) between the namespace walker, invalidation
/// machinery, and transient readers like the entry accessor; the state lock
/// is the entry's mutual-exclusion guard.
#[derive(Debug)]
pub struct CacheEntry {
    state: Mutex<EntryState>,
}

impl CacheEntry {
    pub fn new(state: EntryState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, EntryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The cache manager as seen from the volume-status bridge: path resolution
/// plus the status synchronization primitive.
pub trait CacheManager: Send + Sync {
    /// Resolve `share` + `path` to a cache entry, following intermediate
    /// mount points and symlinks. The returned `Arc` is the caller's
    /// reference on the entry.
    fn resolve_path(&self, share: &str, path: &str) -> Result<Arc<CacheEntry>>;

    /// Bring the entry's callback/status metadata up to date per `needs`
    /// (`SYNC_NEED_*` bits). Called with the entry's state lock held; may
    /// block for an unbounded time on network I/O.
    fn sync_entry(&self, entry: &CacheEntry, state: &mut EntryState, needs: u32) -> Result<()>;

    /// Close out a successful `sync_entry`, unblocking invalidations that
    /// queued up behind it.
    fn sync_done(&self, entry: &CacheEntry, state: &mut EntryState, needs: u32);
}

/// Scoped read lease on a cache entry: state lock plus status
/// synchronization, acquired as lock → sync → sync-done and released on drop.
///
/// Identity fields must only be read through a lease, and nothing borrowed
/// from the lease may outlive it. A failed sync releases the lock before the
/// error propagates.
pub struct StatusLease<'a> {
    state: MutexGuard<'a, EntryState>,
}

impl<'a> StatusLease<'a> {
    pub fn acquire(
        cache: &dyn CacheManager,
        entry: &'a CacheEntry,
        needs: u32,
    ) -> Result<StatusLease<'a>> {
        let mut state = entry.lock();
        cache.sync_entry(entry, &mut state, needs)?;
        cache.sync_done(entry, &mut state, needs);
        Ok(Self { state })
    }

    pub fn state(&self) -> &EntryState {
        &self.state
    }
}
