//! Entry accessor: the identity queries the bridge exposes to handler
//! modules, composed from path resolution and a status lease.

use crate::cache::{CacheManager, EntryKind, SYNC_NEED_CALLBACK, SYNC_NEED_STATUS, StatusLease};
use crate::error::{Error, Result};

const ACCESSOR_SYNC_NEEDS: u32 = SYNC_NEED_CALLBACK | SYNC_NEED_STATUS;

/// Resolve `share` + `path` to the owning (cell, volume) pair.
pub fn path_to_volume_id(cache: &dyn CacheManager, share: &str, path: &str) -> Result<(u32, u32)> {
    let entry = cache.resolve_path(share, path)?;
    let lease = StatusLease::acquire(cache, &entry, ACCESSOR_SYNC_NEEDS)?;
    let id = lease.state().id;
    Ok((id.cell, id.volume))
}

/// Resolve `share` + `path` to its DFS redirection target.
///
/// Query-then-fill: with `buffer` absent, returns the required length (target
/// bytes plus NUL terminator) without writing anything. With a buffer of at
/// least that capacity, writes the target plus terminator and returns the
/// written length. A short buffer fails with [`Error::TooBig`] and is left
/// untouched.
pub fn path_to_dfs_target(
    cache: &dyn CacheManager,
    share: &str,
    path: &str,
    buffer: Option<&mut [u8]>,
) -> Result<usize> {
    let entry = cache.resolve_path(share, path)?;
    let lease = StatusLease::acquire(cache, &entry, ACCESSOR_SYNC_NEEDS)?;
    let state = lease.state();
    if state.kind != EntryKind::DfsLink {
        return Err(Error::not_a_dfs_link(share, path));
    }

    let target = state.dfs_target.as_deref().unwrap_or_default();
    let needed = target.len() + 1;
    let Some(buffer) = buffer else {
        return Ok(needed);
    };
    if buffer.len() < needed {
        return Err(Error::TooBig {
            needed,
            capacity: buffer.len(),
        });
    }
    buffer[..target.len()].copy_from_slice(target.as_bytes());
    buffer[target.len()] = 0;
    Ok(needed)
}

#[cfg(test)]
#[path = "tests/accessor_tests.rs"]
mod tests;
