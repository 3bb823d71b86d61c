mod accessor;
mod bridge;
mod cache;
mod config;
mod error;
mod host;
mod loader;

pub use accessor::{path_to_dfs_target, path_to_volume_id};
pub use bridge::{NetworkStatus, VolStatusBridge};
pub use cache::{
    CacheEntry, CacheManager, EntryKind, EntryState, FileId, SYNC_NEED_CALLBACK, SYNC_NEED_STATUS,
    StatusLease,
};
pub use config::{VolStatusConfig, read_config};
pub use error::{Error, Result};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
