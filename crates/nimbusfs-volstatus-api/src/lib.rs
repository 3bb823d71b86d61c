use core::ffi::c_void;

// Single in-development ABI version per table (early-stage project).
// Host and handler modules are built and shipped independently; negotiation
// requires exact equality in both directions, never partial compatibility.
pub const VOLSTATUS_HOST_TABLE_VERSION: u32 = 1;
pub const VOLSTATUS_PLUGIN_TABLE_VERSION: u32 = 1;
pub const VOLSTATUS_ENTRY_SYMBOL: &str = "nimbusfs_volstatus_negotiate";

// Status codes (non-exhaustive). Handlers may report other non-zero codes,
// which the host forwards unchanged.
pub const VS_ERR_INVALID_ARG: i32 = 1;
pub const VS_ERR_NOT_FOUND: i32 = 2;
pub const VS_ERR_NOT_A_DFS_LINK: i32 = 3;
pub const VS_ERR_TOO_BIG: i32 = 4;
pub const VS_ERR_SYNC: i32 = 5;
pub const VS_ERR_VERSION: i32 = 6;
pub const VS_ERR_INTERNAL: i32 = 7;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsLogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

/// State of one cell.volume pair as reported to handler modules.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsVolumeState {
    Online = 0,
    Busy = 1,
    Offline = 2,
    AllDown = 3,
    Unknown = 4,
}

/// Immutable UTF-8 bytes. Not NUL-terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VsStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl VsStr {
    pub const fn empty() -> Self {
        Self {
            ptr: core::ptr::null(),
            len: 0,
        }
    }
}

// Immutable byte view used across FFI boundaries. Callers are responsible for lifetime validity.
unsafe impl Send for VsStr {}
unsafe impl Sync for VsStr {}

/// Function table the cache manager hands to a handler module at negotiation.
///
/// Built once, boxed by the host, and kept alive for as long as the module is
/// loaded. `user_data` must be passed back verbatim on every call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VsHostVTable {
    pub version: u32,
    pub user_data: *mut c_void,
    /// Resolve `share` + `path` to the owning (cell, volume) pair.
    /// Both output pointers must be non-null.
    pub path_to_volume_id: Option<
        extern "C" fn(
            user_data: *mut c_void,
            share: VsStr,
            path: VsStr,
            out_cell: *mut u32,
            out_volume: *mut u32,
        ) -> i32,
    >,
    /// Resolve `share` + `path` to a DFS redirection target.
    ///
    /// Query-then-fill: `len` carries the buffer capacity in and the required
    /// length (target bytes plus NUL terminator) out. A null `buffer` with
    /// `*len == 0` queries the required length without writing anything.
    pub path_to_dfs_target: Option<
        extern "C" fn(
            user_data: *mut c_void,
            share: VsStr,
            path: VsStr,
            len: *mut usize,
            buffer: *mut u8,
        ) -> i32,
    >,
    /// Route a handler log line into the host's log stream.
    pub log: Option<extern "C" fn(user_data: *mut c_void, level: VsLogLevel, msg: VsStr)>,
}

// Raw pointers make this not auto-Send/Sync. The table is treated as immutable
// after negotiation and requires `user_data` to be thread-safe when used across
// threads.
unsafe impl Send for VsHostVTable {}
unsafe impl Sync for VsHostVTable {}

/// Function table a handler module fills in during negotiation.
///
/// Entries are nullable at the ABI so the host can validate completeness; a
/// table with any missing entry is a negotiation failure, so on an active
/// handler every entry is present.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VsPluginVTable {
    pub version: u32,
    pub service_started: Option<extern "C" fn() -> i32>,
    pub service_stopped: Option<extern "C" fn() -> i32>,
    /// Endpoint names for 32-bit and 64-bit peer addressing. Hosts without a
    /// distinct 64-bit name pass the same name in both slots.
    pub network_started: Option<extern "C" fn(primary: VsStr, secondary: VsStr) -> i32>,
    pub network_stopped: Option<extern "C" fn(primary: VsStr, secondary: VsStr) -> i32>,
    pub network_address_changed: Option<extern "C" fn() -> i32>,
    pub volume_status_changed:
        Option<extern "C" fn(cell_id: u32, volume_id: u32, state: VsVolumeState) -> i32>,
}

impl VsPluginVTable {
    /// All-null table for the negotiation out-parameter. `version` 0 never
    /// matches [`VOLSTATUS_PLUGIN_TABLE_VERSION`], so an entry point that
    /// returns without writing the table fails the version check.
    pub const fn empty() -> Self {
        Self {
            version: 0,
            service_started: None,
            service_stopped: None,
            network_started: None,
            network_stopped: None,
            network_address_changed: None,
            volume_status_changed: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.service_started.is_some()
            && self.service_stopped.is_some()
            && self.network_started.is_some()
            && self.network_stopped.is_some()
            && self.network_address_changed.is_some()
            && self.volume_status_changed.is_some()
    }
}

/// Signature of the exported negotiation entry point
/// ([`VOLSTATUS_ENTRY_SYMBOL`]).
///
/// The module writes its table through `out_plugin` and returns 0 on success;
/// any non-zero return is a negotiation failure and the host unloads the
/// module.
pub type VsNegotiateFn =
    unsafe extern "C" fn(out_plugin: *mut VsPluginVTable, host: *const VsHostVTable) -> i32;
