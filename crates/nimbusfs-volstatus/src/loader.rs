//! Loading and negotiation of the optional volume-status handler module.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use libloading::{Library, Symbol};
use nimbusfs_volstatus_api::{
    VOLSTATUS_ENTRY_SYMBOL, VOLSTATUS_PLUGIN_TABLE_VERSION, VsHostVTable, VsNegotiateFn,
    VsPluginVTable, VsStr, VsVolumeState,
};

use crate::cache::CacheManager;
use crate::host::{self, HostCtx};

/// Everything that must stay alive together while a handler module is
/// loaded: the library handle plus the host table and context the module
/// holds pointers into. Dropped as a unit on finalize.
struct ModuleResources {
    _lib: Library,
    _host_vtable: Box<VsHostVTable>,
    _host_ctx: Box<HostCtx>,
}

/// A negotiated, active handler module. The table was version-checked and is
/// fully populated; it is immutable from here on and safe to call from any
/// thread.
pub(crate) struct ActivePlugin {
    pub(crate) library_path: PathBuf,
    table: VsPluginVTable,
    _resources: Option<ModuleResources>,
}

impl ActivePlugin {
    /// Table-only instance for exercising the relay without a real module.
    #[cfg(test)]
    pub(crate) fn from_table(table: VsPluginVTable) -> Self {
        Self {
            library_path: PathBuf::new(),
            table,
            _resources: None,
        }
    }

    pub(crate) fn service_started(&self) -> i32 {
        self.table.service_started.map(|f| f()).unwrap_or(0)
    }

    pub(crate) fn service_stopped(&self) -> i32 {
        self.table.service_stopped.map(|f| f()).unwrap_or(0)
    }

    pub(crate) fn network_started(&self, primary: &str, secondary: &str) -> i32 {
        match self.table.network_started {
            Some(f) => f(borrowed_vsstr(primary), borrowed_vsstr(secondary)),
            None => 0,
        }
    }

    pub(crate) fn network_stopped(&self, primary: &str, secondary: &str) -> i32 {
        match self.table.network_stopped {
            Some(f) => f(borrowed_vsstr(primary), borrowed_vsstr(secondary)),
            None => 0,
        }
    }

    pub(crate) fn network_address_changed(&self) -> i32 {
        self.table.network_address_changed.map(|f| f()).unwrap_or(0)
    }

    pub(crate) fn volume_status_changed(
        &self,
        cell_id: u32,
        volume_id: u32,
        state: VsVolumeState,
    ) -> i32 {
        match self.table.volume_status_changed {
            Some(f) => f(cell_id, volume_id, state),
            None => 0,
        }
    }
}

// The string stays borrowed for the duration of the table call only.
fn borrowed_vsstr(s: &str) -> VsStr {
    let bytes = s.as_bytes();
    VsStr {
        ptr: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Load the module at `path` and run the version handshake. Any failure here
/// is a diagnostic for the caller to absorb; the module is unloaded when this
/// returns `Err`.
pub(crate) fn load_and_negotiate(
    path: &Path,
    cache: Arc<dyn CacheManager>,
) -> Result<ActivePlugin> {
    // SAFETY: loading dynamic libraries and invoking their entry points is
    // inherently unsafe.
    let lib = unsafe { Library::new(path) }
        .with_context(|| format!("failed to load handler module from {}", path.display()))?;

    // SAFETY: symbol type matches the negotiation ABI contract.
    let negotiate: Symbol<VsNegotiateFn> = unsafe {
        lib.get(VOLSTATUS_ENTRY_SYMBOL.as_bytes()).with_context(|| {
            format!(
                "missing entry symbol `{}` in {}",
                VOLSTATUS_ENTRY_SYMBOL,
                path.display()
            )
        })?
    };

    let (host_vtable, host_ctx) = host::build_host_vtable(cache);
    let mut table = VsPluginVTable::empty();

    // SAFETY: entry point is trusted by the ABI contract; return code,
    // version, and table completeness are checked below.
    let code = unsafe {
        negotiate(
            &mut table as *mut VsPluginVTable,
            host_vtable.as_ref() as *const VsHostVTable,
        )
    };
    if code != 0 {
        return Err(anyhow!(
            "negotiation entry returned {code} for {}",
            path.display()
        ));
    }
    if table.version != VOLSTATUS_PLUGIN_TABLE_VERSION {
        return Err(anyhow!(
            "handler table version mismatch for {}: module={}, host expects {}",
            path.display(),
            table.version,
            VOLSTATUS_PLUGIN_TABLE_VERSION
        ));
    }
    if !table.is_complete() {
        return Err(anyhow!(
            "handler table from {} is missing entries",
            path.display()
        ));
    }

    Ok(ActivePlugin {
        library_path: path.to_path_buf(),
        table,
        _resources: Some(ModuleResources {
            _lib: lib,
            _host_vtable: host_vtable,
            _host_ctx: host_ctx,
        }),
    })
}
