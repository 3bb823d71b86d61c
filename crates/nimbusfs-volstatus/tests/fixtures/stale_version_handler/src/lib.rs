//! Test fixture: negotiates successfully but declares a plugin-table version
//! the client does not speak, so the client must unload it.

use nimbusfs_volstatus_api::{VsHostVTable, VsPluginVTable, VsStr, VsVolumeState};

extern "C" fn noop() -> i32 {
    0
}

extern "C" fn noop_names(_primary: VsStr, _secondary: VsStr) -> i32 {
    0
}

extern "C" fn noop_volume(_cell_id: u32, _volume_id: u32, _state: VsVolumeState) -> i32 {
    0
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn nimbusfs_volstatus_negotiate(
    out_plugin: *mut VsPluginVTable,
    _host: *const VsHostVTable,
) -> i32 {
    if out_plugin.is_null() {
        return 1;
    }
    // SAFETY: out pointer null-checked above; the caller supplies the storage.
    unsafe {
        *out_plugin = VsPluginVTable {
            version: 9999,
            service_started: Some(noop),
            service_stopped: Some(noop),
            network_started: Some(noop_names),
            network_stopped: Some(noop_names),
            network_address_changed: Some(noop),
            volume_status_changed: Some(noop_volume),
        };
    }
    0
}
