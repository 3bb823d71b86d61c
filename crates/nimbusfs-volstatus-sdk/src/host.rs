//! Safe wrappers over the client-provided callback table.

use core::sync::atomic::{AtomicPtr, Ordering};

use nimbusfs_volstatus_api::{VS_ERR_INTERNAL, VsHostVTable, VsLogLevel};

use crate::ffi_utils::vsstr_from_str;

static HOST_VTABLE: AtomicPtr<VsHostVTable> = AtomicPtr::new(core::ptr::null_mut());

#[doc(hidden)]
pub unsafe fn __set_host_vtable(host: *const VsHostVTable) {
    HOST_VTABLE.store(host as *mut VsHostVTable, Ordering::Release);
}

/// Log a message through the client, if it provided a logger.
///
/// Purely best-effort: before negotiation, or without a log entry in the
/// table, this is a no-op.
pub fn host_log(level: VsLogLevel, msg: &str) {
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return;
    }
    // SAFETY: the client owns the table and keeps it alive while this module
    // is loaded.
    let Some(cb) = (unsafe { (*host).log }) else {
        return;
    };
    let user_data = unsafe { (*host).user_data };
    cb(user_data, level, vsstr_from_str(msg));
}

/// Ask the client which (cell, volume) pair owns `share`/`path`.
///
/// Fails with the client's status code; [`VS_ERR_INTERNAL`] when called
/// before negotiation completed.
pub fn path_to_volume_id(share: &str, path: &str) -> Result<(u32, u32), i32> {
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return Err(VS_ERR_INTERNAL);
    }
    // SAFETY: the client owns the table and keeps it alive while this module
    // is loaded.
    let cb = unsafe { (*host).path_to_volume_id }.ok_or(VS_ERR_INTERNAL)?;
    let user_data = unsafe { (*host).user_data };

    let mut cell = 0_u32;
    let mut volume = 0_u32;
    let code = cb(
        user_data,
        vsstr_from_str(share),
        vsstr_from_str(path),
        &mut cell,
        &mut volume,
    );
    if code != 0 {
        return Err(code);
    }
    Ok((cell, volume))
}

/// Ask the client for the DFS redirection target of `share`/`path`,
/// handling the query-then-fill convention.
pub fn path_to_dfs_target(share: &str, path: &str) -> Result<String, i32> {
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return Err(VS_ERR_INTERNAL);
    }
    // SAFETY: the client owns the table and keeps it alive while this module
    // is loaded.
    let cb = unsafe { (*host).path_to_dfs_target }.ok_or(VS_ERR_INTERNAL)?;
    let user_data = unsafe { (*host).user_data };

    let mut len = 0_usize;
    let code = cb(
        user_data,
        vsstr_from_str(share),
        vsstr_from_str(path),
        &mut len,
        core::ptr::null_mut(),
    );
    if code != 0 {
        return Err(code);
    }

    let mut buffer = vec![0_u8; len];
    let mut filled = buffer.len();
    let code = cb(
        user_data,
        vsstr_from_str(share),
        vsstr_from_str(path),
        &mut filled,
        buffer.as_mut_ptr(),
    );
    if code != 0 {
        return Err(code);
    }
    buffer.truncate(filled.saturating_sub(1)); // drop the NUL terminator
    String::from_utf8(buffer).map_err(|_| VS_ERR_INTERNAL)
}
