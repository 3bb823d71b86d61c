//! Host-side callback table handed to handler modules at negotiation.

use core::ffi::c_void;
use std::sync::Arc;

use nimbusfs_volstatus_api::{
    VOLSTATUS_HOST_TABLE_VERSION, VS_ERR_INTERNAL, VS_ERR_INVALID_ARG, VsHostVTable, VsLogLevel,
    VsStr,
};

use crate::accessor;
use crate::cache::CacheManager;

pub(crate) struct HostCtx {
    cache: Arc<dyn CacheManager>,
}

/// Build the host table and the context its `user_data` points at. Both boxes
/// must stay alive for as long as the handler module may call back in; the
/// loader keeps them bundled with the library handle.
pub(crate) fn build_host_vtable(cache: Arc<dyn CacheManager>) -> (Box<VsHostVTable>, Box<HostCtx>) {
    let mut ctx = Box::new(HostCtx { cache });
    let vtable = Box::new(VsHostVTable {
        version: VOLSTATUS_HOST_TABLE_VERSION,
        user_data: (&mut *ctx) as *mut HostCtx as *mut c_void,
        path_to_volume_id: Some(host_path_to_volume_id),
        path_to_dfs_target: Some(host_path_to_dfs_target),
        log: Some(host_log),
    });
    (vtable, ctx)
}

unsafe fn vsstr_to_string_lossy(s: VsStr) -> String {
    if s.ptr.is_null() || s.len == 0 {
        return String::new();
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    String::from_utf8_lossy(bytes).into_owned()
}

extern "C" fn host_path_to_volume_id(
    user_data: *mut c_void,
    share: VsStr,
    path: VsStr,
    out_cell: *mut u32,
    out_volume: *mut u32,
) -> i32 {
    if out_cell.is_null() || out_volume.is_null() {
        return VS_ERR_INVALID_ARG;
    }
    if user_data.is_null() {
        return VS_ERR_INTERNAL;
    }
    // SAFETY: user_data is the HostCtx boxed alongside this table, alive for
    // as long as the module is loaded.
    let ctx = unsafe { &*(user_data as *const HostCtx) };
    // SAFETY: both views are only read for the duration of this call.
    let share = unsafe { vsstr_to_string_lossy(share) };
    let path = unsafe { vsstr_to_string_lossy(path) };

    match accessor::path_to_volume_id(ctx.cache.as_ref(), &share, &path) {
        Ok((cell, volume)) => {
            // SAFETY: both output pointers were null-checked above; the
            // caller supplies the storage.
            unsafe {
                *out_cell = cell;
                *out_volume = volume;
            }
            0
        }
        Err(error) => error.status_code(),
    }
}

extern "C" fn host_path_to_dfs_target(
    user_data: *mut c_void,
    share: VsStr,
    path: VsStr,
    len: *mut usize,
    buffer: *mut u8,
) -> i32 {
    if len.is_null() {
        return VS_ERR_INVALID_ARG;
    }
    // SAFETY: len was null-checked above.
    let capacity = unsafe { *len };
    if buffer.is_null() && capacity != 0 {
        return VS_ERR_INVALID_ARG;
    }
    if user_data.is_null() {
        return VS_ERR_INTERNAL;
    }
    // SAFETY: user_data is the HostCtx boxed alongside this table.
    let ctx = unsafe { &*(user_data as *const HostCtx) };
    // SAFETY: both views are only read for the duration of this call.
    let share = unsafe { vsstr_to_string_lossy(share) };
    let path = unsafe { vsstr_to_string_lossy(path) };

    let out = if buffer.is_null() {
        None
    } else {
        // SAFETY: buffer is non-null and the caller vouches for `capacity`
        // writable bytes behind it.
        Some(unsafe { core::slice::from_raw_parts_mut(buffer, capacity) })
    };

    match accessor::path_to_dfs_target(ctx.cache.as_ref(), &share, &path, out) {
        Ok(written) => {
            // SAFETY: len was null-checked above.
            unsafe {
                *len = written;
            }
            0
        }
        Err(error) => error.status_code(),
    }
}

extern "C" fn host_log(_user_data: *mut c_void, level: VsLogLevel, msg: VsStr) {
    // SAFETY: the view is only read for the duration of this call.
    let text = unsafe { vsstr_to_string_lossy(msg) };
    match level {
        VsLogLevel::Error => tracing::error!(target: "nimbusfs_volstatus::plugin", "{text}"),
        VsLogLevel::Warn => tracing::warn!(target: "nimbusfs_volstatus::plugin", "{text}"),
        VsLogLevel::Info => tracing::info!(target: "nimbusfs_volstatus::plugin", "{text}"),
        VsLogLevel::Debug => tracing::debug!(target: "nimbusfs_volstatus::plugin", "{text}"),
        VsLogLevel::Trace => tracing::trace!(target: "nimbusfs_volstatus::plugin", "{text}"),
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
