//! FFI panic guard utilities.
//!
//! Every `extern "C" fn` emitted by the export macro must catch panics to
//! avoid undefined behaviour at the module boundary. These helpers centralise
//! the `catch_unwind` boilerplate; panics are reported through the client's
//! log callback when one is available.

use nimbusfs_volstatus_api::VsLogLevel;

use crate::host::host_log;

/// Extract a human-readable message from a panic payload.
pub fn panic_message(payload: Box<dyn core::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_string()
}

/// Catch panics in FFI callbacks that return a value with a known safe
/// default (for status codes, [`crate::VS_ERR_INTERNAL`]).
pub fn guard_with_default<T>(op: &'static str, default: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(val) => val,
        Err(payload) => {
            let msg = panic_message(payload);
            host_log(VsLogLevel::Error, &format!("panic in ffi `{op}`: {msg}"));
            default
        }
    }
}
