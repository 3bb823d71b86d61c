#![allow(clippy::wildcard_imports)] // Intentional wildcard usage (API facade, macro template, or generated code).

pub use nimbusfs_volstatus_api::*;

mod export;
mod ffi_guard;
mod ffi_utils;
mod handler;
mod host;

pub use ffi_guard::*;
pub use ffi_utils::*;
pub use handler::*;
pub use host::*;
