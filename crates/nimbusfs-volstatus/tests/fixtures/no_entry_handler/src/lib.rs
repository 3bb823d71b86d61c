//! Test fixture: a loadable library that exports nothing the volume-status
//! loader looks for.

#[unsafe(no_mangle)]
pub extern "C" fn unrelated_entry_point() -> i32 {
    0
}
