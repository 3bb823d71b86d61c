use nimbusfs_volstatus_api::VsStr;

pub unsafe fn vsstr_to_string_lossy(s: VsStr) -> String {
    if s.ptr.is_null() || s.len == 0 {
        return String::new();
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    String::from_utf8_lossy(bytes).into_owned()
}

/// Borrowed view; the source string must outlive every use of the result.
pub fn vsstr_from_str(s: &str) -> VsStr {
    let bytes = s.as_bytes();
    VsStr {
        ptr: bytes.as_ptr(),
        len: bytes.len(),
    }
}
