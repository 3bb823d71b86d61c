use std::sync::Arc;
use std::sync::atomic::Ordering;

use nimbusfs_volstatus_api::{
    VS_ERR_INVALID_ARG, VS_ERR_NOT_A_DFS_LINK, VS_ERR_TOO_BIG, VsStr,
};

use super::build_host_vtable;
use crate::test_support::{MockCacheManager, dfs_link_entry, file_entry};

fn vs(s: &str) -> VsStr {
    VsStr {
        ptr: s.as_ptr(),
        len: s.len(),
    }
}

#[test]
fn volume_id_null_outputs_fail_before_resolution() {
    let cache = Arc::new(MockCacheManager::new(file_entry(7, 11)));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_volume_id.expect("table entry present");

    let mut volume = 0_u32;
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds/nightly"),
        core::ptr::null_mut(),
        &mut volume,
    );

    assert_eq!(code, VS_ERR_INVALID_ARG);
    assert_eq!(cache.resolve_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn volume_id_round_trip_through_table() {
    let cache = Arc::new(MockCacheManager::new(file_entry(7, 11)));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_volume_id.expect("table entry present");

    let mut cell = 0_u32;
    let mut volume = 0_u32;
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds/nightly"),
        &mut cell,
        &mut volume,
    );

    assert_eq!(code, 0);
    assert_eq!((cell, volume), (7, 11));
}

#[test]
fn dfs_target_query_then_fill_through_table() {
    let target = "#corp.example.com:root.builds";
    let cache = Arc::new(MockCacheManager::new(dfs_link_entry(3, 5, target)));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_dfs_target.expect("table entry present");

    let mut len = 0_usize;
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds"),
        &mut len,
        core::ptr::null_mut(),
    );
    assert_eq!(code, 0);
    assert_eq!(len, target.len() + 1);

    let mut buffer = vec![0_u8; len];
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds"),
        &mut len,
        buffer.as_mut_ptr(),
    );
    assert_eq!(code, 0);
    assert_eq!(len, target.len() + 1);
    assert_eq!(&buffer[..target.len()], target.as_bytes());
    assert_eq!(buffer[target.len()], 0);
}

#[test]
fn dfs_target_null_buffer_with_capacity_is_invalid() {
    let cache = Arc::new(MockCacheManager::new(dfs_link_entry(3, 5, "#c:v")));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_dfs_target.expect("table entry present");

    let mut len = 8_usize;
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds"),
        &mut len,
        core::ptr::null_mut(),
    );

    assert_eq!(code, VS_ERR_INVALID_ARG);
    assert_eq!(cache.resolve_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn dfs_target_null_length_is_invalid() {
    let cache = Arc::new(MockCacheManager::new(dfs_link_entry(3, 5, "#c:v")));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_dfs_target.expect("table entry present");

    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds"),
        core::ptr::null_mut(),
        core::ptr::null_mut(),
    );

    assert_eq!(code, VS_ERR_INVALID_ARG);
    assert_eq!(cache.resolve_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn accessor_errors_map_to_stable_codes() {
    let cache = Arc::new(MockCacheManager::new(file_entry(7, 11)));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_dfs_target.expect("table entry present");

    let mut len = 0_usize;
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds/nightly"),
        &mut len,
        core::ptr::null_mut(),
    );
    assert_eq!(code, VS_ERR_NOT_A_DFS_LINK);
    assert_eq!(len, 0, "length untouched on failure");

    let target = "#corp.example.com:root.builds";
    let cache = Arc::new(MockCacheManager::new(dfs_link_entry(3, 5, target)));
    let (vtable, _ctx) = build_host_vtable(cache.clone());
    let callback = vtable.path_to_dfs_target.expect("table entry present");

    let mut buffer = vec![0xAA_u8; 4];
    let mut len = buffer.len();
    let code = callback(
        vtable.user_data,
        vs("builds"),
        vs("/builds"),
        &mut len,
        buffer.as_mut_ptr(),
    );
    assert_eq!(code, VS_ERR_TOO_BIG);
    assert_eq!(len, 4, "length untouched on failure");
    assert!(buffer.iter().all(|b| *b == 0xAA));
}
