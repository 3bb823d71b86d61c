/// Export a [`crate::VolStatusHandler`] implementation as a loadable handler
/// module.
///
/// Emits the negotiation entry point under the fixed symbol name together
/// with the `extern "C"` shims behind the plugin function table. The handler
/// type must implement `Default`; the instance is created on first use and
/// lives for the process lifetime.
///
/// The generated entry point refuses a host table whose version differs from
/// the one this SDK was built against — the client then unloads the module
/// instead of calling through an incompatible layout.
#[macro_export]
macro_rules! export_volstatus_plugin {
    ($handler:ty) => {
        #[doc(hidden)]
        fn __vs_handler() -> &'static $handler {
            static HANDLER: std::sync::OnceLock<$handler> = std::sync::OnceLock::new();
            HANDLER.get_or_init(<$handler as core::default::Default>::default)
        }

        extern "C" fn __vs_service_started() -> i32 {
            $crate::guard_with_default("service_started", $crate::VS_ERR_INTERNAL, || {
                $crate::handler_code($crate::VolStatusHandler::service_started(__vs_handler()))
            })
        }

        extern "C" fn __vs_service_stopped() -> i32 {
            $crate::guard_with_default("service_stopped", $crate::VS_ERR_INTERNAL, || {
                $crate::handler_code($crate::VolStatusHandler::service_stopped(__vs_handler()))
            })
        }

        extern "C" fn __vs_network_started(primary: $crate::VsStr, secondary: $crate::VsStr) -> i32 {
            $crate::guard_with_default("network_started", $crate::VS_ERR_INTERNAL, || {
                // SAFETY: the client keeps payload strings alive for the call.
                let primary = unsafe { $crate::vsstr_to_string_lossy(primary) };
                let secondary = unsafe { $crate::vsstr_to_string_lossy(secondary) };
                $crate::handler_code($crate::VolStatusHandler::network_started(
                    __vs_handler(),
                    &primary,
                    &secondary,
                ))
            })
        }

        extern "C" fn __vs_network_stopped(primary: $crate::VsStr, secondary: $crate::VsStr) -> i32 {
            $crate::guard_with_default("network_stopped", $crate::VS_ERR_INTERNAL, || {
                // SAFETY: the client keeps payload strings alive for the call.
                let primary = unsafe { $crate::vsstr_to_string_lossy(primary) };
                let secondary = unsafe { $crate::vsstr_to_string_lossy(secondary) };
                $crate::handler_code($crate::VolStatusHandler::network_stopped(
                    __vs_handler(),
                    &primary,
                    &secondary,
                ))
            })
        }

        extern "C" fn __vs_network_address_changed() -> i32 {
            $crate::guard_with_default("network_address_changed", $crate::VS_ERR_INTERNAL, || {
                $crate::handler_code($crate::VolStatusHandler::network_address_changed(
                    __vs_handler(),
                ))
            })
        }

        extern "C" fn __vs_volume_status_changed(
            cell_id: u32,
            volume_id: u32,
            state: $crate::VsVolumeState,
        ) -> i32 {
            $crate::guard_with_default("volume_status_changed", $crate::VS_ERR_INTERNAL, || {
                $crate::handler_code($crate::VolStatusHandler::volume_status_changed(
                    __vs_handler(),
                    cell_id,
                    volume_id,
                    state,
                ))
            })
        }

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn nimbusfs_volstatus_negotiate(
            out_plugin: *mut $crate::VsPluginVTable,
            host: *const $crate::VsHostVTable,
        ) -> i32 {
            $crate::guard_with_default(
                "nimbusfs_volstatus_negotiate",
                $crate::VS_ERR_INTERNAL,
                || {
                    if out_plugin.is_null() || host.is_null() {
                        return $crate::VS_ERR_INVALID_ARG;
                    }
                    // SAFETY: host pointer null-checked above; the client
                    // keeps the table alive while this module is loaded.
                    if unsafe { (*host).version } != $crate::VOLSTATUS_HOST_TABLE_VERSION {
                        return $crate::VS_ERR_VERSION;
                    }
                    // SAFETY: see above.
                    unsafe { $crate::__set_host_vtable(host) };
                    // SAFETY: out pointer null-checked above; the caller
                    // supplies the storage.
                    unsafe {
                        *out_plugin = $crate::VsPluginVTable {
                            version: $crate::VOLSTATUS_PLUGIN_TABLE_VERSION,
                            service_started: Some(__vs_service_started),
                            service_stopped: Some(__vs_service_stopped),
                            network_started: Some(__vs_network_started),
                            network_stopped: Some(__vs_network_stopped),
                            network_address_changed: Some(__vs_network_address_changed),
                            volume_status_changed: Some(__vs_volume_status_changed),
                        };
                    }
                    0
                },
            )
        }
    };
}
