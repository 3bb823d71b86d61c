use nimbusfs_volstatus_api::{VS_ERR_INTERNAL, VsVolumeState};

/// Outcome of one handler callback: `Ok` maps to status 0, `Err` carries the
/// non-zero code reported back to the client.
pub type HandlerResult = Result<(), i32>;

/// Safe surface a handler module implements; every callback defaults to a
/// success no-op. One instance is created lazily (via `Default`) on the first
/// notification and lives for the process lifetime.
///
/// Callbacks run on the client's own threads and must not call back into the
/// client's notification surface.
pub trait VolStatusHandler: Send + Sync + 'static {
    fn service_started(&self) -> HandlerResult {
        Ok(())
    }

    fn service_stopped(&self) -> HandlerResult {
        Ok(())
    }

    fn network_started(&self, _primary: &str, _secondary: &str) -> HandlerResult {
        Ok(())
    }

    fn network_stopped(&self, _primary: &str, _secondary: &str) -> HandlerResult {
        Ok(())
    }

    fn network_address_changed(&self) -> HandlerResult {
        Ok(())
    }

    fn volume_status_changed(
        &self,
        _cell_id: u32,
        _volume_id: u32,
        _state: VsVolumeState,
    ) -> HandlerResult {
        Ok(())
    }
}

/// Collapse a [`HandlerResult`] to the wire code. `Err(0)` would read as
/// success on the other side; it is normalized to [`VS_ERR_INTERNAL`].
pub fn handler_code(result: HandlerResult) -> i32 {
    match result {
        Ok(()) => 0,
        Err(0) => VS_ERR_INTERNAL,
        Err(code) => code,
    }
}
