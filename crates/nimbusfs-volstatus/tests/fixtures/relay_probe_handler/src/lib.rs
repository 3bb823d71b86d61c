//! Test fixture: probes both host callbacks during service start and reports
//! distinctive codes so the host side can assert exact passthrough.

use nimbusfs_volstatus_sdk::{self as sdk, HandlerResult, VolStatusHandler, VsVolumeState};

#[derive(Default)]
struct RelayProbe;

impl VolStatusHandler for RelayProbe {
    fn service_started(&self) -> HandlerResult {
        let id = sdk::path_to_volume_id("probe", "/status/probe")?;
        if id != (7, 11) {
            return Err(61);
        }
        let target = sdk::path_to_dfs_target("probe", "/status/link")?;
        if target != "#corp.example.com:root.target" {
            return Err(62);
        }
        Ok(())
    }

    fn service_stopped(&self) -> HandlerResult {
        Err(42)
    }

    fn network_started(&self, primary: &str, secondary: &str) -> HandlerResult {
        if primary == "NIMBUS32" && secondary == "NIMBUS64" {
            Ok(())
        } else {
            Err(63)
        }
    }

    fn volume_status_changed(
        &self,
        cell_id: u32,
        volume_id: u32,
        state: VsVolumeState,
    ) -> HandlerResult {
        if state == VsVolumeState::Offline {
            return Err((cell_id + volume_id) as i32);
        }
        Ok(())
    }
}

nimbusfs_volstatus_sdk::export_volstatus_plugin!(RelayProbe);
