use std::sync::Arc;

use nimbusfs_volstatus_api::VsVolumeState;
use tracing::{info, warn};

use crate::cache::CacheManager;
use crate::config::VolStatusConfig;
use crate::error::{Error, Result};
use crate::loader::{self, ActivePlugin};

/// The client's network endpoint state, as needed for the derived
/// network-started notification.
pub trait NetworkStatus: Send + Sync {
    /// Whether the client is currently accepting network requests.
    fn is_started(&self) -> bool;

    /// Primary endpoint name, plus the distinct 64-bit peer-addressing name
    /// on platforms that have one.
    fn endpoint_names(&self) -> (String, Option<String>);
}

/// Volume-status notification bridge.
///
/// Owns the optional handler module for its whole lifetime: loaded and
/// negotiated once in [`VolStatusBridge::initialize`], unloaded once in
/// [`VolStatusBridge::finalize`] (or on drop). Every relay and callback
/// operation is a success no-op while no handler is active.
///
/// Relay methods may be called from any thread; the negotiated tables are
/// immutable after initialization. Handler callbacks must not re-enter the
/// relay from within a notification they are handling.
pub struct VolStatusBridge {
    network: Arc<dyn NetworkStatus>,
    plugin: Option<ActivePlugin>,
}

impl VolStatusBridge {
    /// Load and negotiate the configured handler module, if any.
    ///
    /// A missing or unusable module must never block client startup: every
    /// load or negotiation failure degrades to "no handler active" and is
    /// logged, not returned.
    pub fn initialize(
        config: &VolStatusConfig,
        cache: Arc<dyn CacheManager>,
        network: Arc<dyn NetworkStatus>,
    ) -> Self {
        let plugin = match config.handler_path.as_deref() {
            None => None,
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => match loader::load_and_negotiate(path, cache) {
                Ok(plugin) => {
                    info!(
                        target: "nimbusfs_volstatus::load",
                        path = %path.display(),
                        "volume-status handler loaded"
                    );
                    Some(plugin)
                }
                Err(error) => {
                    warn!(
                        target: "nimbusfs_volstatus::load",
                        path = %path.display(),
                        "volume-status handler unavailable, continuing without one: {error:#}"
                    );
                    None
                }
            },
        };
        Self { network, plugin }
    }

    pub fn plugin_active(&self) -> bool {
        self.plugin.is_some()
    }

    /// Unload the handler module. Idempotent; safe to call with no handler
    /// active.
    pub fn finalize(&mut self) {
        if let Some(plugin) = self.plugin.take() {
            info!(
                target: "nimbusfs_volstatus::load",
                path = %plugin.library_path.display(),
                "volume-status handler unloaded"
            );
        }
    }

    /// The client service has started. If the network is already up, the
    /// handler additionally receives network-started with the current
    /// endpoint names; a handler loaded after the network came up would
    /// otherwise never see it.
    pub fn service_started(&self) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward("service_started", plugin.service_started())?;
        if self.network.is_started() {
            let (primary, secondary) = self.network.endpoint_names();
            let secondary = secondary.as_deref().unwrap_or(&primary);
            forward("network_started", plugin.network_started(&primary, secondary))?;
        }
        Ok(())
    }

    pub fn service_stopped(&self) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward("service_stopped", plugin.service_stopped())
    }

    /// The client is accepting network requests under the given endpoint
    /// names. Without a distinct `secondary` name, the primary is passed in
    /// both table slots.
    pub fn network_started(&self, primary: &str, secondary: Option<&str>) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward(
            "network_started",
            plugin.network_started(primary, secondary.unwrap_or(primary)),
        )
    }

    pub fn network_stopped(&self, primary: &str, secondary: Option<&str>) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward(
            "network_stopped",
            plugin.network_stopped(primary, secondary.unwrap_or(primary)),
        )
    }

    /// The address list changed; paths that failed to resolve may resolve
    /// now. Pure hint, no payload.
    pub fn network_address_changed(&self) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward("network_address_changed", plugin.network_address_changed())
    }

    pub fn volume_status_changed(
        &self,
        cell_id: u32,
        volume_id: u32,
        state: VsVolumeState,
    ) -> Result<()> {
        let Some(plugin) = &self.plugin else {
            return Ok(());
        };
        forward(
            "volume_status_changed",
            plugin.volume_status_changed(cell_id, volume_id, state),
        )
    }
}

fn forward(call: &'static str, code: i32) -> Result<()> {
    if code == 0 {
        Ok(())
    } else {
        Err(Error::Plugin { call, code })
    }
}

#[cfg(test)]
#[path = "tests/relay_tests.rs"]
mod tests;
