//! Client configuration.

use std::time::Duration;

use crate::scan::DEFAULT_SCAN_TIMEOUT;

/// Tunables shared by discovery, connections and scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Timeout for accessory and SSID scans started without an explicit one.
    pub scan_timeout: Duration,
    /// How long [`BleScanner::discover`](crate::ble::BleScanner::discover) listens.
    pub discovery_timeout: Duration,
    /// Advertised name prefix that identifies a camera.
    pub name_prefix: String,
    /// Use acknowledged GATT writes.
    pub write_with_response: bool,
}

impl ClientConfig {
    /// Default discovery window (5 seconds).
    pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default advertised name prefix.
    pub const DEFAULT_NAME_PREFIX: &'static str = "THETA";

    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default scan timeout.
    pub fn scan_timeout(mut self, timeout: Duration) -> Self {
        self.scan_timeout = timeout;
        self
    }

    /// Set the discovery window.
    pub fn discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    /// Set the advertised name prefix.
    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Select acknowledged or unacknowledged writes.
    pub fn write_with_response(mut self, with_response: bool) -> Self {
        self.write_with_response = with_response;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scan_timeout: DEFAULT_SCAN_TIMEOUT,
            discovery_timeout: Self::DEFAULT_DISCOVERY_TIMEOUT,
            name_prefix: Self::DEFAULT_NAME_PREFIX.to_string(),
            write_with_response: true,
        }
    }
}
