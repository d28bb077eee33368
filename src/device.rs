//! Camera device handle.
//!
//! A [`ThetaDevice`] owns the connection to one camera, its notification
//! subscriptions and its two scan engines. Service views such as
//! [`ThetaDevice::camera_status`] borrow the device; they hold no state.

use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::ble::connection::{ConnectionEvent, ConnectionManager, ConnectionState};
use crate::ble::notification::{NotificationManager, NotifyCallback};
use crate::ble::peripheral::{BtlePeripheral, Peripheral};
use crate::ble::scanner::DiscoveredCamera;
use crate::ble::uuids::BleCharacteristic;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::protocol::codec::{Decode, Encode};
use crate::scan::ScanEngine;
use crate::services::bluetooth_control::{AccessoryScan, BluetoothControl};
use crate::services::camera_control::CameraControl;
use crate::services::camera_control_v2::CameraControlV2;
use crate::services::camera_information::CameraInformation;
use crate::services::camera_status::CameraStatus;
use crate::services::shooting_control::ShootingControl;
use crate::services::shutter::ShutterAction;
use crate::services::wlan_control::{SsidScan, WlanControl};

/// A single camera reachable over BLE.
pub struct ThetaDevice {
    /// Connection to the camera.
    connection: ConnectionManager,
    /// Notification handlers.
    notifications: Arc<NotificationManager>,
    /// Accessory scan engine.
    pub(crate) accessory_scan: ScanEngine<AccessoryScan>,
    /// SSID scan engine.
    pub(crate) ssid_scan: ScanEngine<SsidScan>,
    /// Serializes the write-then-read exchange on the options characteristic.
    pub(crate) options_lock: tokio::sync::Mutex<()>,
    /// Configuration.
    config: ClientConfig,
}

impl ThetaDevice {
    /// Create a device over any transport, with the default configuration.
    pub fn new(identifier: impl Into<String>, peripheral: Arc<dyn Peripheral>) -> Self {
        Self::with_config(identifier, peripheral, ClientConfig::default())
    }

    /// Create a device over any transport.
    pub fn with_config(
        identifier: impl Into<String>,
        peripheral: Arc<dyn Peripheral>,
        config: ClientConfig,
    ) -> Self {
        let notifications = Arc::new(NotificationManager::new());
        Self {
            connection: ConnectionManager::new(identifier, peripheral),
            accessory_scan: ScanEngine::new(AccessoryScan, notifications.clone()),
            ssid_scan: ScanEngine::new(SsidScan, notifications.clone()),
            notifications,
            options_lock: tokio::sync::Mutex::new(()),
            config,
        }
    }

    /// Create a device from a discovery result.
    pub fn from_discovered(camera: DiscoveredCamera, config: ClientConfig) -> Self {
        let peripheral = BtlePeripheral::new(camera.peripheral)
            .with_response(config.write_with_response);
        Self::with_config(camera.identifier, Arc::new(peripheral), config)
    }

    // === Connection ===

    /// Identifier given at construction.
    pub fn identifier(&self) -> &str {
        self.connection.identifier()
    }

    /// Configuration in use.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Connect to the camera.
    pub async fn connect(&self) -> Result<()> {
        info!("Connecting to camera {}", self.identifier());
        self.connection.connect().await
    }

    /// Disconnect from the camera.
    ///
    /// Notification handlers are left in place; clear them first if a later
    /// reconnect must not see them.
    pub async fn disconnect(&self) -> Result<()> {
        info!("Disconnecting from camera {}", self.identifier());
        self.connection.disconnect().await
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    /// Get the current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Subscribe to connection state changes.
    pub fn subscribe_connection_events(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.connection.subscribe()
    }

    /// Record a link loss reported by the platform.
    pub fn handle_disconnection(&self) {
        self.connection.handle_disconnection();
    }

    /// Characteristics that currently have a notification handler.
    pub fn subscribed_characteristics(&self) -> Vec<BleCharacteristic> {
        self.notifications.subscribed()
    }

    // === Services ===

    /// Camera information service.
    pub fn camera_information(&self) -> CameraInformation<'_> {
        CameraInformation::new(self)
    }

    /// Camera status service.
    pub fn camera_status(&self) -> CameraStatus<'_> {
        CameraStatus::new(self)
    }

    /// Camera control (plugin) service.
    pub fn camera_control(&self) -> CameraControl<'_> {
        CameraControl::new(self)
    }

    /// Shooting control service.
    pub fn shooting_control(&self) -> ShootingControl<'_> {
        ShootingControl::new(self)
    }

    /// Wireless LAN control service.
    pub fn wlan_control(&self) -> WlanControl<'_> {
        WlanControl::new(self)
    }

    /// Bluetooth control (accessory) service.
    pub fn bluetooth_control(&self) -> BluetoothControl<'_> {
        BluetoothControl::new(self)
    }

    /// Camera control v2 service.
    pub fn camera_control_v2(&self) -> CameraControlV2<'_> {
        CameraControlV2::new(self)
    }

    /// Take a picture, or start or stop video recording, depending on the
    /// camera's current mode.
    pub async fn release_shutter(&self) -> Result<ShutterAction> {
        self.camera_control_v2().release_shutter().await
    }

    // === Internal ===

    /// Connected transport that exposes `characteristic`.
    pub(crate) fn transport(
        &self,
        characteristic: BleCharacteristic,
    ) -> Result<Arc<dyn Peripheral>> {
        let peripheral = self.connection.peripheral()?;
        if !peripheral.contains(characteristic) {
            return Err(Error::NotSupported { characteristic });
        }
        Ok(peripheral)
    }

    /// Connected transport, without a characteristic check.
    pub(crate) fn connected_peripheral(&self) -> Result<Arc<dyn Peripheral>> {
        self.connection.peripheral()
    }

    /// Read raw bytes.
    pub(crate) async fn read_bytes(&self, characteristic: BleCharacteristic) -> Result<Vec<u8>> {
        let peripheral = self.transport(characteristic)?;
        peripheral.read(characteristic).await
    }

    /// Read and decode.
    pub(crate) async fn read<T: Decode>(&self, characteristic: BleCharacteristic) -> Result<T> {
        let data = self.read_bytes(characteristic).await?;
        T::decode(characteristic, &data)
    }

    /// Write raw bytes.
    pub(crate) async fn write_bytes(
        &self,
        characteristic: BleCharacteristic,
        data: &[u8],
    ) -> Result<()> {
        let peripheral = self.transport(characteristic)?;
        debug!("Writing {} bytes to {}", data.len(), characteristic);
        peripheral.write(characteristic, data).await
    }

    /// Encode and write.
    pub(crate) async fn write<T: Encode + ?Sized>(
        &self,
        characteristic: BleCharacteristic,
        value: &T,
    ) -> Result<()> {
        // Check the transport before encoding so precedence does not depend on the value.
        self.transport(characteristic)?;
        let data = value.encode()?;
        self.write_bytes(characteristic, &data).await
    }

    /// Register or clear a notification handler.
    pub(crate) async fn set_notify<T: Decode + 'static>(
        &self,
        characteristic: BleCharacteristic,
        callback: Option<NotifyCallback<T>>,
    ) -> Result<()> {
        let peripheral = self.connection.peripheral()?;
        self.notifications
            .set_notify(peripheral, characteristic, callback)
            .await
    }
}

impl std::fmt::Debug for ThetaDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThetaDevice")
            .field("identifier", &self.identifier())
            .field("connection_state", &self.connection_state())
            .finish()
    }
}
