//! Wireless LAN control service and SSID scanning.

use async_trait::async_trait;
use std::time::Duration;

use crate::ble::notification::NotifyCallback;
use crate::ble::peripheral::Peripheral;
use crate::ble::uuids::BleCharacteristic;
use crate::data::{AccessPoint, ConnectedWifiInfo, NetworkType, ScannedSsid};
use crate::device::ThetaDevice;
use crate::error::Result;
use crate::protocol::codec::Encode;
use crate::scan::{CompleteCallback, FoundCallback, ScanKind};

/// SSID scan: switches the camera's network type to scan mode and collects
/// the reported networks, one per SSID.
#[derive(Debug, Clone, Copy, Default)]
pub struct SsidScan;

#[async_trait]
impl ScanKind for SsidScan {
    type Item = ScannedSsid;
    type Key = String;
    const NOTIFY: BleCharacteristic = BleCharacteristic::NotifyScannedSsid;
    const NAME: &'static str = "SSID";

    fn key(item: &ScannedSsid) -> String {
        item.ssid.clone()
    }

    async fn begin(&self, peripheral: &dyn Peripheral) -> Result<()> {
        peripheral
            .write(BleCharacteristic::NetworkType, &NetworkType::Scan.encode()?)
            .await
    }

    async fn end(&self, peripheral: &dyn Peripheral) -> Result<()> {
        peripheral
            .write(BleCharacteristic::NetworkType, &NetworkType::Client.encode()?)
            .await
    }
}

/// Wireless LAN control service.
#[derive(Debug, Clone, Copy)]
pub struct WlanControl<'a> {
    device: &'a ThetaDevice,
}

impl<'a> WlanControl<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Current network type.
    pub async fn get_network_type(&self) -> Result<NetworkType> {
        self.device.read(BleCharacteristic::NetworkType).await
    }

    /// Set network type.
    pub async fn set_network_type(&self, network_type: NetworkType) -> Result<()> {
        self.device
            .write(BleCharacteristic::NetworkType, &network_type)
            .await
    }

    /// Register or clear the network type handler.
    pub async fn set_network_type_notify(
        &self,
        callback: Option<NotifyCallback<NetworkType>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::NetworkType, callback)
            .await
    }

    /// Wi-Fi network the camera is joined to in client mode.
    pub async fn get_connected_wifi_info(&self) -> Result<ConnectedWifiInfo> {
        self.device.read(BleCharacteristic::ConnectedWifiInfo).await
    }

    /// Register or clear the connected Wi-Fi handler.
    pub async fn set_connected_wifi_info_notify(
        &self,
        callback: Option<NotifyCallback<ConnectedWifiInfo>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::ConnectedWifiInfo, callback)
            .await
    }

    /// Register an access point for client mode.
    pub async fn set_access_point(&self, access_point: &AccessPoint) -> Result<()> {
        self.device.transport(BleCharacteristic::SetAccessPoint)?;
        access_point.validate()?;
        self.device
            .write(BleCharacteristic::SetAccessPoint, access_point)
            .await
    }

    /// Start an SSID scan, replacing any scan in progress.
    ///
    /// `timeout` falls back to the configured scan timeout. `on_complete`
    /// receives the networks found once the scan stops or times out.
    pub async fn start_ssid_scan(
        &self,
        timeout: Option<Duration>,
        on_found: FoundCallback<ScannedSsid>,
        on_complete: CompleteCallback<ScannedSsid>,
    ) -> Result<()> {
        let peripheral = self.device.transport(SsidScan::NOTIFY)?;
        self.device.transport(BleCharacteristic::NetworkType)?;
        let timeout = timeout.unwrap_or(self.device.config().scan_timeout);
        self.device
            .ssid_scan
            .start(peripheral, timeout, on_found, on_complete)
            .await
    }

    /// Stop the SSID scan and restore client mode. A no-op when idle.
    pub async fn stop_ssid_scan(&self) -> Result<()> {
        let peripheral = self.device.connected_peripheral()?;
        self.device.ssid_scan.stop(peripheral).await
    }

    /// Whether an SSID scan is in progress.
    pub fn is_ssid_scanning(&self) -> bool {
        self.device.ssid_scan.is_scanning()
    }

    /// Networks found by the current or last SSID scan.
    pub fn scanned_ssids(&self) -> Vec<ScannedSsid> {
        self.device.ssid_scan.results()
    }
}
