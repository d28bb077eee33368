//! Bluetooth control service: accessory scanning.

use async_trait::async_trait;
use std::time::Duration;

use crate::ble::peripheral::Peripheral;
use crate::ble::uuids::BleCharacteristic;
use crate::data::PeripheralDevice;
use crate::device::ThetaDevice;
use crate::error::Result;
use crate::scan::{CompleteCallback, FoundCallback, ScanKind};

/// Value written to start an accessory scan.
const START_SCAN_COMMAND: u8 = 0x01;

/// Accessory scan: asks the camera to look for nearby Bluetooth accessories
/// (remote shutters, GPS units) and collects them by MAC address.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessoryScan;

#[async_trait]
impl ScanKind for AccessoryScan {
    type Item = PeripheralDevice;
    type Key = String;
    const NOTIFY: BleCharacteristic = BleCharacteristic::NotifyScannedPeripheralDevice;
    const NAME: &'static str = "Accessory";

    fn key(item: &PeripheralDevice) -> String {
        item.mac_address.clone()
    }

    async fn begin(&self, peripheral: &dyn Peripheral) -> Result<()> {
        peripheral
            .write(BleCharacteristic::ScanPeripheralDevice, &[START_SCAN_COMMAND])
            .await
    }

    async fn end(&self, _peripheral: &dyn Peripheral) -> Result<()> {
        // Nothing to restore.
        Ok(())
    }
}

/// Bluetooth control service.
#[derive(Debug, Clone, Copy)]
pub struct BluetoothControl<'a> {
    device: &'a ThetaDevice,
}

impl<'a> BluetoothControl<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Start an accessory scan, replacing any scan in progress.
    ///
    /// Each report goes to `on_found`; a repeat report for the same MAC
    /// address replaces the earlier one. `on_complete` receives the list once
    /// the scan stops or times out.
    pub async fn start_peripheral_device_scan(
        &self,
        timeout: Option<Duration>,
        on_found: FoundCallback<PeripheralDevice>,
        on_complete: CompleteCallback<PeripheralDevice>,
    ) -> Result<()> {
        let peripheral = self.device.transport(AccessoryScan::NOTIFY)?;
        self.device
            .transport(BleCharacteristic::ScanPeripheralDevice)?;
        let timeout = timeout.unwrap_or(self.device.config().scan_timeout);
        self.device
            .accessory_scan
            .start(peripheral, timeout, on_found, on_complete)
            .await
    }

    /// Stop the accessory scan. A no-op when idle.
    pub async fn stop_peripheral_device_scan(&self) -> Result<()> {
        let peripheral = self.device.connected_peripheral()?;
        self.device.accessory_scan.stop(peripheral).await
    }

    /// Whether an accessory scan is in progress.
    pub fn is_peripheral_device_scanning(&self) -> bool {
        self.device.accessory_scan.is_scanning()
    }

    /// Accessories found by the current or last scan.
    pub fn scanned_peripheral_devices(&self) -> Vec<PeripheralDevice> {
        self.device.accessory_scan.results()
    }
}
