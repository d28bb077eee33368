//! Camera information service: static identity strings.

use crate::ble::uuids::BleCharacteristic;
use crate::device::ThetaDevice;
use crate::error::Result;

/// Camera information service.
#[derive(Debug, Clone, Copy)]
pub struct CameraInformation<'a> {
    device: &'a ThetaDevice,
}

impl<'a> CameraInformation<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Firmware version, e.g. `"1.40.0"`.
    pub async fn get_firmware_revision(&self) -> Result<String> {
        self.device.read(BleCharacteristic::FirmwareRevision).await
    }

    /// Manufacturer name.
    pub async fn get_manufacturer_name(&self) -> Result<String> {
        self.device.read(BleCharacteristic::ManufacturerName).await
    }

    /// Model number.
    pub async fn get_model_number(&self) -> Result<String> {
        self.device.read(BleCharacteristic::ModelNumber).await
    }

    /// Serial number.
    pub async fn get_serial_number(&self) -> Result<String> {
        self.device.read(BleCharacteristic::SerialNumber).await
    }

    /// Wireless LAN MAC address.
    pub async fn get_wlan_mac_address(&self) -> Result<String> {
        self.device.read(BleCharacteristic::WlanMacAddress).await
    }

    /// Bluetooth MAC address.
    pub async fn get_bluetooth_mac_address(&self) -> Result<String> {
        self.device.read(BleCharacteristic::BluetoothMacAddress).await
    }
}
