//! Shooting control service.

use crate::ble::uuids::BleCharacteristic;
use crate::data::{CaptureCommand, CaptureMode, FileFormat, TAKE_PICTURE_COMMAND};
use crate::device::ThetaDevice;
use crate::error::Result;

/// Shooting control service.
#[derive(Debug, Clone, Copy)]
pub struct ShootingControl<'a> {
    device: &'a ThetaDevice,
}

impl<'a> ShootingControl<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Current capture mode.
    pub async fn get_capture_mode(&self) -> Result<CaptureMode> {
        self.device.read(BleCharacteristic::CaptureMode).await
    }

    /// Switch capture mode.
    pub async fn set_capture_mode(&self, mode: CaptureMode) -> Result<()> {
        self.device
            .write(BleCharacteristic::CaptureMode, &mode)
            .await
    }

    /// Current file format.
    pub async fn get_file_format(&self) -> Result<FileFormat> {
        self.device.read(BleCharacteristic::FileFormat).await
    }

    /// Set file format.
    pub async fn set_file_format(&self, format: FileFormat) -> Result<()> {
        self.device
            .write(BleCharacteristic::FileFormat, &format)
            .await
    }

    /// Take a still picture.
    pub async fn take_picture(&self) -> Result<()> {
        self.device
            .write_bytes(BleCharacteristic::TakePicture, &[TAKE_PICTURE_COMMAND])
            .await
    }

    /// Start video recording.
    pub async fn start_capture(&self) -> Result<()> {
        self.device
            .write(BleCharacteristic::CaptureControl, &CaptureCommand::Start)
            .await
    }

    /// Stop video recording.
    pub async fn stop_capture(&self) -> Result<()> {
        self.device
            .write(BleCharacteristic::CaptureControl, &CaptureCommand::Stop)
            .await
    }
}
