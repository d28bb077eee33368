//! Camera status service.

use crate::ble::notification::NotifyCallback;
use crate::ble::uuids::BleCharacteristic;
use crate::data::{CameraPower, ChargingState, CommandErrorDescription};
use crate::device::ThetaDevice;
use crate::error::Result;

/// Camera status service.
#[derive(Debug, Clone, Copy)]
pub struct CameraStatus<'a> {
    device: &'a ThetaDevice,
}

impl<'a> CameraStatus<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Battery level in percent.
    pub async fn get_battery_level(&self) -> Result<u8> {
        self.device.read(BleCharacteristic::BatteryLevel).await
    }

    /// Register or clear the battery level handler.
    pub async fn set_battery_level_notify(
        &self,
        callback: Option<NotifyCallback<u8>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::BatteryLevel, callback)
            .await
    }

    /// Charging state.
    pub async fn get_battery_status(&self) -> Result<ChargingState> {
        self.device.read(BleCharacteristic::BatteryStatus).await
    }

    /// Register or clear the charging state handler.
    pub async fn set_battery_status_notify(
        &self,
        callback: Option<NotifyCallback<ChargingState>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::BatteryStatus, callback)
            .await
    }

    /// Power state.
    pub async fn get_camera_power(&self) -> Result<CameraPower> {
        self.device.read(BleCharacteristic::CameraPower).await
    }

    /// Register or clear the power state handler.
    pub async fn set_camera_power_notify(
        &self,
        callback: Option<NotifyCallback<CameraPower>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::CameraPower, callback)
            .await
    }

    /// Why the last command was rejected.
    pub async fn get_command_error_description(&self) -> Result<CommandErrorDescription> {
        self.device
            .read(BleCharacteristic::CommandErrorDescription)
            .await
    }

    /// Register or clear the command error handler.
    pub async fn set_command_error_description_notify(
        &self,
        callback: Option<NotifyCallback<CommandErrorDescription>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::CommandErrorDescription, callback)
            .await
    }
}
