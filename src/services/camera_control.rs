//! Camera control service: power and plugins.

use tracing::debug;

use crate::ble::notification::NotifyCallback;
use crate::ble::uuids::BleCharacteristic;
use crate::data::{CameraPower, PluginControl, PluginOrders, PluginPowerStatus};
use crate::device::ThetaDevice;
use crate::error::Result;

/// Camera control service.
#[derive(Debug, Clone, Copy)]
pub struct CameraControl<'a> {
    device: &'a ThetaDevice,
}

impl<'a> CameraControl<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Switch the camera on, off or to sleep.
    pub async fn set_camera_power(&self, power: CameraPower) -> Result<()> {
        self.device
            .write(BleCharacteristic::CameraPower, &power)
            .await
    }

    /// Current plugin state.
    pub async fn get_plugin_control(&self) -> Result<PluginControl> {
        self.device.read(BleCharacteristic::PluginControl).await
    }

    /// Start or stop a plugin.
    ///
    /// `Running` without a plugin index starts the first plugin in the
    /// camera's plugin order. Failing to read the order fails the call.
    pub async fn set_plugin_control(&self, control: PluginControl) -> Result<()> {
        self.device.transport(BleCharacteristic::PluginControl)?;

        let control = match control {
            PluginControl {
                status: PluginPowerStatus::Running,
                plugin: None,
            } => {
                let orders = self.get_plugin_orders().await?;
                let plugin = orders.first();
                debug!("Starting first plugin in order: {:?}", plugin);
                PluginControl {
                    status: PluginPowerStatus::Running,
                    plugin,
                }
            }
            other => other,
        };

        self.device
            .write(BleCharacteristic::PluginControl, &control)
            .await
    }

    /// Register or clear the plugin state handler.
    pub async fn set_plugin_control_notify(
        &self,
        callback: Option<NotifyCallback<PluginControl>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::PluginControl, callback)
            .await
    }

    /// Plugin slot order.
    pub async fn get_plugin_orders(&self) -> Result<PluginOrders> {
        self.device.read(BleCharacteristic::PluginOrders).await
    }

    /// Set the plugin slot order.
    pub async fn set_plugin_orders(&self, orders: PluginOrders) -> Result<()> {
        self.device
            .write(BleCharacteristic::PluginOrders, &orders)
            .await
    }
}
