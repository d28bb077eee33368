//! Camera control v2 service: JSON info, state and the options protocol.

use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::ble::notification::NotifyCallback;
use crate::ble::uuids::BleCharacteristic;
use crate::data::{CameraInfo, CameraState, CameraStateV2, OptionName, ThetaOptions};
use crate::device::ThetaDevice;
use crate::error::Result;
use crate::protocol::options;
use crate::services::shutter::{self, ShutterAction};

/// Camera control v2 service.
#[derive(Debug, Clone, Copy)]
pub struct CameraControlV2<'a> {
    device: &'a ThetaDevice,
}

impl<'a> CameraControlV2<'a> {
    pub(crate) fn new(device: &'a ThetaDevice) -> Self {
        Self { device }
    }

    /// Static camera information.
    pub async fn get_info(&self) -> Result<CameraInfo> {
        self.device.read(BleCharacteristic::GetInfo).await
    }

    /// Dynamic camera state.
    pub async fn get_state(&self) -> Result<CameraState> {
        self.device.read(BleCharacteristic::GetState).await
    }

    /// Extended camera state.
    pub async fn get_state2(&self) -> Result<CameraStateV2> {
        self.device.read(BleCharacteristic::GetState2).await
    }

    /// Register or clear the camera state handler.
    pub async fn set_state_notify(
        &self,
        callback: Option<NotifyCallback<CameraState>>,
    ) -> Result<()> {
        self.device
            .set_notify(BleCharacteristic::NotifyState, callback)
            .await
    }

    /// Read the named options. Names the camera leaves out stay unset.
    pub async fn get_options(&self, names: &[OptionName]) -> Result<ThetaOptions> {
        let data = self.exchange_options(names).await?;
        options::decode_get_response(names, &data)
    }

    /// Read options by raw name, returning the untyped JSON values.
    pub async fn get_options_by_string<S: AsRef<str> + Sync>(
        &self,
        names: &[S],
    ) -> Result<HashMap<String, Value>> {
        let data = self.exchange_options(names).await?;
        options::decode_get_response_by_string(names, &data)
    }

    /// Write the populated fields of `options`.
    pub async fn set_options(&self, options: &ThetaOptions) -> Result<()> {
        self.device.transport(BleCharacteristic::SetOptions)?;
        let request = options::encode_set_request(options)?;
        debug!("Setting options {:?}", options.names());
        self.device
            .write_bytes(BleCharacteristic::SetOptions, &request)
            .await
    }

    /// Take a picture, or start or stop video recording, depending on the
    /// camera's current capture mode.
    pub async fn release_shutter(&self) -> Result<ShutterAction> {
        shutter::release_shutter(self.device).await
    }

    /// Write the requested names, then read the response on the same
    /// characteristic.
    async fn exchange_options<S: AsRef<str> + Sync>(&self, names: &[S]) -> Result<Vec<u8>> {
        self.device.transport(BleCharacteristic::GetOptions)?;
        let request = options::encode_get_request(names)?;

        let _exchange = self.device.options_lock.lock().await;
        self.device
            .write_bytes(BleCharacteristic::GetOptions, &request)
            .await?;
        self.device.read_bytes(BleCharacteristic::GetOptions).await
    }
}
