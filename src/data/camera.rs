//! Camera info and state records from the control v2 service.

use serde::{Deserialize, Serialize};

use crate::ble::uuids::BleCharacteristic;
use crate::error::Result;
use crate::protocol::codec::{decode_json, Decode};

/// Static camera information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Serial number.
    pub serial_number: String,
    /// Wireless LAN MAC address.
    #[serde(default)]
    pub wlan_mac_address: Option<String>,
    /// Bluetooth MAC address.
    #[serde(default)]
    pub bluetooth_mac_address: Option<String>,
    /// Firmware version.
    pub firmware_version: String,
    /// Seconds since boot.
    #[serde(default)]
    pub uptime: u64,
}

impl Decode for CameraInfo {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}

/// Capture status in the camera state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureStatus {
    /// Nothing in progress.
    #[serde(rename = "idle")]
    Idle,
    /// Recording video or shooting an interval sequence.
    #[serde(rename = "shooting")]
    Shooting,
    /// Self-timer counting down.
    #[serde(rename = "self_timer_countdown")]
    SelfTimerCountdown,
    /// Bracket shooting.
    #[serde(rename = "bracket_shooting")]
    BracketShooting,
    /// Converting the captured image.
    #[serde(rename = "converting")]
    Converting,
    /// Time-shift shooting.
    #[serde(rename = "timeShift_shooting")]
    TimeShiftShooting,
    /// Continuous shooting.
    #[serde(rename = "continuous_shooting")]
    ContinuousShooting,
    /// Retrospective video recording.
    #[serde(rename = "retrospective_image_recording")]
    RetrospectiveImageRecording,
}

/// Battery state as reported in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatteryState {
    /// Charging.
    Charging,
    /// Fully charged.
    Charged,
    /// Running on battery.
    Disconnect,
}

/// Dynamic camera state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    /// Battery level, 0.0-1.0.
    pub battery_level: f64,
    /// Charging state.
    #[serde(default)]
    pub battery_state: Option<BatteryState>,
    /// Capture status.
    pub capture_status: CaptureStatus,
    /// Seconds recorded in the current video.
    #[serde(default)]
    pub recorded_time: u64,
    /// Seconds of video that fit in remaining storage.
    #[serde(default)]
    pub recordable_time: u64,
    /// Pictures captured in the current sequence.
    #[serde(default)]
    pub captured_pictures: u32,
    /// URL of the last saved file.
    #[serde(default)]
    pub latest_file_url: Option<String>,
    /// Active camera error codes.
    #[serde(default)]
    pub camera_error: Vec<String>,
}

impl Decode for CameraState {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}

/// GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsInfo {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Altitude in metres.
    #[serde(default)]
    pub altitude: f64,
    /// Fix time, "YYYY:MM:DD hh:mm:ss+(-)hh:mm".
    #[serde(default)]
    pub date_time_zone: Option<String>,
}

/// Extended camera state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraStateV2 {
    /// GPS info from a paired accessory.
    #[serde(default)]
    pub external_gps_info: Option<GpsInfo>,
    /// GPS info from the built-in receiver.
    #[serde(default)]
    pub internal_gps_info: Option<GpsInfo>,
    /// Board temperature in Celsius.
    #[serde(default)]
    pub board_temp: Option<i32>,
    /// Battery temperature in Celsius.
    #[serde(default)]
    pub battery_temp: Option<i32>,
}

impl Decode for CameraStateV2 {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}
