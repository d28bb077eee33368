//! Typed characteristic values.
//!
//! Single-byte enumerations, fixed-layout plugin records, and the JSON
//! records exchanged with the camera control v2 and wireless LAN services.

pub mod camera;
pub mod network;
pub mod options;
pub mod plugin;
pub mod shooting;
pub mod status;

pub use camera::{BatteryState, CameraInfo, CameraState, CameraStateV2, CaptureStatus, GpsInfo};
pub use network::{
    AccessPoint, ConnectedWifiInfo, IpAddressAllocation, NetworkType, PeripheralDevice,
    ScannedSsid, WlanFrequency, WlanSecurity,
};
pub use options::{AccessInfo, DhcpLeaseAddress, OptionName, ThetaOptions};
pub use plugin::{PluginControl, PluginOrders, PluginPowerStatus};
pub use shooting::{CaptureCommand, CaptureMode, FileFormat, TAKE_PICTURE_COMMAND};
pub use status::{CameraPower, ChargingState, CommandErrorDescription};
