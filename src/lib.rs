// Allow derivable impls for clarity
#![allow(clippy::derivable_impls)]
// Allow unusual byte groupings for UUIDs which have standard format
#![allow(clippy::unusual_byte_groupings)]

//! # theta-rust-ble
//!
//! A cross-platform Rust library for controlling RICOH THETA 360° cameras over
//! Bluetooth Low Energy.
//!
//! ## Features
//!
//! - **Camera Discovery**: Find nearby cameras by advertised name
//! - **Status**: Battery level, charging state, power and command errors,
//!   readable and notifiable
//! - **Shooting**: Capture mode, file format, still pictures and video
//! - **Shutter Release**: One call that does the right thing for the current mode
//! - **Options**: Named camera settings over the JSON options protocol
//! - **Wireless LAN**: Network type, access points and SSID scans
//! - **Accessories**: Scan for Bluetooth remotes and GPS units
//! - **Multi-camera Support**: Each [`ThetaDevice`] is an independent handle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use theta_rust_ble::{BleScanner, ClientConfig, Result, ThetaDevice};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::default();
//!     let scanner = BleScanner::new(config.clone()).await?;
//!
//!     for camera in scanner.discover().await? {
//!         println!("Found camera: {} ({})", camera.name, camera.identifier);
//!
//!         let device = ThetaDevice::from_discovered(camera, config.clone());
//!         device.connect().await?;
//!
//!         let battery = device.camera_status().get_battery_level().await?;
//!         println!("  Battery: {}%", battery);
//!
//!         let action = device.release_shutter().await?;
//!         println!("  Shutter: {:?}", action);
//!
//!         device.disconnect().await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Platform Notes
//!
//! ### macOS
//! Requires Bluetooth permission. Add `NSBluetoothAlwaysUsageDescription`
//! to your Info.plist for bundled apps.
//!
//! ### Linux
//! Requires BlueZ. User may need to be in the `bluetooth` group.
//!
//! ### Windows
//! Requires Windows 10 or later with Bluetooth LE support.

// Public modules
pub mod ble;
pub mod config;
pub mod data;
pub mod device;
pub mod error;
pub mod protocol;
pub mod scan;
pub mod services;

// Re-exports for convenience
pub use ble::connection::{ConnectionEvent, ConnectionState};
pub use ble::notification::NotifyCallback;
pub use ble::peripheral::{BtlePeripheral, NotificationStream, Peripheral};
pub use ble::scanner::{BleScanner, DiscoveredCamera};
pub use ble::uuids::{BleCharacteristic, BleService};
pub use config::ClientConfig;
pub use device::ThetaDevice;
pub use error::{Error, Result};
pub use scan::{CompleteCallback, FoundCallback, DEFAULT_SCAN_TIMEOUT};
pub use services::ShutterAction;

// Re-export commonly used types from submodules
pub use data::{
    AccessInfo, AccessPoint, BatteryState, CameraInfo, CameraPower, CameraState, CameraStateV2,
    CaptureCommand, CaptureMode, CaptureStatus, ChargingState, CommandErrorDescription,
    ConnectedWifiInfo, FileFormat, NetworkType, OptionName, PeripheralDevice, PluginControl,
    PluginOrders, PluginPowerStatus, ScannedSsid, ThetaOptions, WlanFrequency, WlanSecurity,
};
