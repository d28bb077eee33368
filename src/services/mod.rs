//! GATT service views.
//!
//! Each view borrows a [`ThetaDevice`](crate::ThetaDevice) and exposes the
//! characteristics of one camera service as typed operations. Every operation
//! fails with [`Error::NotConnected`](crate::Error::NotConnected) without a
//! connection and with [`Error::NotSupported`](crate::Error::NotSupported)
//! when the camera does not expose the characteristic, before any transport
//! I/O takes place.

pub mod bluetooth_control;
pub mod camera_control;
pub mod camera_control_v2;
pub mod camera_information;
pub mod camera_status;
pub mod shooting_control;
pub mod shutter;
pub mod wlan_control;

pub use bluetooth_control::BluetoothControl;
pub use camera_control::CameraControl;
pub use camera_control_v2::CameraControlV2;
pub use camera_information::CameraInformation;
pub use camera_status::CameraStatus;
pub use shooting_control::ShootingControl;
pub use shutter::ShutterAction;
pub use wlan_control::WlanControl;
