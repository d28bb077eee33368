//! BLE communication module.
//!
//! This module provides the transport layer: the characteristic table, the
//! GATT capability trait and its btleplug backend, connection state,
//! notification routing, and discovery of nearby cameras.

pub mod connection;
pub mod notification;
pub mod peripheral;
pub mod scanner;
pub mod uuids;

pub use connection::{ConnectionEvent, ConnectionManager, ConnectionState};
pub use notification::{NotificationManager, NotifyCallback};
pub use peripheral::{BtlePeripheral, NotificationStream, Peripheral};
pub use scanner::{BleScanner, DiscoveredCamera};
pub use uuids::*;
