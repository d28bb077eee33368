//! GATT transport capability.
//!
//! [`Peripheral`] is the small surface the rest of the crate needs from a BLE
//! stack. [`BtlePeripheral`] implements it on top of `btleplug`.

use async_trait::async_trait;
use btleplug::api::{Characteristic, Peripheral as _, WriteType};
use btleplug::platform::Peripheral as PlatformPeripheral;
use futures::stream::{BoxStream, StreamExt};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::ble::uuids::BleCharacteristic;
use crate::error::{Error, Result};

/// Stream of raw notification payloads for one characteristic.
pub type NotificationStream = BoxStream<'static, Vec<u8>>;

/// Transport primitives supplied by a platform BLE stack.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Peripheral: Send + Sync {
    /// Establish the link and discover the GATT table.
    async fn connect(&self) -> Result<()>;

    /// Tear down the link.
    async fn disconnect(&self) -> Result<()>;

    /// Whether the link is currently up.
    async fn is_connected(&self) -> bool;

    /// Whether the discovered GATT table contains the characteristic.
    fn contains(&self, characteristic: BleCharacteristic) -> bool;

    /// Read the current value.
    async fn read(&self, characteristic: BleCharacteristic) -> Result<Vec<u8>>;

    /// Write a value.
    async fn write(&self, characteristic: BleCharacteristic, data: &[u8]) -> Result<()>;

    /// Enable notifications and return the payload stream.
    async fn observe(&self, characteristic: BleCharacteristic) -> Result<NotificationStream>;

    /// Disable notifications.
    async fn stop_observing(&self, characteristic: BleCharacteristic) -> Result<()>;
}

/// [`Peripheral`] backed by a `btleplug` platform peripheral.
pub struct BtlePeripheral {
    /// The peripheral to communicate with.
    peripheral: PlatformPeripheral,
    /// Cached characteristics, filled on connect.
    characteristics: Arc<RwLock<HashMap<BleCharacteristic, Characteristic>>>,
    /// Write type used for every write.
    write_type: WriteType,
}

impl BtlePeripheral {
    /// Wrap a platform peripheral.
    pub fn new(peripheral: PlatformPeripheral) -> Self {
        Self {
            peripheral,
            characteristics: Arc::new(RwLock::new(HashMap::new())),
            write_type: WriteType::WithResponse,
        }
    }

    /// Select between acknowledged and unacknowledged writes.
    pub fn with_response(mut self, with_response: bool) -> Self {
        self.write_type = if with_response {
            WriteType::WithResponse
        } else {
            WriteType::WithoutResponse
        };
        self
    }

    /// The wrapped platform peripheral.
    pub fn inner(&self) -> &PlatformPeripheral {
        &self.peripheral
    }

    /// Cache every known characteristic present in the discovered services.
    fn discover_characteristics(&self) {
        let mut chars = self.characteristics.write();
        chars.clear();

        for service in self.peripheral.services() {
            for characteristic in service.characteristics {
                match BleCharacteristic::from_uuid(&characteristic.uuid) {
                    Some(known) => {
                        debug!("Found {} in service {}", known, service.uuid);
                        chars.insert(known, characteristic);
                    }
                    None => trace!("Ignoring characteristic {}", characteristic.uuid),
                }
            }
        }

        debug!("Discovered {} characteristics", chars.len());
    }

    fn characteristic(&self, characteristic: BleCharacteristic) -> Result<Characteristic> {
        self.characteristics
            .read()
            .get(&characteristic)
            .cloned()
            .ok_or(Error::NotSupported { characteristic })
    }
}

#[async_trait]
impl Peripheral for BtlePeripheral {
    async fn connect(&self) -> Result<()> {
        if !self.peripheral.is_connected().await.unwrap_or(false) {
            self.peripheral.connect().await?;
        }
        self.peripheral.discover_services().await?;
        self.discover_characteristics();
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        self.peripheral.disconnect().await?;
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.peripheral.is_connected().await.unwrap_or(false)
    }

    fn contains(&self, characteristic: BleCharacteristic) -> bool {
        self.characteristics.read().contains_key(&characteristic)
    }

    async fn read(&self, characteristic: BleCharacteristic) -> Result<Vec<u8>> {
        let target = self.characteristic(characteristic)?;
        let data = self.peripheral.read(&target).await?;
        trace!("Read {} bytes from {}: {:02X?}", data.len(), characteristic, data);
        Ok(data)
    }

    async fn write(&self, characteristic: BleCharacteristic, data: &[u8]) -> Result<()> {
        let target = self.characteristic(characteristic)?;
        self.peripheral.write(&target, data, self.write_type).await?;
        trace!("Wrote {} bytes to {}: {:02X?}", data.len(), characteristic, data);
        Ok(())
    }

    async fn observe(&self, characteristic: BleCharacteristic) -> Result<NotificationStream> {
        let target = self.characteristic(characteristic)?;
        let uuid = target.uuid;

        // Take the stream before enabling notifications so no early payload is lost.
        let notifications = self.peripheral.notifications().await?;
        self.peripheral.subscribe(&target).await?;
        debug!("Subscribed to notifications from {}", characteristic);

        Ok(notifications
            .filter_map(move |n| async move { (n.uuid == uuid).then_some(n.value) })
            .boxed())
    }

    async fn stop_observing(&self, characteristic: BleCharacteristic) -> Result<()> {
        let target = self.characteristic(characteristic)?;
        self.peripheral.unsubscribe(&target).await?;
        debug!("Unsubscribed from notifications from {}", characteristic);
        Ok(())
    }
}

impl std::fmt::Debug for BtlePeripheral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtlePeripheral")
            .field("id", &self.peripheral.id())
            .field("characteristics", &self.characteristics.read().len())
            .finish()
    }
}
