//! Plugin management records.
//!
//! Wire layouts:
//! - Plugin control: status(1) + optional plugin index(1)
//! - Plugin orders: three slot indices, one byte each

use crate::ble::uuids::BleCharacteristic;
use crate::error::{Error, Result};
use crate::protocol::codec::{decode_record, ByteEnum, ByteRecord, Decode, Encode};

/// Plugin power status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PluginPowerStatus {
    /// No plugin running.
    Stop = 0,
    /// A plugin is running.
    Running = 1,
}

impl ByteEnum for PluginPowerStatus {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Stop),
            1 => Some(Self::Running),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Plugin control record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginControl {
    /// Running or stopped.
    pub status: PluginPowerStatus,
    /// Plugin index to start, if any.
    pub plugin: Option<u8>,
}

impl PluginControl {
    /// Stop the running plugin.
    pub fn stop() -> Self {
        Self {
            status: PluginPowerStatus::Stop,
            plugin: None,
        }
    }

    /// Start the plugin at `index`.
    pub fn running(index: u8) -> Self {
        Self {
            status: PluginPowerStatus::Running,
            plugin: Some(index),
        }
    }
}

impl ByteRecord for PluginControl {
    fn parse(data: &[u8]) -> Result<Self> {
        let (status, plugin) = match data {
            [status] => (*status, None),
            [status, plugin] => (*status, Some(*plugin)),
            _ => {
                return Err(Error::Serialization {
                    message: format!("PluginControl expects 1 or 2 bytes, got {}", data.len()),
                })
            }
        };
        let status = PluginPowerStatus::from_raw(status).ok_or(Error::UnknownValue {
            characteristic: BleCharacteristic::PluginControl,
            value: status,
        })?;
        Ok(Self { status, plugin })
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.status.to_raw()];
        if let Some(plugin) = self.plugin {
            bytes.push(plugin);
        }
        bytes
    }
}

impl Decode for PluginControl {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_record(characteristic, data).map_err(|e| match e {
            Error::UnknownValue { value, .. } => Error::UnknownValue {
                characteristic,
                value,
            },
            other => other,
        })
    }
}

impl Encode for PluginControl {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_bytes())
    }
}

/// Plugin boot order: the plugin index assigned to each of the three slots.
///
/// Index 0 marks an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PluginOrders(pub [u8; 3]);

impl PluginOrders {
    /// Wire size in bytes.
    pub const SIZE: usize = 3;

    /// The first non-empty slot.
    pub fn first(&self) -> Option<u8> {
        self.0.iter().copied().find(|&index| index != 0)
    }
}

impl ByteRecord for PluginOrders {
    fn parse(data: &[u8]) -> Result<Self> {
        let slots: [u8; Self::SIZE] = data.try_into().map_err(|_| Error::Serialization {
            message: format!(
                "PluginOrders expects {} bytes, got {}",
                Self::SIZE,
                data.len()
            ),
        })?;
        Ok(Self(slots))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl Decode for PluginOrders {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_record(characteristic, data)
    }
}

impl Encode for PluginOrders {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_bytes())
    }
}
