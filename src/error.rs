//! Error types for the theta-rust-ble crate.

use thiserror::Error;

use crate::ble::uuids::BleCharacteristic;

/// The main error type for this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Bluetooth-related error from the underlying BLE transport.
    #[error("Bluetooth error: {0}")]
    Bluetooth(#[from] btleplug::Error),

    /// Bluetooth is not available or is disabled on this system.
    #[error("Bluetooth not available or disabled")]
    BluetoothUnavailable,

    /// Operation requires a connection but the camera is not connected.
    #[error("Not connected")]
    NotConnected,

    /// Failed to establish a connection to the camera.
    #[error("Connection failed: {reason}")]
    ConnectionFailed {
        /// Description of why the connection failed.
        reason: String,
    },

    /// The characteristic is absent from the connected camera's GATT table.
    #[error("Not supported: {characteristic}")]
    NotSupported {
        /// The characteristic that was requested.
        characteristic: BleCharacteristic,
    },

    /// A read or notification delivered zero bytes.
    #[error("Empty data: {characteristic}")]
    EmptyData {
        /// The characteristic that produced the empty payload.
        characteristic: BleCharacteristic,
    },

    /// A byte outside the known variant table for the characteristic.
    #[error("Unknown value: {value:#04x} from {characteristic}")]
    UnknownValue {
        /// The characteristic that produced the value.
        characteristic: BleCharacteristic,
        /// The raw byte that could not be mapped.
        value: u8,
    },

    /// Malformed JSON, text or record length.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Underlying parser diagnostic.
        message: String,
    },

    /// The camera rejected the command.
    #[error("Camera error ({code}): {message}")]
    Camera {
        /// Camera-supplied error code.
        code: String,
        /// Camera-supplied description.
        message: String,
    },

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter {
        /// The name of the parameter.
        name: String,
        /// The invalid value that was provided.
        value: String,
    },
}

impl Error {
    /// Application error raised when a command is not valid in the current camera state.
    pub fn disabled_command() -> Self {
        Self::Camera {
            code: "disabledCommand".to_string(),
            message: "Disabled Command".to_string(),
        }
    }

    /// Serialization error from any displayable diagnostic.
    pub(crate) fn serialization(message: impl std::fmt::Display) -> Self {
        Self::Serialization {
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_visible_messages() {
        assert!(Error::NotConnected.to_string().contains("Not connected"));
        let err = Error::EmptyData {
            characteristic: BleCharacteristic::BatteryLevel,
        };
        assert!(err.to_string().contains("Empty data"));
        let err = Error::UnknownValue {
            characteristic: BleCharacteristic::BatteryStatus,
            value: 0x7f,
        };
        assert!(err.to_string().contains("Unknown value"));
        assert!(err.to_string().contains("0x7f"));
        let err = Error::NotSupported {
            characteristic: BleCharacteristic::PluginOrders,
        };
        assert!(err.to_string().contains("Not supported"));
        assert!(Error::disabled_command()
            .to_string()
            .contains("Disabled Command"));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
