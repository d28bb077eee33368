//! Value codec layer.
//!
//! Every characteristic payload is one of four shapes:
//! - a single byte, either an unsigned scalar or an entry of a fixed variant table
//! - a UTF-8 JSON object
//! - a fixed-layout binary record
//! - free UTF-8 text
//!
//! All decoders reject empty payloads with [`Error::EmptyData`] before looking
//! at the content.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::ble::uuids::BleCharacteristic;
use crate::error::{Error, Result};

/// A type that can be decoded from a characteristic payload.
pub trait Decode: Sized {
    /// Decode `data` read or notified from `characteristic`.
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self>;
}

/// A type that can be encoded into a characteristic payload.
pub trait Encode {
    /// Encode into the wire representation.
    fn encode(&self) -> Result<Vec<u8>>;
}

/// A single-byte enumeration with a fixed variant table.
pub trait ByteEnum: Sized + Copy {
    /// Map a raw byte to a variant, `None` if the byte is not in the table.
    fn from_raw(value: u8) -> Option<Self>;

    /// Convert to the raw byte.
    fn to_raw(self) -> u8;
}

/// Fixed-layout multi-byte record.
pub trait ByteRecord: Sized {
    /// Parse from the exact wire bytes. `data` is never empty.
    fn parse(data: &[u8]) -> Result<Self>;

    /// Serialize to wire bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Return `data` unchanged, or [`Error::EmptyData`] if it has no bytes.
pub fn ensure_not_empty(characteristic: BleCharacteristic, data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() {
        return Err(Error::EmptyData { characteristic });
    }
    Ok(data)
}

/// Decode the first byte as an unsigned scalar.
pub fn decode_u8(characteristic: BleCharacteristic, data: &[u8]) -> Result<u8> {
    Ok(ensure_not_empty(characteristic, data)?[0])
}

/// Decode the first byte through a variant table.
pub fn decode_enum<T: ByteEnum>(characteristic: BleCharacteristic, data: &[u8]) -> Result<T> {
    let value = decode_u8(characteristic, data)?;
    T::from_raw(value).ok_or(Error::UnknownValue {
        characteristic,
        value,
    })
}

/// Decode UTF-8 text.
pub fn decode_string(characteristic: BleCharacteristic, data: &[u8]) -> Result<String> {
    let data = ensure_not_empty(characteristic, data)?;
    String::from_utf8(data.to_vec()).map_err(|e| Error::Serialization {
        message: format!("Invalid UTF-8 in {}: {}", characteristic, e),
    })
}

/// Parse a JSON payload into an untyped value.
///
/// A top-level object carrying an `"error"` member is the camera rejecting the
/// command and becomes [`Error::Camera`].
pub fn decode_json_value(characteristic: BleCharacteristic, data: &[u8]) -> Result<Value> {
    let data = ensure_not_empty(characteristic, data)?;
    let value: Value = serde_json::from_slice(data)?;
    if let Some(error) = value.get("error") {
        return Err(camera_error(error));
    }
    Ok(value)
}

/// Decode a JSON payload into `T`.
pub fn decode_json<T: DeserializeOwned>(
    characteristic: BleCharacteristic,
    data: &[u8],
) -> Result<T> {
    let value = decode_json_value(characteristic, data)?;
    Ok(serde_json::from_value(value)?)
}

/// Encode `value` as UTF-8 JSON.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a fixed-layout record.
pub fn decode_record<T: ByteRecord>(characteristic: BleCharacteristic, data: &[u8]) -> Result<T> {
    T::parse(ensure_not_empty(characteristic, data)?)
}

fn camera_error(error: &Value) -> Error {
    let field = |name: &str| {
        error
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match (field("code"), field("message")) {
        (Some(code), Some(message)) => Error::Camera { code, message },
        (Some(code), None) => Error::Camera {
            message: code.clone(),
            code,
        },
        (None, Some(message)) => Error::Camera {
            code: "unknown".to_string(),
            message,
        },
        (None, None) => Error::Camera {
            code: "unknown".to_string(),
            message: error.to_string(),
        },
    }
}

impl<T: ByteEnum> Decode for T {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_enum(characteristic, data)
    }
}

impl<T: ByteEnum> Encode for T {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(vec![self.to_raw()])
    }
}

impl Decode for u8 {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_u8(characteristic, data)
    }
}

impl Decode for String {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_string(characteristic, data)
    }
}

impl Decode for Value {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json_value(characteristic, data)
    }
}
