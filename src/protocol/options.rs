//! Options protocol wire format.
//!
//! - Get request: JSON array of option names.
//! - Get response: JSON object keyed by option name; requested names that the
//!   camera does not return are simply left unset.
//! - Set request: JSON object holding only the populated options.

use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::ble::uuids::BleCharacteristic;
use crate::data::options::{OptionName, ThetaOptions};
use crate::error::{Error, Result};
use crate::protocol::codec::{decode_json_value, encode_json};

/// Encode the list of names to request.
pub fn encode_get_request<S: AsRef<str>>(names: &[S]) -> Result<Vec<u8>> {
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    encode_json(&names)
}

/// Parse the response object.
fn decode_response_object(data: &[u8]) -> Result<Map<String, Value>> {
    match decode_json_value(BleCharacteristic::GetOptions, data)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::Serialization {
            message: format!("Options response is not an object: {}", other),
        }),
    }
}

/// Decode the typed response for `names`.
pub fn decode_get_response(names: &[OptionName], data: &[u8]) -> Result<ThetaOptions> {
    let map = decode_response_object(data)?;
    let mut options = ThetaOptions::new();

    for &name in names {
        match map.get(name.as_str()) {
            Some(value) => options.set_field_from_json(name, value)?,
            None => debug!("Option {} absent from response", name),
        }
    }

    Ok(options)
}

/// Decode the untyped response for `names`.
pub fn decode_get_response_by_string<S: AsRef<str>>(
    names: &[S],
    data: &[u8],
) -> Result<HashMap<String, Value>> {
    let mut map = decode_response_object(data)?;
    Ok(names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            map.remove(name).map(|value| (name.to_string(), value))
        })
        .collect())
}

/// Encode the populated fields of `options`.
pub fn encode_set_request(options: &ThetaOptions) -> Result<Vec<u8>> {
    let map = options.to_json_map()?;
    if map.is_empty() {
        return Err(Error::InvalidParameter {
            name: "options".to_string(),
            value: "empty".to_string(),
        });
    }
    encode_json(&Value::Object(map))
}
