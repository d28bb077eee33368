//! Camera options.
//!
//! [`ThetaOptions`] is a sparse record: every field is optional and only the
//! populated fields travel on the wire. The JSON mapping of each field is
//! written out explicitly in [`ThetaOptions::field_to_json`] and
//! [`ThetaOptions::set_field_from_json`].

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::data::network::WlanFrequency;
use crate::data::shooting::CaptureMode;
use crate::error::{Error, Result};

/// Wire format of `dateTimeZone`.
pub const DATE_TIME_ZONE_FORMAT: &str = "%Y:%m:%d %H:%M:%S%:z";

/// Option identifiers understood by the options protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionName {
    /// Network attachment details (read only).
    AccessInfo,
    /// Capture mode.
    CaptureMode,
    /// Camera clock.
    DateTimeZone,
    /// Auto power-off delay in seconds.
    OffDelay,
    /// Access point mode password.
    Password,
    /// Sleep delay in seconds.
    SleepDelay,
    /// Access point mode SSID.
    Ssid,
    /// Digest authentication user name.
    Username,
    /// Access point mode frequency band.
    WlanFrequency,
}

impl OptionName {
    /// All option names.
    pub const ALL: [OptionName; 9] = [
        Self::AccessInfo,
        Self::CaptureMode,
        Self::DateTimeZone,
        Self::OffDelay,
        Self::Password,
        Self::SleepDelay,
        Self::Ssid,
        Self::Username,
        Self::WlanFrequency,
    ];

    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessInfo => "_accessInfo",
            Self::CaptureMode => "captureMode",
            Self::DateTimeZone => "dateTimeZone",
            Self::OffDelay => "offDelay",
            Self::Password => "_password",
            Self::SleepDelay => "sleepDelay",
            Self::Ssid => "_ssid",
            Self::Username => "_username",
            Self::WlanFrequency => "_wlanFrequency",
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OptionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for OptionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::InvalidParameter {
                name: "option".to_string(),
                value: s.to_string(),
            })
    }
}

/// A DHCP lease handed out by the camera in access point mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpLeaseAddress {
    /// Leased IP address.
    pub ip_address: String,
    /// Client MAC address.
    pub mac_address: String,
    /// Client host name.
    #[serde(default)]
    pub host_name: String,
}

/// Current network attachment of the camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessInfo {
    /// SSID in use.
    pub ssid: String,
    /// IP address.
    pub ip_address: String,
    /// Subnet mask.
    pub subnet_mask: String,
    /// Default gateway.
    pub default_gateway: String,
    /// Proxy URL.
    #[serde(rename = "proxyURL", default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// Frequency band.
    pub frequency: WlanFrequency,
    /// Wireless signal strength in dBm.
    pub wlan_signal_strength: i32,
    /// Wireless signal level 0-4.
    pub wlan_signal_level: i32,
    /// LTE signal strength in dBm.
    #[serde(default)]
    pub lte_signal_strength: i32,
    /// LTE signal level 0-4.
    #[serde(default)]
    pub lte_signal_level: i32,
    /// Leases handed out in access point mode.
    #[serde(
        rename = "_dhcpLeaseAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dhcp_lease_address: Option<Vec<DhcpLeaseAddress>>,
}

/// Sparse set of camera options.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThetaOptions {
    /// See [`OptionName::AccessInfo`].
    pub access_info: Option<AccessInfo>,
    /// See [`OptionName::CaptureMode`].
    pub capture_mode: Option<CaptureMode>,
    /// See [`OptionName::DateTimeZone`].
    pub date_time_zone: Option<DateTime<FixedOffset>>,
    /// See [`OptionName::OffDelay`].
    pub off_delay: Option<u32>,
    /// See [`OptionName::Password`].
    pub password: Option<String>,
    /// See [`OptionName::SleepDelay`].
    pub sleep_delay: Option<u32>,
    /// See [`OptionName::Ssid`].
    pub ssid: Option<String>,
    /// See [`OptionName::Username`].
    pub username: Option<String>,
    /// See [`OptionName::WlanFrequency`].
    pub wlan_frequency: Option<WlanFrequency>,
}

impl ThetaOptions {
    /// Empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture mode.
    pub fn with_capture_mode(mut self, mode: CaptureMode) -> Self {
        self.capture_mode = Some(mode);
        self
    }

    /// Set the access point SSID.
    pub fn with_ssid(mut self, ssid: impl Into<String>) -> Self {
        self.ssid = Some(ssid.into());
        self
    }

    /// Set the access point password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the camera clock.
    pub fn with_date_time_zone(mut self, date_time: DateTime<FixedOffset>) -> Self {
        self.date_time_zone = Some(date_time);
        self
    }

    /// Names of the populated fields.
    pub fn names(&self) -> Vec<OptionName> {
        OptionName::ALL
            .into_iter()
            .filter(|&name| self.is_set(name))
            .collect()
    }

    /// Check whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// Check whether `name` is populated.
    pub fn is_set(&self, name: OptionName) -> bool {
        match name {
            OptionName::AccessInfo => self.access_info.is_some(),
            OptionName::CaptureMode => self.capture_mode.is_some(),
            OptionName::DateTimeZone => self.date_time_zone.is_some(),
            OptionName::OffDelay => self.off_delay.is_some(),
            OptionName::Password => self.password.is_some(),
            OptionName::SleepDelay => self.sleep_delay.is_some(),
            OptionName::Ssid => self.ssid.is_some(),
            OptionName::Username => self.username.is_some(),
            OptionName::WlanFrequency => self.wlan_frequency.is_some(),
        }
    }

    /// JSON value of one field, `None` if it is not populated.
    pub fn field_to_json(&self, name: OptionName) -> Result<Option<Value>> {
        let value = match name {
            OptionName::AccessInfo => match &self.access_info {
                Some(info) => Some(serde_json::to_value(info)?),
                None => None,
            },
            OptionName::CaptureMode => self.capture_mode.map(|m| Value::from(m.as_str())),
            OptionName::DateTimeZone => self
                .date_time_zone
                .map(|t| Value::from(t.format(DATE_TIME_ZONE_FORMAT).to_string())),
            OptionName::OffDelay => self.off_delay.map(Value::from),
            OptionName::Password => self.password.clone().map(Value::from),
            OptionName::SleepDelay => self.sleep_delay.map(Value::from),
            OptionName::Ssid => self.ssid.clone().map(Value::from),
            OptionName::Username => self.username.clone().map(Value::from),
            OptionName::WlanFrequency => self.wlan_frequency.map(|f| Value::from(f.as_ghz())),
        };
        Ok(value)
    }

    /// Decode one field from its JSON value.
    pub fn set_field_from_json(&mut self, name: OptionName, value: &Value) -> Result<()> {
        match name {
            OptionName::AccessInfo => {
                self.access_info = Some(serde_json::from_value(value.clone())?);
            }
            OptionName::CaptureMode => {
                self.capture_mode = Some(expect_str(name, value)?.parse()?);
            }
            OptionName::DateTimeZone => {
                let text = expect_str(name, value)?;
                let parsed = DateTime::<FixedOffset>::parse_from_str(text, DATE_TIME_ZONE_FORMAT)
                    .map_err(|e| Error::Serialization {
                        message: format!("Invalid {} {:?}: {}", name, text, e),
                    })?;
                self.date_time_zone = Some(parsed);
            }
            OptionName::OffDelay => self.off_delay = Some(expect_u32(name, value)?),
            OptionName::Password => self.password = Some(expect_str(name, value)?.to_string()),
            OptionName::SleepDelay => self.sleep_delay = Some(expect_u32(name, value)?),
            OptionName::Ssid => self.ssid = Some(expect_str(name, value)?.to_string()),
            OptionName::Username => self.username = Some(expect_str(name, value)?.to_string()),
            OptionName::WlanFrequency => {
                let ghz = value.as_f64().ok_or_else(|| type_mismatch(name, value))?;
                self.wlan_frequency = Some(WlanFrequency::try_from(ghz)?);
            }
        }
        Ok(())
    }

    /// JSON object holding exactly the populated fields.
    pub fn to_json_map(&self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        for name in OptionName::ALL {
            if let Some(value) = self.field_to_json(name)? {
                map.insert(name.as_str().to_string(), value);
            }
        }
        Ok(map)
    }
}

fn type_mismatch(name: OptionName, value: &Value) -> Error {
    Error::Serialization {
        message: format!("Unexpected JSON for {}: {}", name, value),
    }
}

fn expect_str(name: OptionName, value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| type_mismatch(name, value))
}

fn expect_u32(name: OptionName, value: &Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| type_mismatch(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_option_name_parse() {
        for name in OptionName::ALL {
            assert_eq!(name.as_str().parse::<OptionName>().unwrap(), name);
        }
        assert!("nope".parse::<OptionName>().is_err());
    }

    #[test]
    fn test_to_json_map_only_populated() {
        let options = ThetaOptions::new()
            .with_capture_mode(CaptureMode::Image)
            .with_ssid("x");
        let map = options.to_json_map().unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"captureMode": "image", "_ssid": "x"})
        );
        assert_eq!(options.names(), vec![OptionName::CaptureMode, OptionName::Ssid]);
        assert!(ThetaOptions::new().to_json_map().unwrap().is_empty());
    }

    #[test]
    fn test_date_time_zone_roundtrip() {
        let mut options = ThetaOptions::new();
        options
            .set_field_from_json(OptionName::DateTimeZone, &json!("2024:03:05 09:10:11+09:00"))
            .unwrap();
        let value = options.field_to_json(OptionName::DateTimeZone).unwrap();
        assert_eq!(value, Some(json!("2024:03:05 09:10:11+09:00")));
    }

    #[test]
    fn test_type_mismatch_is_serialization_error() {
        let mut options = ThetaOptions::new();
        let err = options
            .set_field_from_json(OptionName::OffDelay, &json!("soon"))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
        let err = options
            .set_field_from_json(OptionName::CaptureMode, &json!("panorama"))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }

    #[test]
    fn test_access_info_with_leases() {
        let mut options = ThetaOptions::new();
        let value = json!({
            "ssid": "THETA",
            "ipAddress": "192.168.1.1",
            "subnetMask": "255.255.255.0",
            "defaultGateway": "192.168.1.1",
            "frequency": 5.0,
            "wlanSignalStrength": -40,
            "wlanSignalLevel": 4,
            "_dhcpLeaseAddress": [
                {"ipAddress": "192.168.1.5", "macAddress": "AA:00:00:00:00:01", "hostName": "phone"}
            ]
        });
        options
            .set_field_from_json(OptionName::AccessInfo, &value)
            .unwrap();
        let info = options.access_info.as_ref().unwrap();
        assert_eq!(info.frequency, WlanFrequency::Ghz5);
        assert_eq!(info.lte_signal_level, 0);
        let leases = info.dhcp_lease_address.as_ref().unwrap();
        assert_eq!(leases.len(), 1);
        assert_eq!(leases[0].host_name, "phone");
    }

    #[test]
    fn test_access_info_without_leases() {
        let mut options = ThetaOptions::new();
        let value = json!({
            "ssid": "home",
            "ipAddress": "10.0.0.9",
            "subnetMask": "255.0.0.0",
            "defaultGateway": "10.0.0.1",
            "frequency": 2.4,
            "wlanSignalStrength": -60,
            "wlanSignalLevel": 2
        });
        options
            .set_field_from_json(OptionName::AccessInfo, &value)
            .unwrap();
        assert_eq!(options.access_info.as_ref().unwrap().dhcp_lease_address, None);

        let encoded = options.field_to_json(OptionName::AccessInfo).unwrap().unwrap();
        assert!(encoded.get("_dhcpLeaseAddress").is_none());
        assert!(encoded.get("proxyURL").is_none());
    }
}
