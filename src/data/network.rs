//! Wireless network and accessory records.

use serde::{Deserialize, Serialize};

use crate::ble::uuids::BleCharacteristic;
use crate::error::{Error, Result};
use crate::protocol::codec::{decode_json, encode_json, ByteEnum, Decode, Encode};

/// Wireless LAN operating mode.
///
/// Writing [`NetworkType::Scan`] starts an SSID scan; the scan is ended by
/// writing [`NetworkType::Client`] back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NetworkType {
    /// Access point mode.
    Direct = 0,
    /// Client mode.
    Client = 1,
    /// Wired LAN.
    Ethernet = 2,
    /// Wireless off.
    Off = 3,
    /// SSID scanning.
    Scan = 4,
}

impl ByteEnum for NetworkType {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Direct),
            1 => Some(Self::Client),
            2 => Some(Self::Ethernet),
            3 => Some(Self::Off),
            4 => Some(Self::Scan),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Wireless LAN frequency band, in GHz on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum WlanFrequency {
    /// 2.4 GHz.
    Ghz2_4,
    /// 5 GHz.
    Ghz5,
    /// 5.2 GHz.
    Ghz5_2,
    /// 5.8 GHz.
    Ghz5_8,
}

impl WlanFrequency {
    /// Frequency in GHz.
    pub fn as_ghz(&self) -> f64 {
        match self {
            Self::Ghz2_4 => 2.4,
            Self::Ghz5 => 5.0,
            Self::Ghz5_2 => 5.2,
            Self::Ghz5_8 => 5.8,
        }
    }
}

impl TryFrom<f64> for WlanFrequency {
    type Error = Error;

    fn try_from(ghz: f64) -> Result<Self> {
        [Self::Ghz2_4, Self::Ghz5, Self::Ghz5_2, Self::Ghz5_8]
            .into_iter()
            .find(|f| (f.as_ghz() - ghz).abs() < 0.01)
            .ok_or_else(|| Error::Serialization {
                message: format!("Unknown wlan frequency: {}", ghz),
            })
    }
}

impl From<WlanFrequency> for f64 {
    fn from(frequency: WlanFrequency) -> Self {
        frequency.as_ghz()
    }
}

/// Wireless LAN security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WlanSecurity {
    /// Open network.
    #[serde(rename = "none")]
    None,
    /// WEP.
    #[serde(rename = "WEP")]
    Wep,
    /// WPA/WPA2 personal.
    #[serde(rename = "WPA/WPA2 PSK")]
    WpaWpa2Psk,
    /// WPA3 personal.
    #[serde(rename = "WPA3-SAE")]
    Wpa3Sae,
}

/// Current client-mode connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedWifiInfo {
    /// SSID of the access point.
    pub ssid: String,
    /// Whether the link is up.
    pub is_connected: bool,
    /// Whether the internet is reachable.
    #[serde(default)]
    pub is_internet_accessible: bool,
}

impl Decode for ConnectedWifiInfo {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}

/// IP address allocation for an access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IpAddressAllocation {
    /// DHCP.
    #[default]
    Dynamic,
    /// Static addressing.
    Static,
}

/// Access point registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    /// SSID.
    pub ssid: String,
    /// Security.
    pub security: WlanSecurity,
    /// Passphrase, absent for open networks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Priority 1-3, 1 is highest.
    pub connection_priority: u8,
    /// IP address allocation.
    pub ip_address_allocation: IpAddressAllocation,
    /// Static IP address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// Static subnet mask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    /// Static default gateway.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<String>,
}

impl AccessPoint {
    /// DHCP access point.
    pub fn dynamic(
        ssid: impl Into<String>,
        security: WlanSecurity,
        password: Option<String>,
        connection_priority: u8,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            security,
            password,
            connection_priority,
            ip_address_allocation: IpAddressAllocation::Dynamic,
            ip_address: None,
            subnet_mask: None,
            default_gateway: None,
        }
    }

    /// Check that the record is acceptable to the camera.
    pub fn validate(&self) -> Result<()> {
        if self.ssid.is_empty() {
            return Err(Error::InvalidParameter {
                name: "ssid".to_string(),
                value: String::new(),
            });
        }
        if !(1..=3).contains(&self.connection_priority) {
            return Err(Error::InvalidParameter {
                name: "connection_priority".to_string(),
                value: self.connection_priority.to_string(),
            });
        }
        if self.ip_address_allocation == IpAddressAllocation::Static
            && (self.ip_address.is_none()
                || self.subnet_mask.is_none()
                || self.default_gateway.is_none())
        {
            return Err(Error::InvalidParameter {
                name: "ip_address_allocation".to_string(),
                value: "static without address".to_string(),
            });
        }
        Ok(())
    }
}

impl Encode for AccessPoint {
    fn encode(&self) -> Result<Vec<u8>> {
        encode_json(self)
    }
}

/// One SSID reported during an SSID scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedSsid {
    /// Network name.
    pub ssid: String,
    /// Signal strength in dBm.
    #[serde(default)]
    pub rssi: Option<i32>,
    /// Advertised security.
    #[serde(default)]
    pub security: Option<WlanSecurity>,
}

impl Decode for ScannedSsid {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}

/// One accessory reported during an accessory scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeripheralDevice {
    /// Advertised name.
    #[serde(default)]
    pub device_name: String,
    /// Bluetooth MAC address.
    pub mac_address: String,
    /// Whether the accessory is paired with the camera.
    #[serde(default)]
    pub pairing: bool,
    /// Whether the accessory is connected to the camera.
    #[serde(default)]
    pub connection: bool,
}

impl Decode for PeripheralDevice {
    fn decode(characteristic: BleCharacteristic, data: &[u8]) -> Result<Self> {
        decode_json(characteristic, data)
    }
}
