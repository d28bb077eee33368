//! BLE Service and Characteristic UUIDs.
//!
//! The camera's GATT table is fixed: every operation in this crate is keyed by
//! a [`BleCharacteristic`], which maps to exactly one service and one UUID.

use std::fmt;

use uuid::Uuid;

/// GATT services exposed by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BleService {
    /// Identification strings (firmware, model, serial, MAC addresses).
    CameraInformation,
    /// Battery, power and command error status.
    CameraStatusCommand,
    /// Plugin management.
    CameraControlCommands,
    /// Capture mode, file format and shutter commands.
    ShootingControlCommand,
    /// Wireless LAN configuration and SSID scan.
    WlanControlCommand,
    /// Accessory (peripheral device) scan.
    BluetoothControlCommand,
    /// JSON based info/state/options operations.
    CameraControlCommandV2,
}

impl BleService {
    /// All services in the table.
    pub const ALL: [BleService; 7] = [
        Self::CameraInformation,
        Self::CameraStatusCommand,
        Self::CameraControlCommands,
        Self::ShootingControlCommand,
        Self::WlanControlCommand,
        Self::BluetoothControlCommand,
        Self::CameraControlCommandV2,
    ];

    /// The service UUID.
    pub fn uuid(&self) -> Uuid {
        match self {
            Self::CameraInformation => Uuid::from_u128(0x9a5ed1c5_74cc_4c50_b5b6_66a48e7ccff1),
            Self::CameraStatusCommand => Uuid::from_u128(0x8af24b23_93a6_4a16_b58d_d5ab3d1a6cd7),
            Self::CameraControlCommands => {
                Uuid::from_u128(0x1d0f3602_8dfb_4340_9045_513040dad991)
            }
            Self::ShootingControlCommand => {
                Uuid::from_u128(0x7d2fd8e9_9c54_4e3a_8b5f_1d7e7f0b2c6a)
            }
            Self::WlanControlCommand => Uuid::from_u128(0x3c6feeb6_91e0_4b6f_8d5a_6f3b1c2a4e90),
            Self::BluetoothControlCommand => {
                Uuid::from_u128(0x0f291746_0c80_4726_87a7_3c501fd3b4b6)
            }
            Self::CameraControlCommandV2 => {
                Uuid::from_u128(0xb6ac7a7e_8c01_4a52_b188_68d53df53ea2)
            }
        }
    }

    /// Look up a service by UUID.
    pub fn from_uuid(uuid: &Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.uuid() == *uuid)
    }
}

/// GATT characteristics exposed by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BleCharacteristic {
    // Camera Information
    /// Firmware revision string (Read).
    FirmwareRevision,
    /// Manufacturer name string (Read).
    ManufacturerName,
    /// Model number string (Read).
    ModelNumber,
    /// Serial number string (Read).
    SerialNumber,
    /// Wireless LAN MAC address string (Read).
    WlanMacAddress,
    /// Bluetooth MAC address string (Read).
    BluetoothMacAddress,

    // Camera Status Command
    /// Battery level 0-100 (Read, Notify).
    BatteryLevel,
    /// Charging state (Read, Notify).
    BatteryStatus,
    /// Camera power (Read, Write, Notify).
    CameraPower,
    /// Last command error (Read, Notify).
    CommandErrorDescription,

    // Camera Control Commands
    /// Plugin status byte + optional plugin index (Read, Write, Notify).
    PluginControl,
    /// Three plugin slot indices (Read, Write).
    PluginOrders,

    // Shooting Control Command
    /// Capture mode byte (Read, Write).
    CaptureMode,
    /// File format byte (Read, Write).
    FileFormat,
    /// Still capture trigger (Write).
    TakePicture,
    /// Video capture start/stop (Write).
    CaptureControl,

    // WLAN Control Command
    /// Network type byte; `Scan` starts an SSID scan (Read, Write, Notify).
    NetworkType,
    /// Connected Wi-Fi information JSON (Read, Notify).
    ConnectedWifiInfo,
    /// Access point configuration JSON (Write).
    SetAccessPoint,
    /// One scanned SSID per notification (Notify).
    NotifyScannedSsid,

    // Bluetooth Control Command
    /// Accessory scan trigger (Write).
    ScanPeripheralDevice,
    /// One scanned accessory per notification (Notify).
    NotifyScannedPeripheralDevice,

    // Camera Control Command V2
    /// Camera info JSON (Read).
    GetInfo,
    /// Camera state JSON (Read).
    GetState,
    /// Camera state2 JSON (Read).
    GetState2,
    /// Camera state JSON (Notify).
    NotifyState,
    /// Write a JSON array of option names, then read the JSON object (Read, Write).
    GetOptions,
    /// JSON object of options to apply (Write).
    SetOptions,
}

impl BleCharacteristic {
    /// All characteristics in the table.
    pub const ALL: [BleCharacteristic; 28] = [
        Self::FirmwareRevision,
        Self::ManufacturerName,
        Self::ModelNumber,
        Self::SerialNumber,
        Self::WlanMacAddress,
        Self::BluetoothMacAddress,
        Self::BatteryLevel,
        Self::BatteryStatus,
        Self::CameraPower,
        Self::CommandErrorDescription,
        Self::PluginControl,
        Self::PluginOrders,
        Self::CaptureMode,
        Self::FileFormat,
        Self::TakePicture,
        Self::CaptureControl,
        Self::NetworkType,
        Self::ConnectedWifiInfo,
        Self::SetAccessPoint,
        Self::NotifyScannedSsid,
        Self::ScanPeripheralDevice,
        Self::NotifyScannedPeripheralDevice,
        Self::GetInfo,
        Self::GetState,
        Self::GetState2,
        Self::NotifyState,
        Self::GetOptions,
        Self::SetOptions,
    ];

    /// The service that owns this characteristic.
    pub fn service(&self) -> BleService {
        match self {
            Self::FirmwareRevision
            | Self::ManufacturerName
            | Self::ModelNumber
            | Self::SerialNumber
            | Self::WlanMacAddress
            | Self::BluetoothMacAddress => BleService::CameraInformation,
            Self::BatteryLevel
            | Self::BatteryStatus
            | Self::CameraPower
            | Self::CommandErrorDescription => BleService::CameraStatusCommand,
            Self::PluginControl | Self::PluginOrders => BleService::CameraControlCommands,
            Self::CaptureMode | Self::FileFormat | Self::TakePicture | Self::CaptureControl => {
                BleService::ShootingControlCommand
            }
            Self::NetworkType
            | Self::ConnectedWifiInfo
            | Self::SetAccessPoint
            | Self::NotifyScannedSsid => BleService::WlanControlCommand,
            Self::ScanPeripheralDevice | Self::NotifyScannedPeripheralDevice => {
                BleService::BluetoothControlCommand
            }
            Self::GetInfo
            | Self::GetState
            | Self::GetState2
            | Self::NotifyState
            | Self::GetOptions
            | Self::SetOptions => BleService::CameraControlCommandV2,
        }
    }

    /// The characteristic UUID.
    pub fn uuid(&self) -> Uuid {
        let value: u128 = match self {
            Self::FirmwareRevision => 0xb4eb8905_7411_40a6_a367_2834c2157ea7,
            Self::ManufacturerName => 0xf5666a48_6a74_40ae_a817_3c9b3efb59a6,
            Self::ModelNumber => 0x35fe6272_6aa5_44d9_88e1_f09427f51a71,
            Self::SerialNumber => 0x0d2fc4d5_5cb3_4cde_b519_445e599957d8,
            Self::WlanMacAddress => 0x1c5c6c55_8e96_4b7f_9e58_3e4fe5e3bc54,
            Self::BluetoothMacAddress => 0x97e34da2_2e1a_405b_b80d_f8f0aa9cc51c,
            Self::BatteryLevel => 0x875fc41d_4980_434c_a653_fd4a4d4410c4,
            Self::BatteryStatus => 0x5babcc8e_e4c3_4a2e_8c73_e2bb6a0bda5d,
            Self::CameraPower => 0xb58ce84c_0666_4de9_bec8_2d27b27b3211,
            Self::CommandErrorDescription => 0xa0452e2d_c7d8_4314_8cd6_7b8bbab4d523,
            Self::PluginControl => 0xa88e1a1b_8bd9_4ed5_8f5e_1d6e0b3c9f42,
            Self::PluginOrders => 0x238e7b3d_2c8f_4b0e_9a41_5d3f6c1e8a07,
            Self::CaptureMode => 0x78009238_ac3d_4370_9b6f_c9ce2f4e3ca8,
            Self::FileFormat => 0xe8f0ede2_8a7f_4ad8_9b0d_3e9a6c5f1b24,
            Self::TakePicture => 0xfec1805c_8905_4477_b862_ba5e447528a5,
            Self::CaptureControl => 0x4b7a3f5e_6d21_4c8a_b9e0_2f1d8c7a6e53,
            Self::NetworkType => 0x4b7e6d2a_9c0f_4f3b_8a6d_1e2c3b4a5f60,
            Self::ConnectedWifiInfo => 0x01dac8c4_3b29_4a2f_9d4e_8c7b6a5f4e31,
            Self::SetAccessPoint => 0x0f38c0f6_9d3e_4b1a_8c2d_7e6f5a4b3c12,
            Self::NotifyScannedSsid => 0xb9ae6c42_8a3d_4f7e_9b1c_2d3e4f5a6b7c,
            Self::ScanPeripheralDevice => 0xa9a5e6d8_3c2b_4e1f_8d7a_6b5c4d3e2f10,
            Self::NotifyScannedPeripheralDevice => 0x8f3c2e1d_7b6a_4c5d_9e8f_1a2b3c4d5e6f,
            Self::GetInfo => 0xa0c10148_8865_4470_9631_8612c3f1b9c8,
            Self::GetState => 0x083d92b0_21e0_4fb2_9503_2e2ba1e4bd2b,
            Self::GetState2 => 0x8881e0b4_a7a3_4c3d_8e3f_1f2b5c6d7e80,
            Self::NotifyState => 0xd32ce4a6_35ef_4ab4_9d5c_8a6e4a4ec5e2,
            Self::GetOptions => 0xa91ee96e_2a8b_4a57_8f2e_e6b3d0c5f1a4,
            Self::SetOptions => 0x0d8c79f4_0e6c_4b1f_a6a5_6f9c3e2d1b70,
        };
        Uuid::from_u128(value)
    }

    /// Look up a characteristic by UUID.
    pub fn from_uuid(uuid: &Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.uuid() == *uuid)
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirmwareRevision => "FirmwareRevision",
            Self::ManufacturerName => "ManufacturerName",
            Self::ModelNumber => "ModelNumber",
            Self::SerialNumber => "SerialNumber",
            Self::WlanMacAddress => "WlanMacAddress",
            Self::BluetoothMacAddress => "BluetoothMacAddress",
            Self::BatteryLevel => "BatteryLevel",
            Self::BatteryStatus => "BatteryStatus",
            Self::CameraPower => "CameraPower",
            Self::CommandErrorDescription => "CommandErrorDescription",
            Self::PluginControl => "PluginControl",
            Self::PluginOrders => "PluginOrders",
            Self::CaptureMode => "CaptureMode",
            Self::FileFormat => "FileFormat",
            Self::TakePicture => "TakePicture",
            Self::CaptureControl => "CaptureControl",
            Self::NetworkType => "NetworkType",
            Self::ConnectedWifiInfo => "ConnectedWifiInfo",
            Self::SetAccessPoint => "SetAccessPoint",
            Self::NotifyScannedSsid => "NotifyScannedSsid",
            Self::ScanPeripheralDevice => "ScanPeripheralDevice",
            Self::NotifyScannedPeripheralDevice => "NotifyScannedPeripheralDevice",
            Self::GetInfo => "GetInfo",
            Self::GetState => "GetState",
            Self::GetState2 => "GetState2",
            Self::NotifyState => "NotifyState",
            Self::GetOptions => "GetOptions",
            Self::SetOptions => "SetOptions",
        }
    }
}

impl fmt::Display for BleCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
