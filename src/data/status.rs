//! Camera status values.
//!
//! Single-byte enumerations reported by the camera status service.

use crate::protocol::codec::ByteEnum;

/// Battery charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChargingState {
    /// Charging.
    Charging = 0,
    /// Charge completed.
    Completed = 1,
    /// Not charging.
    NotCharging = 2,
}

impl ByteEnum for ChargingState {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Charging),
            1 => Some(Self::Completed),
            2 => Some(Self::NotCharging),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Camera power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CameraPower {
    /// Powered off.
    Off = 0,
    /// Powered on.
    On = 1,
    /// Sleeping.
    Sleep = 2,
}

impl CameraPower {
    /// Check if the camera is awake.
    pub fn is_on(&self) -> bool {
        matches!(self, Self::On)
    }
}

impl ByteEnum for CameraPower {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::On),
            2 => Some(Self::Sleep),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Reason the camera gave for rejecting the last command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandErrorDescription {
    /// The command is not valid in the current state.
    DisabledCommand = 0,
    /// A required parameter was missing.
    MissingParameter = 1,
    /// A parameter value was out of range.
    InvalidParameterValue = 2,
    /// The camera is shutting down.
    PowerOffSequenceRunning = 3,
    /// The file format cannot be used here.
    InvalidFileFormat = 4,
    /// The service is temporarily unavailable.
    ServiceUnavailable = 5,
    /// The camera is busy.
    DeviceBusy = 6,
}

impl CommandErrorDescription {
    /// Error code string in the camera's JSON vocabulary.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DisabledCommand => "disabledCommand",
            Self::MissingParameter => "missingParameter",
            Self::InvalidParameterValue => "invalidParameterValue",
            Self::PowerOffSequenceRunning => "powerOffSequenceRunning",
            Self::InvalidFileFormat => "invalidFileFormat",
            Self::ServiceUnavailable => "serviceUnavailable",
            Self::DeviceBusy => "deviceBusy",
        }
    }

    /// Human readable description.
    pub fn message(&self) -> &'static str {
        match self {
            Self::DisabledCommand => "Disabled Command",
            Self::MissingParameter => "Missing Parameter",
            Self::InvalidParameterValue => "Invalid Parameter Value",
            Self::PowerOffSequenceRunning => "Power Off Sequence Running",
            Self::InvalidFileFormat => "Invalid File Format",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::DeviceBusy => "Device Busy",
        }
    }
}

impl ByteEnum for CommandErrorDescription {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::DisabledCommand),
            1 => Some(Self::MissingParameter),
            2 => Some(Self::InvalidParameterValue),
            3 => Some(Self::PowerOffSequenceRunning),
            4 => Some(Self::InvalidFileFormat),
            5 => Some(Self::ServiceUnavailable),
            6 => Some(Self::DeviceBusy),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

impl From<CommandErrorDescription> for crate::error::Error {
    fn from(description: CommandErrorDescription) -> Self {
        Self::Camera {
            code: description.code().to_string(),
            message: description.message().to_string(),
        }
    }
}
