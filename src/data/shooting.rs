//! Shooting control values.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::protocol::codec::ByteEnum;

/// Capture mode.
///
/// Carried as a byte on the shooting control service and as a string in the
/// options protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CaptureMode {
    /// Still image.
    Image = 0,
    /// Video.
    Video = 1,
    /// Live streaming.
    LiveStreaming = 2,
    /// Interval shooting.
    Interval = 3,
    /// Preset mode.
    Preset = 4,
}

impl CaptureMode {
    /// Name used in the options protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::LiveStreaming => "_liveStreaming",
            Self::Interval => "interval",
            Self::Preset => "_preset",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "_liveStreaming" => Ok(Self::LiveStreaming),
            "interval" => Ok(Self::Interval),
            "_preset" => Ok(Self::Preset),
            other => Err(Error::Serialization {
                message: format!("Unknown captureMode: {}", other),
            }),
        }
    }
}

impl ByteEnum for CaptureMode {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Image),
            1 => Some(Self::Video),
            2 => Some(Self::LiveStreaming),
            3 => Some(Self::Interval),
            4 => Some(Self::Preset),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FileFormat {
    /// JPEG 5376x2688.
    Image5K = 0,
    /// JPEG 11008x5504.
    Image11K = 1,
    /// MP4 1920x960.
    Video2K = 2,
    /// MP4 3840x1920.
    Video4K = 3,
}

impl FileFormat {
    /// Pixel dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Image5K => (5376, 2688),
            Self::Image11K => (11008, 5504),
            Self::Video2K => (1920, 960),
            Self::Video4K => (3840, 1920),
        }
    }

    /// Check if this is a still image format.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image5K | Self::Image11K)
    }
}

impl ByteEnum for FileFormat {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Image5K),
            1 => Some(Self::Image11K),
            2 => Some(Self::Video2K),
            3 => Some(Self::Video4K),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Video capture command written to the capture control characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CaptureCommand {
    /// Stop recording.
    Stop = 0,
    /// Start recording.
    Start = 1,
}

impl ByteEnum for CaptureCommand {
    fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Stop),
            1 => Some(Self::Start),
            _ => None,
        }
    }

    fn to_raw(self) -> u8 {
        self as u8
    }
}

/// Payload of the take picture command.
pub const TAKE_PICTURE_COMMAND: u8 = 0x01;
