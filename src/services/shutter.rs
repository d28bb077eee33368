//! Shutter release.
//!
//! One button for every mode: the capture mode decides between a still
//! picture and video, and for video the capture status decides between
//! starting and stopping. Each successful call performs exactly one shutter
//! write.

use tracing::info;

use crate::data::{CaptureMode, CaptureStatus, OptionName};
use crate::device::ThetaDevice;
use crate::error::{Error, Result};

/// What a shutter release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShutterAction {
    /// Took a still picture.
    TakePicture,
    /// Started video recording.
    StartCapture,
    /// Stopped video recording.
    StopCapture,
}

/// Pick the action for the camera's current mode and status.
///
/// Modes and statuses where the shutter has no meaning are rejected as a
/// disabled command.
pub(crate) fn select_action(
    mode: CaptureMode,
    status: Option<CaptureStatus>,
) -> Result<ShutterAction> {
    match (mode, status) {
        (CaptureMode::Image, _) => Ok(ShutterAction::TakePicture),
        (CaptureMode::Video, Some(CaptureStatus::Idle)) => Ok(ShutterAction::StartCapture),
        (CaptureMode::Video, Some(CaptureStatus::Shooting)) => Ok(ShutterAction::StopCapture),
        _ => Err(Error::disabled_command()),
    }
}

pub(crate) async fn release_shutter(device: &ThetaDevice) -> Result<ShutterAction> {
    let v2 = device.camera_control_v2();

    let mode = v2
        .get_options(&[OptionName::CaptureMode])
        .await?
        .capture_mode
        .ok_or_else(|| Error::serialization("captureMode missing from options response"))?;

    let status = match mode {
        CaptureMode::Video => Some(v2.get_state().await?.capture_status),
        _ => None,
    };

    let action = select_action(mode, status)?;
    let shooting = device.shooting_control();
    match action {
        ShutterAction::TakePicture => shooting.take_picture().await?,
        ShutterAction::StartCapture => shooting.start_capture().await?,
        ShutterAction::StopCapture => shooting.stop_capture().await?,
    }

    info!("Shutter released: {:?}", action);
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_action() {
        assert_eq!(
            select_action(CaptureMode::Image, None).unwrap(),
            ShutterAction::TakePicture
        );
        assert_eq!(
            select_action(CaptureMode::Video, Some(CaptureStatus::Idle)).unwrap(),
            ShutterAction::StartCapture
        );
        assert_eq!(
            select_action(CaptureMode::Video, Some(CaptureStatus::Shooting)).unwrap(),
            ShutterAction::StopCapture
        );
    }

    #[test]
    fn test_disabled_combinations() {
        for (mode, status) in [
            (CaptureMode::Video, Some(CaptureStatus::SelfTimerCountdown)),
            (CaptureMode::Video, Some(CaptureStatus::Converting)),
            (CaptureMode::Interval, None),
            (CaptureMode::LiveStreaming, None),
            (CaptureMode::Preset, None),
        ] {
            let err = select_action(mode, status).unwrap_err();
            assert_eq!(err.to_string(), "Camera error (disabledCommand): Disabled Command");
        }
    }
}
