//! Options protocol against the fake camera.

mod common;

use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use common::{connected, FakeCamera};
use theta_rust_ble::{BleCharacteristic, CaptureMode, Error, OptionName, ThetaOptions};

#[tokio::test]
async fn set_then_get_returns_only_requested_fields() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_option("offDelay", json!(600));
    let device = connected(&camera).await;
    let v2 = device.camera_control_v2();

    v2.set_options(
        &ThetaOptions::new()
            .with_capture_mode(CaptureMode::Image)
            .with_ssid("x"),
    )
    .await
    .unwrap();

    let options = v2
        .get_options(&[OptionName::CaptureMode, OptionName::Ssid])
        .await
        .unwrap();

    assert_eq!(
        options,
        ThetaOptions::new()
            .with_capture_mode(CaptureMode::Image)
            .with_ssid("x")
    );
    assert_eq!(
        camera.writes_to(BleCharacteristic::GetOptions),
        vec![br#"["captureMode","_ssid"]"#.to_vec()]
    );
}

#[tokio::test]
async fn missing_option_stays_unset() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_option("sleepDelay", json!(180));
    let device = connected(&camera).await;

    let options = device
        .camera_control_v2()
        .get_options(&[OptionName::SleepDelay, OptionName::OffDelay])
        .await
        .unwrap();

    assert_eq!(options.sleep_delay, Some(180));
    assert_eq!(options.off_delay, None);
    assert_eq!(options.names(), vec![OptionName::SleepDelay]);
}

#[tokio::test]
async fn date_time_zone_round_trip() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;
    let v2 = device.camera_control_v2();

    let when: DateTime<FixedOffset> =
        DateTime::parse_from_rfc3339("2024-05-01T12:30:00+09:00").unwrap();
    v2.set_options(&ThetaOptions::new().with_date_time_zone(when))
        .await
        .unwrap();

    let written = camera.writes_to(BleCharacteristic::SetOptions);
    assert_eq!(
        written,
        vec![br#"{"dateTimeZone":"2024:05:01 12:30:00+09:00"}"#.to_vec()]
    );

    let options = v2.get_options(&[OptionName::DateTimeZone]).await.unwrap();
    assert_eq!(options.date_time_zone, Some(when));
}

#[tokio::test]
async fn get_options_by_string_returns_raw_values() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_option("_wlanFrequency", json!(5.0));
    camera.set_option("_vendorSpecific", json!({"level": 3}));
    let device = connected(&camera).await;

    let values = device
        .camera_control_v2()
        .get_options_by_string(&["_wlanFrequency", "_vendorSpecific", "_absent"])
        .await
        .unwrap();

    assert_eq!(values.len(), 2);
    assert_eq!(values["_wlanFrequency"], json!(5.0));
    assert_eq!(values["_vendorSpecific"], json!({"level": 3}));
}

#[tokio::test]
async fn camera_error_response_is_an_application_error() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_value(
        BleCharacteristic::GetOptions,
        br#"{"error":{"code":"invalidParameterName","message":"Unknown option"}}"#.to_vec(),
    );
    let device = connected(&camera).await;

    let err = device
        .camera_control_v2()
        .get_options(&[OptionName::CaptureMode])
        .await
        .unwrap_err();

    match err {
        Error::Camera { code, message } => {
            assert_eq!(code, "invalidParameterName");
            assert_eq!(message, "Unknown option");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn empty_set_is_rejected_without_writing() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;

    let err = device
        .camera_control_v2()
        .set_options(&ThetaOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidParameter { .. }));
    assert!(camera.writes().is_empty());
}

#[tokio::test]
async fn options_require_support() {
    let camera = Arc::new(FakeCamera::without(&[BleCharacteristic::GetOptions]));
    let device = connected(&camera).await;

    let err = device
        .camera_control_v2()
        .get_options(&[OptionName::CaptureMode])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotSupported { .. }));
    assert!(camera.writes().is_empty());
    assert!(camera.reads().is_empty());
}
