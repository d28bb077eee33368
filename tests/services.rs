//! Service views: precedence rules, plugin orchestration and notifications.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};

use common::{connected, init_tracing, FakeCamera};
use theta_rust_ble::{
    AccessPoint, BleCharacteristic, CameraPower, ChargingState, CommandErrorDescription, Error,
    NetworkType, PluginControl, PluginOrders, PluginPowerStatus, ThetaDevice, WlanSecurity,
};

#[tokio::test]
async fn operations_fail_before_connect() {
    init_tracing();
    let camera = Arc::new(FakeCamera::new());
    let device = ThetaDevice::new("fake-theta", camera.clone());

    assert!(matches!(
        device.camera_information().get_model_number().await,
        Err(Error::NotConnected)
    ));
    assert!(matches!(
        device.shooting_control().take_picture().await,
        Err(Error::NotConnected)
    ));
    assert!(matches!(
        device.camera_status().set_battery_level_notify(None).await,
        Err(Error::NotConnected)
    ));
    assert!(matches!(
        device.release_shutter().await,
        Err(Error::NotConnected)
    ));
    assert!(camera.reads().is_empty());
    assert!(camera.writes().is_empty());
}

#[tokio::test]
async fn operations_fail_after_disconnect() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_value(BleCharacteristic::BatteryLevel, vec![90]);
    let device = connected(&camera).await;

    assert_eq!(device.camera_status().get_battery_level().await.unwrap(), 90);
    device.disconnect().await.unwrap();
    assert!(matches!(
        device.camera_status().get_battery_level().await,
        Err(Error::NotConnected)
    ));
}

#[tokio::test]
async fn missing_characteristic_is_not_supported_before_io() {
    let camera = Arc::new(FakeCamera::without(&[
        BleCharacteristic::PluginControl,
        BleCharacteristic::CameraPower,
        BleCharacteristic::SetAccessPoint,
    ]));
    let device = connected(&camera).await;

    let control = device.camera_control();
    assert!(matches!(
        control.get_plugin_control().await,
        Err(Error::NotSupported { .. })
    ));
    // Would otherwise read the plugin order first.
    assert!(matches!(
        control
            .set_plugin_control(PluginControl {
                status: PluginPowerStatus::Running,
                plugin: None,
            })
            .await,
        Err(Error::NotSupported { .. })
    ));
    assert!(matches!(
        control
            .set_plugin_control_notify(Some(Box::new(|_| {})))
            .await,
        Err(Error::NotSupported { .. })
    ));
    assert!(matches!(
        control.set_camera_power(CameraPower::Sleep).await,
        Err(Error::NotSupported { .. })
    ));
    // Unsupported wins over an invalid argument.
    assert!(matches!(
        device
            .wlan_control()
            .set_access_point(&AccessPoint::dynamic("", WlanSecurity::None, None, 9))
            .await,
        Err(Error::NotSupported { .. })
    ));

    assert!(camera.reads().is_empty());
    assert!(camera.writes().is_empty());
    assert!(!camera.is_observed(BleCharacteristic::PluginControl));
}

#[tokio::test]
async fn running_without_index_starts_first_plugin() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_value(BleCharacteristic::PluginOrders, vec![0, 2, 3]);
    let device = connected(&camera).await;

    device
        .camera_control()
        .set_plugin_control(PluginControl {
            status: PluginPowerStatus::Running,
            plugin: None,
        })
        .await
        .unwrap();

    assert_eq!(camera.reads(), vec![BleCharacteristic::PluginOrders]);
    assert_eq!(
        camera.writes_to(BleCharacteristic::PluginControl),
        vec![vec![1, 2]]
    );
}

#[tokio::test]
async fn plugin_order_read_failure_is_returned() {
    let camera = Arc::new(FakeCamera::new());
    // Empty plugin order payload.
    let device = connected(&camera).await;

    let err = device
        .camera_control()
        .set_plugin_control(PluginControl {
            status: PluginPowerStatus::Running,
            plugin: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyData { .. }));
    assert!(camera.writes().is_empty());
}

#[tokio::test]
async fn explicit_plugin_and_stop_skip_the_lookup() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;
    let control = device.camera_control();

    assert_ok!(control.set_plugin_control(PluginControl::running(3)).await);
    assert_ok!(control.set_plugin_control(PluginControl::stop()).await);
    assert_ok!(control.set_plugin_orders(PluginOrders([1, 0, 0])).await);

    assert!(camera.reads().is_empty());
    assert_eq!(
        camera.writes_to(BleCharacteristic::PluginControl),
        vec![vec![1, 3], vec![0]]
    );
    assert_eq!(
        camera.writes_to(BleCharacteristic::PluginOrders),
        vec![vec![1, 0, 0]]
    );
}

#[tokio::test]
async fn byte_enum_reads_report_unknown_values() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_value(BleCharacteristic::BatteryStatus, vec![1]);
    camera.set_value(BleCharacteristic::CameraPower, vec![7]);
    camera.set_value(BleCharacteristic::NetworkType, vec![1]);
    camera.set_value(BleCharacteristic::CommandErrorDescription, vec![0x02]);
    let device = connected(&camera).await;
    let status = device.camera_status();

    assert_eq!(
        status.get_battery_status().await.unwrap(),
        ChargingState::Completed
    );
    assert!(matches!(
        status.get_camera_power().await,
        Err(Error::UnknownValue { value: 7, .. })
    ));
    assert!(matches!(
        status.get_battery_level().await,
        Err(Error::EmptyData { .. })
    ));
    assert_eq!(
        device.wlan_control().get_network_type().await.unwrap(),
        NetworkType::Client
    );
    assert_eq!(
        status.get_command_error_description().await.unwrap(),
        CommandErrorDescription::InvalidParameterValue
    );
}

#[tokio::test]
async fn notifications_stop_after_clear() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;
    let status = device.camera_status();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    status
        .set_battery_level_notify(Some(Box::new(move |level| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = tx.send(level);
        })))
        .await
        .unwrap();

    assert!(camera.notify(BleCharacteristic::BatteryLevel, vec![55]));
    assert_eq!(rx.recv().await.unwrap().unwrap(), 55);
    assert!(camera.notify(BleCharacteristic::BatteryLevel, Vec::new()));
    assert!(matches!(
        rx.recv().await.unwrap(),
        Err(Error::EmptyData { .. })
    ));

    status.set_battery_level_notify(None).await.unwrap();
    assert!(!camera.notify(BleCharacteristic::BatteryLevel, vec![54]));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn register_after_stream_ended_observes_again() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;
    let status = device.camera_status();

    status
        .set_battery_level_notify(Some(Box::new(|_| {})))
        .await
        .unwrap();
    camera.end_observation(BleCharacteristic::BatteryLevel);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!camera.is_observed(BleCharacteristic::BatteryLevel));

    let (tx, mut rx) = mpsc::unbounded_channel();
    status
        .set_battery_level_notify(Some(Box::new(move |level| {
            let _ = tx.send(level);
        })))
        .await
        .unwrap();

    assert!(camera.is_observed(BleCharacteristic::BatteryLevel));
    assert!(camera.notify(BleCharacteristic::BatteryLevel, vec![71]));
    let level = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(level.unwrap(), 71);
    assert_eq!(
        device.subscribed_characteristics(),
        vec![BleCharacteristic::BatteryLevel]
    );
}

#[tokio::test]
async fn disconnect_keeps_subscriptions() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;

    device
        .camera_control_v2()
        .set_state_notify(Some(Box::new(|_| {})))
        .await
        .unwrap();
    device.disconnect().await.unwrap();

    assert_eq!(
        device.subscribed_characteristics(),
        vec![BleCharacteristic::NotifyState]
    );
}

#[tokio::test]
async fn access_point_is_validated_then_written() {
    let camera = Arc::new(FakeCamera::new());
    let device = connected(&camera).await;
    let wlan = device.wlan_control();

    let err = assert_err!(
        wlan.set_access_point(&AccessPoint::dynamic("home", WlanSecurity::None, None, 4))
            .await
    );
    assert!(matches!(err, Error::InvalidParameter { .. }));
    assert!(camera.writes().is_empty());

    wlan.set_access_point(&AccessPoint::dynamic(
        "home",
        WlanSecurity::WpaWpa2Psk,
        Some("secret".to_string()),
        1,
    ))
    .await
    .unwrap();

    let written = camera.writes_to(BleCharacteristic::SetAccessPoint);
    assert_eq!(written.len(), 1);
    let json: serde_json::Value = serde_json::from_slice(&written[0]).unwrap();
    assert_eq!(json["ssid"], "home");
    assert_eq!(json["password"], "secret");
    assert_eq!(json["connectionPriority"], 1);
    assert!(json.get("ipAddress").is_none());
}

#[tokio::test]
async fn camera_information_strings() {
    let camera = Arc::new(FakeCamera::new());
    camera.set_value(BleCharacteristic::FirmwareRevision, b"1.40.0".to_vec());
    camera.set_value(BleCharacteristic::ModelNumber, b"RICOH THETA X".to_vec());
    let device = connected(&camera).await;
    let info = device.camera_information();

    assert_eq!(info.get_firmware_revision().await.unwrap(), "1.40.0");
    assert_eq!(info.get_model_number().await.unwrap(), "RICOH THETA X");
    assert!(matches!(
        info.get_serial_number().await,
        Err(Error::EmptyData { .. })
    ));
}
