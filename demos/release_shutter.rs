//! Example: Release the shutter on the first camera found
//!
//! Takes a picture in image mode, or toggles recording in video mode.
//! Pass `video` or `image` to switch the capture mode first.
//!
//! Run with: cargo run --example release_shutter -- [image|video]

use theta_rust_ble::{BleScanner, CaptureMode, ClientConfig, Result, ThetaDevice, ThetaOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("theta_rust_ble=info".parse().unwrap()),
        )
        .init();

    let mode: Option<CaptureMode> = match std::env::args().nth(1) {
        Some(arg) => Some(arg.parse()?),
        None => None,
    };

    let config = ClientConfig::default();
    let scanner = BleScanner::new(config.clone()).await?;
    let Some(camera) = scanner.discover().await?.into_iter().next() else {
        println!("No cameras found.");
        return Ok(());
    };

    println!("Using {} ({})", camera.name, camera.identifier);
    let device = ThetaDevice::from_discovered(camera, config);
    device.connect().await?;

    // Print state changes while we work.
    device
        .camera_control_v2()
        .set_state_notify(Some(Box::new(|state| match state {
            Ok(state) => println!("  State: {:?}", state.capture_status),
            Err(e) => println!("  State error: {}", e),
        })))
        .await?;

    if let Some(mode) = mode {
        println!("Switching capture mode to {}", mode);
        device
            .camera_control_v2()
            .set_options(&ThetaOptions::new().with_capture_mode(mode))
            .await?;
    }

    match device.release_shutter().await {
        Ok(action) => println!("Shutter released: {:?}", action),
        Err(e) => println!("Shutter not released: {}", e),
    }

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    device.camera_control_v2().set_state_notify(None).await?;
    device.disconnect().await?;
    Ok(())
}
