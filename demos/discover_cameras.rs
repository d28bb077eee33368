//! Basic example: Discover nearby THETA cameras and print their identity
//!
//! Run with: cargo run --example discover_cameras

use theta_rust_ble::{BleScanner, ClientConfig, Result, ThetaDevice};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("theta_rust_ble=debug".parse().unwrap()),
        )
        .init();

    println!("Starting THETA camera discovery...");
    println!("Make sure Bluetooth is enabled on the camera!\n");

    let config = ClientConfig::default();
    let scanner = BleScanner::new(config.clone()).await?;
    let cameras = scanner.discover().await?;

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    for camera in cameras {
        println!("\nDiscovered camera:");
        println!("  Name: {}", camera.name);
        println!("  ID: {}", camera.identifier);
        println!("  RSSI: {:?} dBm", camera.rssi);

        let device = ThetaDevice::from_discovered(camera, config.clone());
        if let Err(e) = device.connect().await {
            println!("  Could not connect: {}", e);
            continue;
        }

        let info = device.camera_information();
        match info.get_model_number().await {
            Ok(model) => println!("  Model: {}", model),
            Err(e) => println!("  Model: {}", e),
        }
        match info.get_firmware_revision().await {
            Ok(firmware) => println!("  Firmware: {}", firmware),
            Err(e) => println!("  Firmware: {}", e),
        }

        let status = device.camera_status();
        match status.get_battery_level().await {
            Ok(level) => println!("  Battery: {}%", level),
            Err(e) => println!("  Battery: {}", e),
        }
        match status.get_battery_status().await {
            Ok(state) => println!("  Charging: {:?}", state),
            Err(e) => println!("  Charging: {}", e),
        }

        device.disconnect().await?;
    }

    Ok(())
}
