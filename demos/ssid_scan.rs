//! Example: List the Wi-Fi networks a camera can see
//!
//! Run with: cargo run --example ssid_scan

use std::time::Duration;
use theta_rust_ble::{BleScanner, ClientConfig, Result, ThetaDevice};
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("theta_rust_ble=debug".parse().unwrap()),
        )
        .init();

    let config = ClientConfig::default();
    let scanner = BleScanner::new(config.clone()).await?;
    let Some(camera) = scanner.discover().await?.into_iter().next() else {
        println!("No cameras found.");
        return Ok(());
    };

    let device = ThetaDevice::from_discovered(camera, config);
    device.connect().await?;

    let (done_tx, done_rx) = oneshot::channel();
    device
        .wlan_control()
        .start_ssid_scan(
            Some(Duration::from_secs(15)),
            Box::new(|found| match found {
                Ok(network) => println!(
                    "  {:<32} rssi {:>4?} {:?}",
                    network.ssid, network.rssi, network.security
                ),
                Err(e) => println!("  Bad report: {}", e),
            }),
            Box::new(move |networks| {
                let _ = done_tx.send(networks);
            }),
        )
        .await?;

    println!("Scanning for 15 seconds...\n");
    if let Ok(networks) = done_rx.await {
        println!("\nFound {} networks", networks.len());
    }

    device.disconnect().await?;
    Ok(())
}
