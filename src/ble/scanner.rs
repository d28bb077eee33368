//! Nearby camera discovery.
//!
//! Listens to adapter events and keeps every advertiser whose local name
//! starts with the configured prefix.

use btleplug::api::{Central, CentralEvent, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::{Adapter, Manager, Peripheral, PeripheralId};
use futures::stream::StreamExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, trace};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// A camera seen while scanning.
#[derive(Debug, Clone)]
pub struct DiscoveredCamera {
    /// Platform identifier of the peripheral.
    pub identifier: String,
    /// Advertised local name, e.g. `"THETAYR12345678"`.
    pub name: String,
    /// Signal strength in dBm.
    pub rssi: Option<i16>,
    /// The peripheral handle.
    pub peripheral: Peripheral,
}

/// Whether an advertised name belongs to a camera.
pub fn is_camera_name(name: &str, prefix: &str) -> bool {
    name.starts_with(prefix)
}

type Discovered = Arc<RwLock<HashMap<String, DiscoveredCamera>>>;

/// BLE scanner for discovering cameras.
pub struct BleScanner {
    /// The BLE adapter to use for scanning.
    adapter: Adapter,
    /// Discovery settings.
    config: ClientConfig,
    /// Whether scanning is currently active.
    is_scanning: Arc<RwLock<bool>>,
    /// Cameras seen so far, keyed by identifier.
    discovered: Discovered,
    /// Channel for discovery events.
    event_tx: broadcast::Sender<DiscoveredCamera>,
    /// Handle to the scanning task.
    scan_handle: RwLock<Option<tokio::task::JoinHandle<()>>>,
}

impl BleScanner {
    /// Create a scanner on the first Bluetooth adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if Bluetooth is not available.
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let manager = Manager::new()
            .await
            .map_err(|_e| Error::BluetoothUnavailable)?;

        let adapter = manager
            .adapters()
            .await?
            .into_iter()
            .next()
            .ok_or(Error::BluetoothUnavailable)?;

        info!(
            "Using Bluetooth adapter: {:?}",
            adapter.adapter_info().await.ok()
        );

        Ok(Self::with_adapter(adapter, config))
    }

    /// Create a scanner with a specific adapter.
    pub fn with_adapter(adapter: Adapter, config: ClientConfig) -> Self {
        let (event_tx, _) = broadcast::channel(64);

        Self {
            adapter,
            config,
            is_scanning: Arc::new(RwLock::new(false)),
            discovered: Arc::new(RwLock::new(HashMap::new())),
            event_tx,
            scan_handle: RwLock::new(None),
        }
    }

    /// Scan for the configured discovery window and return the cameras seen.
    pub async fn discover(&self) -> Result<Vec<DiscoveredCamera>> {
        self.start_scanning().await?;
        tokio::time::sleep(self.config.discovery_timeout).await;
        self.stop_scanning().await?;

        let mut cameras: Vec<DiscoveredCamera> =
            self.discovered.read().values().cloned().collect();
        cameras.sort_by(|a, b| a.name.cmp(&b.name));
        info!("Discovered {} cameras", cameras.len());
        Ok(cameras)
    }

    /// Start scanning for cameras.
    ///
    /// # Errors
    ///
    /// Returns an error if scanning cannot be started.
    pub async fn start_scanning(&self) -> Result<()> {
        if *self.is_scanning.read() {
            debug!("Already scanning, ignoring start request");
            return Ok(());
        }

        info!(
            "Starting BLE scan for cameras named {}*",
            self.config.name_prefix
        );

        self.adapter.start_scan(ScanFilter::default()).await?;
        *self.is_scanning.write() = true;

        let adapter = self.adapter.clone();
        let prefix = self.config.name_prefix.clone();
        let is_scanning = self.is_scanning.clone();
        let discovered = self.discovered.clone();
        let event_tx = self.event_tx.clone();

        let handle = tokio::spawn(async move {
            let mut events = match adapter.events().await {
                Ok(events) => events,
                Err(e) => {
                    error!("Failed to get adapter events: {}", e);
                    return;
                }
            };

            while *is_scanning.read() {
                tokio::select! {
                    Some(event) = events.next() => {
                        if let CentralEvent::DeviceDiscovered(id)
                        | CentralEvent::DeviceUpdated(id) = event
                        {
                            trace!("Device seen: {:?}", id);
                            Self::process_peripheral(
                                &adapter,
                                id,
                                &prefix,
                                &discovered,
                                &event_tx,
                            )
                            .await;
                        }
                    }
                    _ = tokio::time::sleep(Duration::from_millis(100)) => {}
                }
            }

            debug!("Scan event loop ended");
        });

        *self.scan_handle.write() = Some(handle);

        Ok(())
    }

    /// Stop scanning for cameras.
    pub async fn stop_scanning(&self) -> Result<()> {
        if !*self.is_scanning.read() {
            debug!("Not scanning, ignoring stop request");
            return Ok(());
        }

        info!("Stopping BLE scan");
        *self.is_scanning.write() = false;
        self.adapter.stop_scan().await?;

        let handle = self.scan_handle.write().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }

        Ok(())
    }

    /// Check if currently scanning.
    pub fn is_scanning(&self) -> bool {
        *self.is_scanning.read()
    }

    /// All cameras seen so far.
    pub fn discovered_cameras(&self) -> HashMap<String, DiscoveredCamera> {
        self.discovered.read().clone()
    }

    /// Subscribe to discovery events.
    pub fn subscribe(&self) -> broadcast::Receiver<DiscoveredCamera> {
        self.event_tx.subscribe()
    }

    async fn process_peripheral(
        adapter: &Adapter,
        id: PeripheralId,
        prefix: &str,
        discovered: &Discovered,
        event_tx: &broadcast::Sender<DiscoveredCamera>,
    ) {
        let peripheral = match adapter.peripheral(&id).await {
            Ok(p) => p,
            Err(e) => {
                trace!("Failed to get peripheral: {}", e);
                return;
            }
        };

        let properties = match peripheral.properties().await {
            Ok(Some(p)) => p,
            _ => return,
        };

        let name = match properties.local_name {
            Some(name) if is_camera_name(&name, prefix) => name,
            _ => return,
        };

        let camera = DiscoveredCamera {
            identifier: id.to_string(),
            name,
            rssi: properties.rssi,
            peripheral,
        };

        let is_new = discovered
            .write()
            .insert(camera.identifier.clone(), camera.clone())
            .is_none();
        if is_new {
            debug!("Found camera {} ({})", camera.name, camera.identifier);
        }

        let _ = event_tx.send(camera);
    }
}

impl Drop for BleScanner {
    fn drop(&mut self) {
        *self.is_scanning.write() = false;
    }
}
