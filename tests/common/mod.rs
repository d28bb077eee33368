//! In-memory camera used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use theta_rust_ble::{
    BleCharacteristic, Error, NotificationStream, Peripheral, Result, ThetaDevice,
};

/// A camera exposing a configurable GATT table.
///
/// Reads return the stored value for the characteristic. The options pair
/// behaves like the real camera: a write to `SetOptions` merges into the
/// stored options, a write to `GetOptions` selects the names that the next
/// read of `GetOptions` returns.
pub struct FakeCamera {
    supported: HashSet<BleCharacteristic>,
    values: Mutex<HashMap<BleCharacteristic, Vec<u8>>>,
    reads: Mutex<Vec<BleCharacteristic>>,
    writes: Mutex<Vec<(BleCharacteristic, Vec<u8>)>>,
    failing_writes: Mutex<HashSet<BleCharacteristic>>,
    observers: Mutex<HashMap<BleCharacteristic, mpsc::UnboundedSender<Vec<u8>>>>,
    options: Mutex<Map<String, Value>>,
    requested: Mutex<Vec<String>>,
}

impl FakeCamera {
    /// Camera exposing every characteristic.
    pub fn new() -> Self {
        Self::without(&[])
    }

    /// Camera missing `absent`.
    pub fn without(absent: &[BleCharacteristic]) -> Self {
        Self {
            supported: BleCharacteristic::ALL
                .into_iter()
                .filter(|ch| !absent.contains(ch))
                .collect(),
            values: Mutex::new(HashMap::new()),
            reads: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            failing_writes: Mutex::new(HashSet::new()),
            observers: Mutex::new(HashMap::new()),
            options: Mutex::new(Map::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn set_value(&self, characteristic: BleCharacteristic, data: impl Into<Vec<u8>>) {
        self.values.lock().insert(characteristic, data.into());
    }

    pub fn set_option(&self, name: &str, value: Value) {
        self.options.lock().insert(name.to_string(), value);
    }

    pub fn fail_writes_to(&self, characteristic: BleCharacteristic) {
        self.failing_writes.lock().insert(characteristic);
    }

    pub fn reads(&self) -> Vec<BleCharacteristic> {
        self.reads.lock().clone()
    }

    pub fn writes(&self) -> Vec<(BleCharacteristic, Vec<u8>)> {
        self.writes.lock().clone()
    }

    pub fn writes_to(&self, characteristic: BleCharacteristic) -> Vec<Vec<u8>> {
        self.writes
            .lock()
            .iter()
            .filter(|(ch, _)| *ch == characteristic)
            .map(|(_, data)| data.clone())
            .collect()
    }

    pub fn is_observed(&self, characteristic: BleCharacteristic) -> bool {
        self.observers.lock().contains_key(&characteristic)
    }

    /// End the notification stream for `characteristic`, as a dropped link does.
    pub fn end_observation(&self, characteristic: BleCharacteristic) {
        self.observers.lock().remove(&characteristic);
    }

    /// Emit a notification. Returns false when nobody observes the characteristic.
    pub fn notify(&self, characteristic: BleCharacteristic, data: impl Into<Vec<u8>>) -> bool {
        match self.observers.lock().get(&characteristic) {
            Some(tx) => tx.unbounded_send(data.into()).is_ok(),
            None => false,
        }
    }

    /// Emit a JSON notification.
    pub fn notify_json(&self, characteristic: BleCharacteristic, value: Value) -> bool {
        self.notify(characteristic, value.to_string().into_bytes())
    }

    fn options_response(&self) -> Vec<u8> {
        let options = self.options.lock();
        let response: Map<String, Value> = self
            .requested
            .lock()
            .iter()
            .filter_map(|name| options.get(name).map(|v| (name.clone(), v.clone())))
            .collect();
        Value::Object(response).to_string().into_bytes()
    }
}

#[async_trait]
impl Peripheral for FakeCamera {
    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        true
    }

    fn contains(&self, characteristic: BleCharacteristic) -> bool {
        self.supported.contains(&characteristic)
    }

    async fn read(&self, characteristic: BleCharacteristic) -> Result<Vec<u8>> {
        self.reads.lock().push(characteristic);
        if let Some(data) = self.values.lock().get(&characteristic) {
            return Ok(data.clone());
        }
        match characteristic {
            BleCharacteristic::GetOptions => Ok(self.options_response()),
            _ => Ok(Vec::new()),
        }
    }

    async fn write(&self, characteristic: BleCharacteristic, data: &[u8]) -> Result<()> {
        if self.failing_writes.lock().contains(&characteristic) {
            return Err(Error::Bluetooth(btleplug::Error::RuntimeError(format!(
                "write to {} rejected",
                characteristic
            ))));
        }
        self.writes.lock().push((characteristic, data.to_vec()));

        match characteristic {
            BleCharacteristic::SetOptions => {
                let update: Map<String, Value> = serde_json::from_slice(data)?;
                self.options.lock().extend(update);
            }
            BleCharacteristic::GetOptions => {
                *self.requested.lock() = serde_json::from_slice(data)?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn observe(&self, characteristic: BleCharacteristic) -> Result<NotificationStream> {
        let (tx, rx) = mpsc::unbounded();
        self.observers.lock().insert(characteristic, tx);
        Ok(rx.boxed())
    }

    async fn stop_observing(&self, characteristic: BleCharacteristic) -> Result<()> {
        self.observers.lock().remove(&characteristic);
        Ok(())
    }
}

/// Install a test log subscriber once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Connected device over `camera`.
pub async fn connected(camera: &Arc<FakeCamera>) -> ThetaDevice {
    init_tracing();
    let device = ThetaDevice::new("fake-theta", camera.clone());
    device.connect().await.expect("fake camera connects");
    device
}
