//! Notification subscription management.
//!
//! Holds at most one handler per characteristic. Each subscription owns a
//! delivery task that decodes inbound payloads and hands them to the handler.
//! The handler lives in a per-characteristic slot guarded by a mutex; delivery
//! runs the handler while holding that mutex, so replacing or clearing the
//! slot waits for an in-flight delivery and no stale handler runs afterwards.
//!
//! The subscription table is never locked while waiting on a slot, so a slow
//! handler only holds up changes to its own characteristic. Handlers must not
//! call back into [`NotificationManager::set_notify`] for their own
//! characteristic.

use futures::stream::StreamExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::ble::peripheral::{NotificationStream, Peripheral};
use crate::ble::uuids::BleCharacteristic;
use crate::error::{Error, Result};
use crate::protocol::codec::Decode;

/// Typed notification callback. Receives the decoded value or the decode error.
pub type NotifyCallback<T> = Box<dyn Fn(Result<T>) + Send + Sync>;

type RawHandler = Box<dyn Fn(&[u8]) + Send + Sync>;
type HandlerSlot = Arc<Mutex<Option<RawHandler>>>;

struct Subscription {
    handler: HandlerSlot,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Drop the handler, waiting for an in-flight delivery, then stop the task.
    fn close(self) {
        self.handler.lock().take();
        self.task.abort();
    }
}

/// Routes notifications to per-characteristic handlers.
#[derive(Default)]
pub struct NotificationManager {
    subscriptions: Mutex<HashMap<BleCharacteristic, Subscription>>,
}

impl NotificationManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register, replace or clear the handler for `characteristic`.
    ///
    /// `Some` installs the callback, replacing any previous one atomically.
    /// `None` removes it and stops the transport observation; once this
    /// returns no further invocation happens for the characteristic.
    pub async fn set_notify<T>(
        &self,
        peripheral: Arc<dyn Peripheral>,
        characteristic: BleCharacteristic,
        callback: Option<NotifyCallback<T>>,
    ) -> Result<()>
    where
        T: Decode + 'static,
    {
        if !peripheral.contains(characteristic) {
            return Err(Error::NotSupported { characteristic });
        }

        match callback {
            Some(callback) => {
                let handler: RawHandler =
                    Box::new(move |data: &[u8]| callback(T::decode(characteristic, data)));
                self.register(peripheral, characteristic, handler).await
            }
            None => self.unregister(peripheral, characteristic).await,
        }
    }

    async fn register(
        &self,
        peripheral: Arc<dyn Peripheral>,
        characteristic: BleCharacteristic,
        handler: RawHandler,
    ) -> Result<()> {
        // The table guard is never held while waiting on a slot: a delivery
        // holds its slot for the whole callback.
        let existing = self
            .subscriptions
            .lock()
            .get(&characteristic)
            .map(|s| (s.handler.clone(), s.task.is_finished()));

        match existing {
            Some((slot, false)) => {
                let mut current = slot.lock();
                if self.is_current(characteristic, &slot) {
                    *current = Some(handler);
                    debug!("Replaced notification handler for {}", characteristic);
                    return Ok(());
                }
            }
            Some((slot, true)) => {
                // The observation ended underneath us; subscribe again.
                if let Some(stale) = self.remove_if_current(characteristic, &slot) {
                    debug!("Notification stream for {} had ended", characteristic);
                    stale.close();
                }
            }
            None => {}
        }

        let stream = peripheral.observe(characteristic).await?;
        let slot: HandlerSlot = Arc::new(Mutex::new(Some(handler)));
        let task = tokio::spawn(deliver(characteristic, stream, slot.clone()));

        let previous = self.subscriptions.lock().insert(
            characteristic,
            Subscription {
                handler: slot,
                task,
            },
        );
        if let Some(previous) = previous {
            previous.close();
        }

        debug!("Registered notification handler for {}", characteristic);
        Ok(())
    }

    async fn unregister(
        &self,
        peripheral: Arc<dyn Peripheral>,
        characteristic: BleCharacteristic,
    ) -> Result<()> {
        let removed = self.subscriptions.lock().remove(&characteristic);
        match removed {
            Some(subscription) => {
                subscription.close();
                debug!("Cleared notification handler for {}", characteristic);
                peripheral.stop_observing(characteristic).await
            }
            None => Ok(()),
        }
    }

    fn is_current(&self, characteristic: BleCharacteristic, slot: &HandlerSlot) -> bool {
        self.subscriptions
            .lock()
            .get(&characteristic)
            .map_or(false, |s| Arc::ptr_eq(&s.handler, slot))
    }

    fn remove_if_current(
        &self,
        characteristic: BleCharacteristic,
        slot: &HandlerSlot,
    ) -> Option<Subscription> {
        let mut subscriptions = self.subscriptions.lock();
        match subscriptions.get(&characteristic) {
            Some(s) if Arc::ptr_eq(&s.handler, slot) => subscriptions.remove(&characteristic),
            _ => None,
        }
    }

    /// Check whether a handler is registered for `characteristic`.
    pub fn is_subscribed(&self, characteristic: BleCharacteristic) -> bool {
        self.subscriptions.lock().contains_key(&characteristic)
    }

    /// Characteristics with a registered handler.
    pub fn subscribed(&self) -> Vec<BleCharacteristic> {
        self.subscriptions.lock().keys().copied().collect()
    }
}

impl Drop for NotificationManager {
    fn drop(&mut self) {
        for (_, subscription) in self.subscriptions.get_mut().drain() {
            subscription.close();
        }
    }
}

async fn deliver(
    characteristic: BleCharacteristic,
    mut stream: NotificationStream,
    slot: HandlerSlot,
) {
    while let Some(data) = stream.next().await {
        trace!(
            "Notification from {}: {} bytes, data: {:02X?}",
            characteristic,
            data.len(),
            data
        );

        let delivered = {
            let handler = slot.lock();
            match handler.as_ref() {
                Some(handler) => {
                    handler(&data);
                    true
                }
                None => false,
            }
        };

        if !delivered {
            break;
        }
    }
    debug!("Notification delivery for {} ended", characteristic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::peripheral::MockPeripheral;
    use futures::channel::mpsc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    const CH: BleCharacteristic = BleCharacteristic::BatteryLevel;

    fn mock_with_stream(rx: mpsc::UnboundedReceiver<Vec<u8>>) -> MockPeripheral {
        let mut mock = MockPeripheral::new();
        mock.expect_contains().returning(|_| true);
        let rx = Mutex::new(Some(rx));
        mock.expect_observe()
            .times(1)
            .returning(move |_| Ok(rx.lock().take().expect("observed twice").boxed()));
        mock.expect_stop_observing().returning(|_| Ok(()));
        mock
    }

    #[tokio::test]
    async fn test_not_supported_before_observe() {
        let mut mock = MockPeripheral::new();
        mock.expect_contains().returning(|_| false);
        mock.expect_observe().never();
        mock.expect_stop_observing().never();

        let manager = NotificationManager::new();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock);
        let err = manager
            .set_notify::<u8>(peripheral.clone(), CH, Some(Box::new(|_| {})))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotSupported { .. }));

        let err = manager
            .set_notify::<u8>(peripheral, CH, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotSupported { .. }));
        assert!(!manager.is_subscribed(CH));
    }

    #[tokio::test]
    async fn test_delivers_values_and_empty_data_errors() {
        let (tx, rx) = mpsc::unbounded();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock_with_stream(rx));
        let manager = NotificationManager::new();

        let (out_tx, mut out_rx) = tokio::sync::mpsc::unbounded_channel();
        manager
            .set_notify::<u8>(
                peripheral,
                CH,
                Some(Box::new(move |value| {
                    let _ = out_tx.send(value);
                })),
            )
            .await
            .unwrap();

        tx.unbounded_send(vec![42]).unwrap();
        tx.unbounded_send(vec![]).unwrap();

        assert_eq!(out_rx.recv().await.unwrap().unwrap(), 42);
        assert!(matches!(
            out_rx.recv().await.unwrap(),
            Err(Error::EmptyData { .. })
        ));
    }

    #[tokio::test]
    async fn test_replace_keeps_single_observation() {
        let (tx, rx) = mpsc::unbounded();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock_with_stream(rx));
        let manager = NotificationManager::new();

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let counter = first.clone();
        manager
            .set_notify::<u8>(
                peripheral.clone(),
                CH,
                Some(Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .await
            .unwrap();

        let counter = second.clone();
        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
        manager
            .set_notify::<u8>(
                peripheral,
                CH,
                Some(Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let _ = seen_tx.send(());
                })),
            )
            .await
            .unwrap();

        tx.unbounded_send(vec![1]).unwrap();
        seen_rx.recv().await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(manager.subscribed(), vec![CH]);
    }

    #[tokio::test]
    async fn test_clear_stops_delivery() {
        let (tx, rx) = mpsc::unbounded();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock_with_stream(rx));
        let manager = NotificationManager::new();

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        manager
            .set_notify::<u8>(
                peripheral.clone(),
                CH,
                Some(Box::new(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .await
            .unwrap();

        manager
            .set_notify::<u8>(peripheral.clone(), CH, None)
            .await
            .unwrap();
        assert!(!manager.is_subscribed(CH));

        // The receiver may already be gone with the aborted task.
        let _ = tx.unbounded_send(vec![5]);
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // Clearing again is a no-op.
        manager.set_notify::<u8>(peripheral, CH, None).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_replace_during_slow_delivery_leaves_table_free() {
        let (tx, rx) = mpsc::unbounded();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock_with_stream(rx));
        let manager = Arc::new(NotificationManager::new());

        let (entered_tx, mut entered_rx) = tokio::sync::mpsc::unbounded_channel();
        let (seen_tx, mut seen_rx) = tokio::sync::mpsc::unbounded_channel();
        let weak = Arc::downgrade(&manager);
        manager
            .set_notify::<u8>(
                peripheral.clone(),
                CH,
                Some(Box::new(move |_| {
                    let _ = entered_tx.send(());
                    std::thread::sleep(Duration::from_millis(200));
                    // Reads the table while still holding the slot.
                    let subscribed = weak.upgrade().map(|m| m.subscribed()).unwrap_or_default();
                    let _ = seen_tx.send(subscribed);
                })),
            )
            .await
            .unwrap();

        tx.unbounded_send(vec![1]).unwrap();
        entered_rx.recv().await.unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let replacer = {
            let manager = manager.clone();
            let peripheral = peripheral.clone();
            let counter = calls.clone();
            tokio::spawn(async move {
                manager
                    .set_notify::<u8>(
                        peripheral,
                        CH,
                        Some(Box::new(move |_| {
                            counter.fetch_add(1, Ordering::SeqCst);
                        })),
                    )
                    .await
            })
        };

        let seen = tokio::time::timeout(Duration::from_secs(2), seen_rx.recv())
            .await
            .expect("slow handler could not read the subscription table")
            .unwrap();
        assert_eq!(seen, vec![CH]);

        tokio::time::timeout(Duration::from_secs(2), replacer)
            .await
            .expect("replace did not finish")
            .unwrap()
            .unwrap();

        tx.unbounded_send(vec![2]).unwrap();
        tokio::time::timeout(Duration::from_secs(2), async {
            while calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("replacement handler never ran");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_clear_waits_for_in_flight_delivery() {
        let (tx, rx) = mpsc::unbounded();
        let peripheral: Arc<dyn Peripheral> = Arc::new(mock_with_stream(rx));
        let manager = Arc::new(NotificationManager::new());

        let calls = Arc::new(AtomicUsize::new(0));
        let (entered_tx, mut entered_rx) = tokio::sync::mpsc::unbounded_channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);
        let counter = calls.clone();
        manager
            .set_notify::<u8>(
                peripheral.clone(),
                CH,
                Some(Box::new(move |_| {
                    let _ = entered_tx.send(());
                    let _ = release_rx.lock().recv();
                    counter.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .await
            .unwrap();

        tx.unbounded_send(vec![1]).unwrap();
        entered_rx.recv().await.unwrap();

        let cleared = Arc::new(AtomicBool::new(false));
        let clearer = {
            let manager = manager.clone();
            let cleared = cleared.clone();
            tokio::spawn(async move {
                let result = manager.set_notify::<u8>(peripheral, CH, None).await;
                cleared.store(true, Ordering::SeqCst);
                result
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!cleared.load(Ordering::SeqCst));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        release_tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(2), clearer)
            .await
            .expect("clear did not finish")
            .unwrap()
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Payloads arriving after the clear reach no handler.
        drop(release_tx);
        let _ = tx.unbounded_send(vec![2]);
        let _ = tx.unbounded_send(vec![3]);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!manager.is_subscribed(CH));
    }
}
