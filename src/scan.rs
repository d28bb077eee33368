//! Timed discovery sessions driven by notifications.
//!
//! A [`ScanEngine`] runs one scan at a time: `Idle -> Scanning -> Idle`, left
//! either through [`ScanEngine::stop`] or through its timeout. Both exits run
//! the same completion path, which clears the notification handler, lets the
//! [`ScanKind`] restore the camera, and hands the accumulated items to the
//! completion callback exactly once.
//!
//! Discovered items are kept in first-seen order and deduplicated by
//! [`ScanKind::key`]; a repeat report replaces the stored item in place.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::ble::notification::{NotificationManager, NotifyCallback};
use crate::ble::peripheral::Peripheral;
use crate::ble::uuids::BleCharacteristic;
use crate::error::Result;
use crate::protocol::codec::Decode;

/// Scan timeout used when the caller does not supply one.
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-item callback. Receives each decoded report, or the decode error.
pub type FoundCallback<T> = Box<dyn Fn(Result<T>) + Send + Sync>;

/// Completion callback. Receives the accumulated items.
pub type CompleteCallback<T> = Box<dyn FnOnce(Vec<T>) + Send>;

/// What differs between scan flavours.
#[async_trait]
pub trait ScanKind: Send + Sync + 'static {
    /// Item reported by each notification.
    type Item: Decode + Clone + Send + Sync + 'static;

    /// Deduplication key.
    type Key: PartialEq;

    /// Characteristic that carries one item per notification.
    const NOTIFY: BleCharacteristic;

    /// Name used in logs.
    const NAME: &'static str;

    /// Deduplication key of `item`.
    fn key(item: &Self::Item) -> Self::Key;

    /// Ask the camera to start reporting.
    async fn begin(&self, peripheral: &dyn Peripheral) -> Result<()>;

    /// Return the camera to its idle configuration.
    async fn end(&self, peripheral: &dyn Peripheral) -> Result<()>;
}

struct ActiveScan<T> {
    on_complete: CompleteCallback<T>,
}

struct ScanTimer {
    cancel: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

struct ScanSlot<T> {
    active: Option<ActiveScan<T>>,
    timer: Option<ScanTimer>,
}

struct ScanInner<K: ScanKind> {
    kind: K,
    notifications: Arc<NotificationManager>,
    accumulator: Arc<Mutex<Vec<K::Item>>>,
    slot: Mutex<ScanSlot<K::Item>>,
}

impl<K: ScanKind> ScanInner<K> {
    /// Shared exit path. Only the caller that takes the active scan tears it down.
    async fn complete(&self, peripheral: Arc<dyn Peripheral>) -> Result<()> {
        let active = self.slot.lock().active.take();
        let Some(active) = active else {
            return Ok(());
        };

        let cleared = self
            .notifications
            .set_notify::<K::Item>(peripheral.clone(), K::NOTIFY, None)
            .await;
        let ended = self.kind.end(peripheral.as_ref()).await;

        let items = self.accumulator.lock().clone();
        info!("{} scan finished with {} results", K::NAME, items.len());
        (active.on_complete)(items);

        cleared.and(ended)
    }
}

/// One scan engine instance; owns its accumulator and timer.
pub struct ScanEngine<K: ScanKind> {
    inner: Arc<ScanInner<K>>,
    /// Serializes start/stop against each other.
    op_lock: tokio::sync::Mutex<()>,
}

impl<K: ScanKind> ScanEngine<K> {
    /// Create an idle engine.
    pub fn new(kind: K, notifications: Arc<NotificationManager>) -> Self {
        Self {
            inner: Arc::new(ScanInner {
                kind,
                notifications,
                accumulator: Arc::new(Mutex::new(Vec::new())),
                slot: Mutex::new(ScanSlot {
                    active: None,
                    timer: None,
                }),
            }),
            op_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Check whether a scan is in progress.
    pub fn is_scanning(&self) -> bool {
        self.inner.slot.lock().active.is_some()
    }

    /// Items accumulated by the current or last scan.
    pub fn results(&self) -> Vec<K::Item> {
        self.inner.accumulator.lock().clone()
    }

    /// Start a scan, stopping any scan already in progress first.
    ///
    /// If the camera cannot be told to start, the handler is removed again and
    /// the engine stays idle.
    pub async fn start(
        &self,
        peripheral: Arc<dyn Peripheral>,
        timeout: Duration,
        on_found: FoundCallback<K::Item>,
        on_complete: CompleteCallback<K::Item>,
    ) -> Result<()> {
        let _op = self.op_lock.lock().await;

        if let Err(e) = self.finish(peripheral.clone()).await {
            warn!("Failed to stop previous {} scan: {}", K::NAME, e);
        }

        self.inner.accumulator.lock().clear();

        let accumulator = self.inner.accumulator.clone();
        let handler: NotifyCallback<K::Item> = Box::new(move |result| {
            if let Ok(item) = &result {
                upsert::<K>(&accumulator, item.clone());
            }
            on_found(result);
        });
        self.inner
            .notifications
            .set_notify(peripheral.clone(), K::NOTIFY, Some(handler))
            .await?;

        if let Err(e) = self.inner.kind.begin(peripheral.as_ref()).await {
            warn!("Failed to start {} scan: {}", K::NAME, e);
            if let Err(clear) = self
                .inner
                .notifications
                .set_notify::<K::Item>(peripheral, K::NOTIFY, None)
                .await
            {
                warn!("Failed to clear {} scan handler: {}", K::NAME, clear);
            }
            return Err(e);
        }

        // Active before the timer exists, so an immediate timeout still completes.
        self.inner.slot.lock().active = Some(ActiveScan { on_complete });

        let (cancel, cancel_rx) = oneshot::channel();
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {
                    debug!("{} scan timed out after {:?}", K::NAME, timeout);
                    if let Err(e) = inner.complete(peripheral).await {
                        warn!("{} scan teardown failed: {}", K::NAME, e);
                    }
                }
                _ = cancel_rx => {}
            }
        });
        self.inner.slot.lock().timer = Some(ScanTimer { cancel, handle });

        info!("{} scan started, timeout {:?}", K::NAME, timeout);
        Ok(())
    }

    /// Stop the scan in progress. A no-op when idle.
    pub async fn stop(&self, peripheral: Arc<dyn Peripheral>) -> Result<()> {
        let _op = self.op_lock.lock().await;
        self.finish(peripheral).await
    }

    /// Cancel and join the timer, then complete if the timer did not.
    async fn finish(&self, peripheral: Arc<dyn Peripheral>) -> Result<()> {
        let timer = self.inner.slot.lock().timer.take();
        if let Some(timer) = timer {
            let _ = timer.cancel.send(());
            if let Err(e) = timer.handle.await {
                warn!("{} scan timer ended abnormally: {}", K::NAME, e);
            }
        }
        self.inner.complete(peripheral).await
    }
}

fn upsert<K: ScanKind>(accumulator: &Mutex<Vec<K::Item>>, item: K::Item) {
    let key = K::key(&item);
    let mut items = accumulator.lock();
    match items.iter_mut().find(|existing| K::key(existing) == key) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}
