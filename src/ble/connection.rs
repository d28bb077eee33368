//! BLE connection management.
//!
//! Owns the single transport handle of a camera and gates access to it on the
//! connection state.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use crate::ble::peripheral::Peripheral;
use crate::error::{Error, Result};

/// Connection state for a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    /// Not connected to the camera.
    #[default]
    Disconnected,
    /// Currently attempting to connect.
    Connecting,
    /// Connected to the camera.
    Connected,
    /// Currently disconnecting.
    Disconnecting,
}

impl ConnectionState {
    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Check if in a transitional state.
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Connecting | Self::Disconnecting)
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connecting => write!(f, "Connecting"),
            Self::Connected => write!(f, "Connected"),
            Self::Disconnecting => write!(f, "Disconnecting"),
        }
    }
}

/// Event for connection state changes.
#[derive(Debug, Clone)]
pub struct ConnectionEvent {
    /// The identifier of the camera.
    pub identifier: String,
    /// The new connection state.
    pub state: ConnectionState,
}

/// Manages the connection to one camera.
pub struct ConnectionManager {
    /// Identifier used in events and logs.
    identifier: String,
    /// The transport.
    peripheral: Arc<dyn Peripheral>,
    /// Current connection state.
    state: Arc<RwLock<ConnectionState>>,
    /// Channel for connection events.
    event_tx: broadcast::Sender<ConnectionEvent>,
}

impl ConnectionManager {
    /// Create a new connection manager for a peripheral.
    pub fn new(identifier: impl Into<String>, peripheral: Arc<dyn Peripheral>) -> Self {
        let (event_tx, _) = broadcast::channel(16);

        Self {
            identifier: identifier.into(),
            peripheral,
            state: Arc::new(RwLock::new(ConnectionState::Disconnected)),
            event_tx,
        }
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.read()
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Subscribe to connection events.
    pub fn subscribe(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.event_tx.subscribe()
    }

    /// The identifier given at construction.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The transport, if a connection is active.
    pub fn peripheral(&self) -> Result<Arc<dyn Peripheral>> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(self.peripheral.clone())
    }

    /// Connect to the camera.
    pub async fn connect(&self) -> Result<()> {
        let current_state = self.state();

        if current_state.is_connected() {
            debug!("Already connected");
            return Ok(());
        }

        if current_state.is_transitioning() {
            return Err(Error::ConnectionFailed {
                reason: "Connection already in progress".to_string(),
            });
        }

        self.set_state(ConnectionState::Connecting);

        match self.peripheral.connect().await {
            Ok(()) => {
                info!("Connected to camera {}", self.identifier);
                self.set_state(ConnectionState::Connected);
                Ok(())
            }
            Err(e) => {
                error!("Failed to connect to camera {}: {}", self.identifier, e);
                self.set_state(ConnectionState::Disconnected);
                Err(Error::ConnectionFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Disconnect from the camera.
    pub async fn disconnect(&self) -> Result<()> {
        let current_state = self.state();

        if matches!(
            current_state,
            ConnectionState::Disconnected | ConnectionState::Disconnecting
        ) {
            return Ok(());
        }

        self.set_state(ConnectionState::Disconnecting);

        let result = self.peripheral.disconnect().await;
        self.set_state(ConnectionState::Disconnected);

        match result {
            Ok(()) => {
                info!("Disconnected from camera {}", self.identifier);
                Ok(())
            }
            Err(e) => {
                error!("Failed to disconnect: {}", e);
                Err(e)
            }
        }
    }

    /// Mark the link as lost without calling into the transport.
    pub fn handle_disconnection(&self) {
        info!("Connection to camera {} lost", self.identifier);
        self.set_state(ConnectionState::Disconnected);
    }

    /// Update the connection state and emit an event.
    fn set_state(&self, new_state: ConnectionState) {
        let old_state = {
            let mut state = self.state.write();
            let old = *state;
            *state = new_state;
            old
        };

        if old_state != new_state {
            debug!("Connection state changed: {} -> {}", old_state, new_state);

            let _ = self.event_tx.send(ConnectionEvent {
                identifier: self.identifier.clone(),
                state: new_state,
            });
        }
    }
}
