use std::collections::HashSet;
use std::sync::{mpsc, Mutex};

use checker_core::{DestinationId, Notification};
use checker_engine::{DeliveryError, UiSurface};
use engine_logging::engine_debug;

/// In-process stand-in for the page: a destination has no listener until the
/// relay injects one, after which notifications are forwarded to the overlay
/// loop.
pub struct TerminalSurface {
    listeners: Mutex<HashSet<DestinationId>>,
    tx: Mutex<mpsc::Sender<(DestinationId, Notification)>>,
}

impl TerminalSurface {
    pub fn new(tx: mpsc::Sender<(DestinationId, Notification)>) -> Self {
        Self {
            listeners: Mutex::new(HashSet::new()),
            tx: Mutex::new(tx),
        }
    }

    fn has_listener(&self, destination: DestinationId) -> bool {
        self.listeners
            .lock()
            .map(|listeners| listeners.contains(&destination))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl UiSurface for TerminalSurface {
    async fn send(
        &self,
        destination: DestinationId,
        notification: &Notification,
    ) -> Result<(), DeliveryError> {
        if !self.has_listener(destination) {
            return Err(DeliveryError::NoListener(destination));
        }
        let tx = self
            .tx
            .lock()
            .map_err(|_| DeliveryError::Closed(destination))?;
        tx.send((destination, notification.clone()))
            .map_err(|_| DeliveryError::Closed(destination))
    }

    async fn inject(&self, destination: DestinationId) -> Result<(), DeliveryError> {
        let mut listeners = self
            .listeners
            .lock()
            .map_err(|err| DeliveryError::Injection {
                destination,
                message: err.to_string(),
            })?;
        if listeners.insert(destination) {
            engine_debug!("Overlay listener installed for destination {}", destination);
        }
        Ok(())
    }
}
