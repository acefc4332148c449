use std::sync::Arc;

use checker_core::{DestinationId, Notification};
use engine_logging::{engine_debug, engine_warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("no listener registered for destination {0}")]
    NoListener(DestinationId),
    #[error("destination {0} is closed")]
    Closed(DestinationId),
    #[error("failed to install listener in destination {destination}: {message}")]
    Injection {
        destination: DestinationId,
        message: String,
    },
}

/// The page-side surface that renders notifications.
#[async_trait::async_trait]
pub trait UiSurface: Send + Sync {
    /// Hands `notification` to the listener of `destination`.
    async fn send(
        &self,
        destination: DestinationId,
        notification: &Notification,
    ) -> Result<(), DeliveryError>;

    /// Installs the listener into `destination`.
    async fn inject(&self, destination: DestinationId) -> Result<(), DeliveryError>;
}

/// Where sessions push their notifications. Delivery is best effort.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, destination: DestinationId, notification: Notification);
}

/// Delivers to a [`UiSurface`], injecting the listener once if it is missing.
#[derive(Clone)]
pub struct NotificationRelay {
    surface: Arc<dyn UiSurface>,
}

impl NotificationRelay {
    pub fn new(surface: Arc<dyn UiSurface>) -> Self {
        Self { surface }
    }
}

#[async_trait::async_trait]
impl NotificationSink for NotificationRelay {
    async fn deliver(&self, destination: DestinationId, notification: Notification) {
        let err = match self.surface.send(destination, &notification).await {
            Ok(()) => return,
            Err(err) => err,
        };

        if !matches!(err, DeliveryError::NoListener(_)) {
            engine_warn!("Dropping notification for destination {}: {}", destination, err);
            return;
        }

        engine_debug!("No listener in destination {}; injecting", destination);
        if let Err(err) = self.surface.inject(destination).await {
            engine_warn!("Dropping notification for destination {}: {}", destination, err);
            return;
        }
        if let Err(err) = self.surface.send(destination, &notification).await {
            engine_warn!(
                "Dropping notification for destination {} after injection: {}",
                destination,
                err
            );
        }
    }
}
