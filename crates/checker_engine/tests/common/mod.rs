#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use checker_core::{DestinationId, Notification, ResultPayload};
use checker_engine::NotificationSink;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(DestinationId, Notification)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<(DestinationId, Notification)> {
        self.events.lock().unwrap().drain(..).collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, destination: DestinationId, notification: Notification) {
        self.events.lock().unwrap().push((destination, notification));
    }
}

pub fn terminal_payloads(notifications: &[Notification]) -> Vec<ResultPayload> {
    notifications
        .iter()
        .filter_map(|n| n.result_payload().cloned())
        .collect()
}

pub fn percentages(notifications: &[Notification]) -> Vec<u8> {
    notifications
        .iter()
        .filter_map(|n| n.progress_event().map(|p| p.percentage))
        .collect()
}

pub fn frame(json: &str) -> String {
    format!("data: {json}\n\n")
}
