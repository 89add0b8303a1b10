use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::sensor::RandomSource;

pub const NOTIFICATION_CAPACITY: usize = 5;
pub const NOTIFICATION_PROBABILITY: f64 = 0.05;
pub const NOTIFICATION_AQI_THRESHOLD: f64 = 75.0;
pub const ELEVATED_AQI_MESSAGE: &str = "AQI levels elevated - Check ventilation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Creation time in milliseconds since the Unix epoch, bumped when needed
    /// so ids stay unique within a queue.
    pub id: i64,
    pub message: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

/// Whether this tick raises an alert. Independent per call, no debounce.
pub fn should_trigger(
    current_aqi: f64,
    probability: f64,
    threshold: f64,
    rng: &mut dyn RandomSource,
) -> bool {
    let roll = rng.next_unit();
    roll < probability && current_aqi > threshold
}

/// Most-recent-first list of alerts, truncated to `capacity`.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    capacity: usize,
    entries: VecDeque<Notification>,
    last_id: i64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        NotificationQueue::with_capacity(NOTIFICATION_CAPACITY)
    }
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> NotificationQueue {
        NotificationQueue {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
            last_id: i64::MIN,
        }
    }

    pub fn push(&mut self, message: impl Into<String>) -> Notification {
        let created_at = Local::now();
        let id = created_at.timestamp_millis().max(self.last_id.saturating_add(1));
        self.last_id = id;

        let notification = Notification {
            id,
            message: message.into(),
            created_at,
        };
        self.entries.push_front(notification.clone());
        self.entries.truncate(self.capacity);

        notification
    }

    /// Pushes the elevated-AQI alert when [`should_trigger`] fires.
    pub fn trigger(
        &mut self,
        current_aqi: f64,
        probability: f64,
        rng: &mut dyn RandomSource,
    ) -> Option<Notification> {
        if should_trigger(current_aqi, probability, NOTIFICATION_AQI_THRESHOLD, rng) {
            Some(self.push(ELEVATED_AQI_MESSAGE))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
