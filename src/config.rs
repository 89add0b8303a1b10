use std::time::Duration;

use crate::{
    notification::{NOTIFICATION_CAPACITY, NOTIFICATION_PROBABILITY},
    sensor::DEFAULT_HISTORY_HOURS,
};

pub const TICK_PERIOD: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub tick_period: Duration,
    pub notification_probability: f64,
    pub notification_capacity: usize,
    pub history_hours: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            tick_period: TICK_PERIOD,
            notification_probability: NOTIFICATION_PROBABILITY,
            notification_capacity: NOTIFICATION_CAPACITY,
            history_hours: DEFAULT_HISTORY_HOURS,
        }
    }
}
