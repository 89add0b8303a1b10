use chrono::Local;

use crate::{
    chart::RollingWindowChart,
    classify::{AqiCategory, PollutantReading, classify_aqi, classify_pollutants, predict_next_aqi},
    config::DashboardConfig,
    device::Device,
    notification::NotificationQueue,
    reading::ReadingState,
    render::{DashboardView, Renderer},
    sensor::SimulatedSensor,
};

/// State of one logged-in dashboard. Dropped on logout.
#[derive(Debug)]
pub struct Session {
    device: &'static Device,
    config: DashboardConfig,
    sensor: SimulatedSensor,
    readings: ReadingState,
    category: AqiCategory,
    pollutants: Vec<PollutantReading>,
    aqi_chart: RollingWindowChart,
    pollutant_chart: RollingWindowChart,
    notifications: NotificationQueue,
    ticks: u64,
}

impl Session {
    pub fn new(
        device: &'static Device,
        config: DashboardConfig,
        mut sensor: SimulatedSensor,
    ) -> Session {
        let history = sensor.seed_history(config.history_hours);

        let mut aqi_chart = RollingWindowChart::new("AQI Trend", ["AQI"]);
        if let Err(e) = aqi_chart.seed(history.iter().map(|s| (s.label.clone(), [s.aqi]))) {
            log::error!("Failed to seed {}: {e}", aqi_chart.title());
        }

        let mut pollutant_chart = RollingWindowChart::new("Pollutants", ["PM2.5", "O₃", "VOCs"]);
        if let Err(e) = pollutant_chart.seed(
            history
                .iter()
                .map(|s| (s.label.clone(), [s.pm25, s.o3, s.voc])),
        ) {
            log::error!("Failed to seed {}: {e}", pollutant_chart.title());
        }

        let readings = ReadingState::default();
        let notifications = NotificationQueue::with_capacity(config.notification_capacity);

        Session {
            device,
            config,
            sensor,
            readings,
            category: classify_aqi(readings.aqi.round()),
            pollutants: classify_pollutants(&readings),
            aqi_chart,
            pollutant_chart,
            notifications,
            ticks: 0,
        }
    }

    /// Initial draw before the first tick.
    pub fn present(&self, renderer: &mut dyn Renderer) {
        renderer.seed_chart(&self.aqi_chart);
        renderer.seed_chart(&self.pollutant_chart);
        renderer.render(&self.view());
    }

    /// One update: step the feed, reclassify, advance both charts,
    /// maybe raise an alert, then render.
    pub fn tick(&mut self, renderer: &mut dyn Renderer) {
        self.readings = self.sensor.step(&self.readings);
        self.ticks += 1;
        debug_assert!(self.readings.is_within_ranges());

        self.category = classify_aqi(self.readings.aqi.round());
        self.pollutants = classify_pollutants(&self.readings);

        let label = Local::now().format("%H:%M:%S").to_string();
        let r = &self.readings;
        if let Err(e) = self.aqi_chart.advance(label.clone(), &[r.aqi.round()]) {
            log::error!("Failed to advance {}: {e}", self.aqi_chart.title());
        }
        if let Err(e) = self
            .pollutant_chart
            .advance(label, &[r.pm25.round(), r.o3.round(), r.voc.round()])
        {
            log::error!("Failed to advance {}: {e}", self.pollutant_chart.title());
        }
        renderer.advance_chart(&self.aqi_chart);
        renderer.advance_chart(&self.pollutant_chart);

        if let Some(notification) = self.notifications.trigger(
            self.readings.aqi,
            self.config.notification_probability,
            self.sensor.rng(),
        ) {
            log::warn!("{}", notification.message);
        }

        log::debug!("tick {}: {:?}", self.ticks, self.readings);
        renderer.render(&self.view());
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            device: self.device,
            readings: &self.readings,
            category: self.category,
            pollutants: &self.pollutants,
            predicted_aqi: predict_next_aqi(self.readings.aqi),
            notifications: &self.notifications,
        }
    }

    pub fn device(&self) -> &'static Device {
        self.device
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn readings(&self) -> &ReadingState {
        &self.readings
    }

    pub fn aqi_chart(&self) -> &RollingWindowChart {
        &self.aqi_chart
    }

    pub fn pollutant_chart(&self) -> &RollingWindowChart {
        &self.pollutant_chart
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
