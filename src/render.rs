use crate::{
    chart::RollingWindowChart,
    classify::{AqiCategory, PollutantReading},
    device::Device,
    notification::NotificationQueue,
    reading::ReadingState,
};

/// Everything the render step reads after a tick.
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    pub device: &'a Device,
    pub readings: &'a ReadingState,
    pub category: AqiCategory,
    pub pollutants: &'a [PollutantReading],
    pub predicted_aqi: i64,
    pub notifications: &'a NotificationQueue,
}

/// Output side of the dashboard: the render step plus chart drawing.
pub trait Renderer {
    fn seed_chart(&mut self, chart: &RollingWindowChart);
    fn advance_chart(&mut self, chart: &RollingWindowChart);
    fn render(&mut self, view: &DashboardView<'_>);
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Scales `points` into block characters between their own min and max.
pub fn sparkline<'a>(points: impl IntoIterator<Item = &'a f64> + Clone) -> String {
    let (min, max) = points
        .clone()
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        });
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    points
        .into_iter()
        .map(|&p| {
            let level = if span > 0.0 {
                ((p - min) / span * top).round() as usize
            } else {
                0
            };
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

/// Writes the dashboard through the `log` facade.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    fn draw_chart(&self, chart: &RollingWindowChart) {
        let first = chart.labels().next().unwrap_or_default();
        let last = chart.labels().last().unwrap_or_default();
        for (name, points) in chart.series() {
            log::info!(
                "[{}] {name:>6} {} ({first} .. {last}, latest {})",
                chart.title(),
                sparkline(points),
                points.back().copied().unwrap_or_default()
            );
        }
    }
}

impl Renderer for TerminalRenderer {
    fn seed_chart(&mut self, chart: &RollingWindowChart) {
        self.draw_chart(chart);
    }

    fn advance_chart(&mut self, chart: &RollingWindowChart) {
        self.draw_chart(chart);
    }

    fn render(&mut self, view: &DashboardView<'_>) {
        let r = view.readings;
        log::info!(
            "{} ({}) | AQI {} {} | predicted {} | {:.1}°C | {}%",
            view.device.name,
            view.device.location,
            r.aqi.round(),
            view.category,
            view.predicted_aqi,
            r.temperature,
            r.humidity.round()
        );

        let pollutants: Vec<String> = view
            .pollutants
            .iter()
            .map(|p| {
                format!(
                    "{} {:.1} {} {}",
                    p.pollutant.name(),
                    p.value,
                    p.pollutant.unit(),
                    p.status
                )
            })
            .collect();
        log::info!("{}", pollutants.join(" | "));

        if !view.notifications.is_empty() {
            log::info!("🔔 {} notification(s)", view.notifications.len());
            for notification in view.notifications.iter() {
                log::info!("  {} {}", notification.time(), notification.message);
            }
        }
    }
}
