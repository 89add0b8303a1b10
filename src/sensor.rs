use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};

use crate::reading::{Field, ReadingState};

/// Source of uniform samples in `[0, 1)` driving the simulation.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// One independently drawn point used to pre-populate the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSnapshot {
    pub label: String,
    pub aqi: f64,
    pub co2: f64,
    pub pm25: f64,
    pub o3: f64,
    pub voc: f64,
}

pub const DEFAULT_HISTORY_HOURS: usize = 24;

/// Simulated multi-pollutant sensor: a bounded random walk over [`ReadingState`].
pub struct SimulatedSensor {
    rng: Box<dyn RandomSource + Send>,
}

impl std::fmt::Debug for SimulatedSensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedSensor").finish_non_exhaustive()
    }
}

impl SimulatedSensor {
    pub fn new(rng: Box<dyn RandomSource + Send>) -> SimulatedSensor {
        SimulatedSensor { rng }
    }

    pub fn from_os_rng() -> SimulatedSensor {
        SimulatedSensor::new(Box::new(StdRng::from_os_rng()))
    }

    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// Next snapshot: every field moves by a uniform delta within
    /// `±Field::max_delta` and is clamped back into its range.
    pub fn step(&mut self, prev: &ReadingState) -> ReadingState {
        Field::ALL.iter().fold(*prev, |next, &field| {
            let delta = (self.rng.next_unit() - 0.5) * 2.0 * field.max_delta();
            next.with(field, prev.get(field) + delta)
        })
    }

    /// `hours` uncorrelated snapshots, oldest first, the last labelled "Now".
    pub fn seed_history(&mut self, hours: usize) -> Vec<HistoricalSnapshot> {
        (1..=hours)
            .rev()
            .map(|i| HistoricalSnapshot {
                label: if i == 1 {
                    "Now".to_string()
                } else {
                    format!("{i}h")
                },
                aqi: self.draw_whole(50.0, 100.0),
                co2: self.draw_whole(400.0, 300.0),
                pm25: self.draw_whole(25.0, 50.0),
                o3: self.draw_whole(20.0, 50.0),
                voc: self.draw_whole(100.0, 200.0),
            })
            .collect()
    }

    fn draw_whole(&mut self, low: f64, span: f64) -> f64 {
        low + (self.rng.next_unit() * span).floor()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Replays a fixed script of samples, cycling when exhausted.
    #[derive(Debug, Clone)]
    pub(crate) struct ScriptedRandom {
        script: Vec<f64>,
        pos: usize,
    }

    impl ScriptedRandom {
        pub(crate) fn new(script: Vec<f64>) -> ScriptedRandom {
            ScriptedRandom { script, pos: 0 }
        }

        pub(crate) fn constant(value: f64) -> ScriptedRandom {
            ScriptedRandom::new(vec![value])
        }
    }

    impl RandomSource for ScriptedRandom {
        fn next_unit(&mut self) -> f64 {
            let value = self.script[self.pos % self.script.len()];
            self.pos += 1;
            value
        }
    }

    #[test]
    fn test_step_with_zero_delta_keeps_state() {
        let mut sensor = SimulatedSensor::new(Box::new(ScriptedRandom::constant(0.5)));
        let prev = ReadingState::default();

        assert_eq!(sensor.step(&prev), prev);
    }

    #[test]
    fn test_step_with_max_positive_delta() {
        // aqi is drawn first; the rest stay put
        let mut script = vec![1.0];
        script.extend([0.5; 7]);
        let mut sensor = SimulatedSensor::new(Box::new(ScriptedRandom::new(script)));

        let next = sensor.step(&ReadingState::default());

        assert_eq!(next.aqi, f64::min(500.0, 78.0 + 5.0));
        assert_eq!(next.co2, 650.0);
    }

    #[test]
    fn test_step_clamps_at_range_edges() {
        let mut down = SimulatedSensor::new(Box::new(ScriptedRandom::constant(0.0)));
        let floor = ReadingState::default()
            .with(Field::Aqi, 0.0)
            .with(Field::Co2, 400.0)
            .with(Field::Temperature, 15.0);
        let next = down.step(&floor);
        assert_eq!(next.aqi, 0.0);
        assert_eq!(next.co2, 400.0);
        assert_eq!(next.temperature, 15.0);

        let mut up = SimulatedSensor::new(Box::new(ScriptedRandom::constant(1.0)));
        let ceiling = ReadingState::default().with(Field::Humidity, 89.5);
        assert_eq!(up.step(&ceiling).humidity, 90.0);
    }

    #[test]
    fn test_seed_history_labels_and_ranges() {
        let mut sensor = SimulatedSensor::new(Box::new(StdRng::seed_from_u64(7)));
        let history = sensor.seed_history(DEFAULT_HISTORY_HOURS);

        assert_eq!(history.len(), 24);
        assert_eq!(history[0].label, "24h");
        assert_eq!(history[22].label, "2h");
        assert_eq!(history[23].label, "Now");

        for snapshot in &history {
            assert!((50.0..150.0).contains(&snapshot.aqi));
            assert!((400.0..700.0).contains(&snapshot.co2));
            assert!((25.0..75.0).contains(&snapshot.pm25));
            assert!((20.0..70.0).contains(&snapshot.o3));
            assert!((100.0..300.0).contains(&snapshot.voc));
            assert_eq!(snapshot.aqi.fract(), 0.0);
        }
    }

    #[test]
    fn test_seed_history_upper_bound_is_exclusive() {
        let mut sensor = SimulatedSensor::new(Box::new(ScriptedRandom::constant(0.999_999)));
        let history = sensor.seed_history(1);

        assert_eq!(history[0].aqi, 149.0);
        assert_eq!(history[0].co2, 699.0);
    }

    proptest! {
        #[test]
        fn prop_step_stays_within_ranges(seed in any::<u64>(), steps in 1usize..500) {
            let mut sensor = SimulatedSensor::new(Box::new(StdRng::seed_from_u64(seed)));
            let mut state = ReadingState::default();
            for _ in 0..steps {
                state = sensor.step(&state);
                prop_assert!(state.is_within_ranges(), "{state:?}");
            }
        }

        #[test]
        fn prop_step_moves_at_most_max_delta(seed in any::<u64>()) {
            let mut sensor = SimulatedSensor::new(Box::new(StdRng::seed_from_u64(seed)));
            let prev = ReadingState::default();
            let next = sensor.step(&prev);
            for field in Field::ALL {
                prop_assert!((next.get(field) - prev.get(field)).abs() <= field.max_delta() + 1e-9);
            }
        }
    }
}
