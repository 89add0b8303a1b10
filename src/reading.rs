use std::ops::RangeInclusive;

/// One field of a [`ReadingState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Aqi,
    Co2,
    Co,
    O3,
    Voc,
    Pm25,
    Temperature,
    Humidity,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Aqi,
        Field::Co2,
        Field::Co,
        Field::O3,
        Field::Voc,
        Field::Pm25,
        Field::Temperature,
        Field::Humidity,
    ];

    /// Closed range the field is clamped into.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Field::Aqi => 0.0..=500.0,
            Field::Co2 => 400.0..=2000.0,
            Field::Co => 0.0..=50.0,
            Field::O3 => 0.0..=200.0,
            Field::Voc => 0.0..=500.0,
            Field::Pm25 => 0.0..=500.0,
            Field::Temperature => 15.0..=35.0,
            Field::Humidity => 30.0..=90.0,
        }
    }

    /// Largest per-tick change of the simulated walk, in either direction.
    pub fn max_delta(self) -> f64 {
        match self {
            Field::Aqi => 5.0,
            Field::Co2 => 10.0,
            Field::Co => 0.25,
            Field::O3 => 2.5,
            Field::Voc => 5.0,
            Field::Pm25 => 2.5,
            Field::Temperature => 0.25,
            Field::Humidity => 1.0,
        }
    }

    pub fn clamp(self, value: f64) -> f64 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

/// Current sensor snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingState {
    pub aqi: f64,
    pub co2: f64,
    pub co: f64,
    pub o3: f64,
    pub voc: f64,
    pub pm25: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl Default for ReadingState {
    fn default() -> Self {
        ReadingState {
            aqi: 78.0,
            co2: 650.0,
            co: 3.2,
            o3: 45.0,
            voc: 180.0,
            pm25: 35.0,
            temperature: 24.0,
            humidity: 65.0,
        }
    }
}

impl ReadingState {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Aqi => self.aqi,
            Field::Co2 => self.co2,
            Field::Co => self.co,
            Field::O3 => self.o3,
            Field::Voc => self.voc,
            Field::Pm25 => self.pm25,
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
        }
    }

    fn slot(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::Aqi => &mut self.aqi,
            Field::Co2 => &mut self.co2,
            Field::Co => &mut self.co,
            Field::O3 => &mut self.o3,
            Field::Voc => &mut self.voc,
            Field::Pm25 => &mut self.pm25,
            Field::Temperature => &mut self.temperature,
            Field::Humidity => &mut self.humidity,
        }
    }

    /// Returns a copy with `field` set to `value`, clamped into the field's range.
    pub fn with(mut self, field: Field, value: f64) -> Self {
        *self.slot(field) = field.clamp(value);
        self
    }

    pub fn is_within_ranges(&self) -> bool {
        Field::ALL
            .iter()
            .all(|&field| field.range().contains(&self.get(field)))
    }
}
