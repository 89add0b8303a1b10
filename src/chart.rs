use std::collections::VecDeque;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A point carried a different number of values than the chart has series.
    #[error("Expected {expected} values per point, got {actual}")]
    SeriesMismatch { expected: usize, actual: usize },
}

/// Fixed-length window of labelled points shared by one or more series.
///
/// Every series advances in lock-step with the label axis: one point is
/// evicted from the front and one appended at the back, so the length set
/// by [`RollingWindowChart::seed`] never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindowChart {
    title: String,
    names: Vec<String>,
    labels: VecDeque<String>,
    series: Vec<VecDeque<f64>>,
}

impl RollingWindowChart {
    pub fn new<S: Into<String>>(
        title: impl Into<String>,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let series = vec![VecDeque::new(); names.len()];
        RollingWindowChart {
            title: title.into(),
            names,
            labels: VecDeque::new(),
            series,
        }
    }

    /// Replaces the window with `points`; capacity becomes `points.len()`.
    ///
    /// Each point must carry exactly one value per series, otherwise the
    /// chart is left untouched.
    pub fn seed<L, V>(
        &mut self,
        points: impl IntoIterator<Item = (L, V)>,
    ) -> Result<(), ChartError>
    where
        L: Into<String>,
        V: AsRef<[f64]>,
    {
        let points: Vec<(L, V)> = points.into_iter().collect();
        for (_, values) in &points {
            self.check_width(values.as_ref())?;
        }

        self.labels.clear();
        self.series.iter_mut().for_each(VecDeque::clear);
        for (label, values) in points {
            self.labels.push_back(label.into());
            for (series, &value) in self.series.iter_mut().zip(values.as_ref()) {
                series.push_back(value);
            }
        }

        Ok(())
    }

    /// Drops the oldest point of every series and appends one new point.
    ///
    /// A point of the wrong width is rejected before anything moves.
    pub fn advance(
        &mut self,
        label: impl Into<String>,
        values: &[f64],
    ) -> Result<(), ChartError> {
        self.check_width(values)?;
        if self.labels.is_empty() {
            return Ok(());
        }

        self.labels.pop_front();
        self.labels.push_back(label.into());
        for (series, &value) in self.series.iter_mut().zip(values) {
            series.pop_front();
            series.push_back(value);
        }

        Ok(())
    }

    fn check_width(&self, values: &[f64]) -> Result<(), ChartError> {
        if values.len() != self.series.len() {
            return Err(ChartError::SeriesMismatch {
                expected: self.series.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// `(name, points)` pairs, oldest point first.
    pub fn series(&self) -> impl Iterator<Item = (&str, &VecDeque<f64>)> {
        self.names.iter().map(String::as_str).zip(self.series.iter())
    }

    pub fn latest(&self) -> Option<(&str, Vec<f64>)> {
        let label = self.labels.back()?;
        let values = self
            .series
            .iter()
            .filter_map(|series| series.back().copied())
            .collect();
        Some((label.as_str(), values))
    }
}
