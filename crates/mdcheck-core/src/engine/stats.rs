use std::fmt;

/// Descriptive statistics over a set of per-particle metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Summary {
    /// Returns `None` for an empty input. Values are expected to be finite.
    ///
    /// The median of an even-sized set is the mean of the two middle values.
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (values[mid - 1] + values[mid]) / 2.0
        } else {
            values[mid]
        };

        Some(Self {
            count,
            mean,
            min: values[0],
            max: values[count - 1],
            median,
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(6);
        write!(
            f,
            "mean {:.p$}  min {:.p$}  max {:.p$}  median {:.p$}",
            self.mean,
            self.min,
            self.max,
            self.median,
            p = precision
        )
    }
}
