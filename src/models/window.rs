use chrono::DateTime;
use chrono_tz::Tz;

use super::signal::Signal;

/// One signal's trailing samples: Lisbon-local timestamps and readings,
/// index-aligned and always the same length.
///
/// Each signal keeps the timestamps of its own STH response, so the window
/// stays correct even if the device samples its attributes at different
/// instants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSeries {
    pub timestamps: Vec<DateTime<Tz>>,
    pub values: Vec<f64>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep only the last `n` entries, preserving order
    pub fn truncate_to_last(&mut self, n: usize) {
        let excess = self.len().saturating_sub(n);
        if excess > 0 {
            self.timestamps.drain(..excess);
            self.values.drain(..excess);
        }
    }
}

/// The latest committed trailing window, one series per signal.
///
/// Replaced wholesale on every successful tick; never mutated in place, so a
/// reader holding a clone sees a consistent snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Window {
    pub temperature: SignalSeries,
    pub humidity: SignalSeries,
    pub luminosity: SignalSeries,
}

impl Window {
    pub fn series(&self, signal: Signal) -> &SignalSeries {
        match signal {
            Signal::Temperature => &self.temperature,
            Signal::Humidity => &self.humidity,
            Signal::Luminosity => &self.luminosity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize_timestamp;

    fn series_of(n: usize) -> SignalSeries {
        let timestamps = (0..n)
            .map(|i| {
                normalize_timestamp(&format!("2024-01-15T12:00:{:02}Z", i % 60))
                    .expect("valid timestamp")
            })
            .collect();
        let values = (0..n).map(|i| i as f64).collect();
        SignalSeries { timestamps, values }
    }

    #[test]
    fn test_truncate_keeps_last_n_in_order() {
        let mut series = series_of(45);
        series.truncate_to_last(30);

        assert_eq!(series.len(), 30);
        assert_eq!(series.timestamps.len(), 30);
        // First 15 dropped, order preserved
        assert_eq!(series.values.first(), Some(&15.0));
        assert_eq!(series.values.last(), Some(&44.0));
    }

    #[test]
    fn test_truncate_noop_when_under_limit() {
        let mut series = series_of(10);
        series.truncate_to_last(30);
        assert_eq!(series.len(), 10);
        assert_eq!(series.values.first(), Some(&0.0));
    }
}
