//! Bounded history windows for the trend chart.

use crate::types::HistoryPoint;

/// Most recent samples charted per device.
pub const HISTORY_WINDOW: usize = 30;

/// Fewer samples than this cannot draw a line.
pub const MIN_CHART_POINTS: usize = 2;

/// The last `cap` items, in their original order.
pub fn tail<T>(items: &[T], cap: usize) -> &[T] {
    &items[items.len().saturating_sub(cap)..]
}

/// Two chart series keyed by sample position: RAM and battery over time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub ram: Vec<(f64, f64)>,
    pub battery: Vec<(f64, f64)>,
    /// Display label of the x key for every sample, same order as the series.
    pub labels: Vec<String>,
}

impl TrendSeries {
    /// Builds the series from the newest [`HISTORY_WINDOW`] points.
    /// `None` when there are not enough samples to chart.
    pub fn from_history(points: &[HistoryPoint]) -> Option<Self> {
        if points.len() < MIN_CHART_POINTS {
            return None;
        }
        let window = tail(points, HISTORY_WINDOW);
        let mut series = TrendSeries {
            ram: Vec::with_capacity(window.len()),
            battery: Vec::with_capacity(window.len()),
            labels: Vec::with_capacity(window.len()),
        };
        for (i, p) in window.iter().enumerate() {
            let x = i as f64;
            series.ram.push((x, p.ram));
            series.battery.push((x, p.battery));
            series.labels.push(p.time.to_string());
        }
        Some(series)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn last_ram(&self) -> Option<f64> {
        self.ram.last().map(|&(_, v)| v)
    }

    pub fn last_battery(&self) -> Option<f64> {
        self.battery.last().map(|&(_, v)| v)
    }
}
