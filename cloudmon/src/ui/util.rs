//! Small UI helpers: truncation, gauge colours, section paging.

use ratatui::style::Color;

use crate::view::Metric;

pub fn truncate_middle(s: &str, max: usize) -> String {
    let n = s.chars().count();
    if n <= max {
        return s.to_string();
    }
    if max <= 3 {
        return "...".into();
    }
    let keep = max - 3;
    let left = keep / 2;
    let right = keep - left;
    let head: String = s.chars().take(left).collect();
    let tail: String = s.chars().skip(n - right).collect();
    format!("{head}...{tail}")
}

/// Usage gauges turn red when high; the battery gauge when low.
pub fn gauge_color(metric: Metric, value: f64) -> Color {
    match metric {
        Metric::Ram | Metric::Storage => match value {
            x if x < 60.0 => Color::Green,
            x if x < 85.0 => Color::Yellow,
            _ => Color::Red,
        },
        Metric::Battery => match value {
            x if x < 20.0 => Color::Red,
            x if x < 50.0 => Color::Yellow,
            _ => Color::Green,
        },
    }
}

/// Number of whole device sections that fit in `height` rows (at least one).
pub fn sections_per_page(height: u16, section_height: u16) -> usize {
    (height / section_height.max(1)).max(1) as usize
}
