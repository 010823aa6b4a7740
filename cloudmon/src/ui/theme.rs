//! Shared UI theme constants.

use ratatui::style::Color;

// Trend series (red RAM, green battery)
pub const RAM_LINE: Color = Color::Rgb(255, 87, 51);
pub const BATTERY_LINE: Color = Color::Rgb(51, 255, 87);

pub const BORDER: Color = Color::Rgb(64, 64, 64);
pub const LABEL: Color = Color::Rgb(176, 176, 176);
pub const CAPTION: Color = Color::DarkGray;
pub const AXIS: Color = Color::Rgb(120, 120, 130);

pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;
pub const INFO: Color = Color::Cyan;
