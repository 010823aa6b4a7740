//! Top header with the service URL and key hints.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::view::BoardView;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, base_url: &str, view: Option<&BoardView>) {
    let title = match view {
        Some(BoardView::Devices(d)) => format!(
            "☁️ cloudmon | server: {base_url} | devices: {}  (press 'q' to quit, 'r' to refresh)",
            d.len()
        ),
        Some(_) => format!("☁️ cloudmon | server: {base_url}  (press 'q' to quit, 'r' to refresh)"),
        None => format!("☁️ cloudmon | server: {base_url} | connecting... (press 'q' to quit)"),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
