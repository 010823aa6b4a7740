//! Single full-width indicator used when there are no device sections to draw.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::theme;
use crate::view::ApiFailure;

pub const WAITING_TEXT: &str = "📡 Waiting for data from devices...";

pub fn draw_waiting(f: &mut ratatui::Frame<'_>, area: Rect) {
    let p = Paragraph::new(Line::from(Span::styled(
        WAITING_TEXT,
        Style::default().fg(theme::INFO),
    )))
    .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(p, area);
}

pub fn draw_unavailable(f: &mut ratatui::Frame<'_>, area: Rect, failure: &ApiFailure) {
    let color = match failure {
        ApiFailure::Status(_) => theme::WARNING,
        _ => theme::ERROR,
    };
    let mut lines = vec![Line::from(Span::styled(
        failure.message(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = failure.detail() {
        lines.push(Line::from(Span::styled(
            detail.to_string(),
            Style::default().fg(theme::CAPTION),
        )));
    }
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(p, area);
}
