//! One device section: status title, three gauges, last-seen caption, trend.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::ui::{chart::draw_chart, theme, util::gauge_color};
use crate::view::{DeviceView, GaugeView, Status};

/// Rows one section occupies: borders (2) + gauges (3) + caption (1) + chart (10).
pub const SECTION_HEIGHT: u16 = 16;

pub fn draw_device(f: &mut ratatui::Frame<'_>, area: Rect, d: &DeviceView) {
    let title_color = match d.status {
        Status::Online => theme::BATTERY_LINE,
        Status::Offline => theme::ERROR,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            d.title(),
            Style::default().fg(title_color).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // gauges
            Constraint::Length(1), // last seen
            Constraint::Min(3),    // chart
        ])
        .split(inner);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);
    for (g, area) in d.gauges.iter().zip(cols.iter()) {
        draw_gauge(f, *area, g);
    }

    let seen = Paragraph::new(Line::from(Span::styled(
        format!("🕒 Last Seen: {}", d.last_seen),
        Style::default().fg(theme::CAPTION),
    )));
    f.render_widget(seen, rows[1]);

    draw_chart(f, rows[2], &d.chart);
}

fn draw_gauge(f: &mut ratatui::Frame<'_>, area: Rect, g: &GaugeView) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .title(Span::styled(g.metric.title(), Style::default().fg(theme::LABEL))),
        )
        .gauge_style(Style::default().fg(gauge_color(g.metric, g.value)))
        .ratio(g.fill)
        .label(g.label.clone());
    f.render_widget(gauge, area);
}
