//! RAM + battery trend chart, or the caption that replaces it.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
};

use crate::history::TrendSeries;
use crate::ui::{theme, util::truncate_middle};
use crate::view::ChartView;

pub const COLLECTING_TEXT: &str = "Waiting for more data to draw the chart...";

pub fn draw_chart(f: &mut ratatui::Frame<'_>, area: Rect, chart: &ChartView) {
    let caption = |text: &str, color: Color| {
        Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color),
        )))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP).title("📈 Live Trend Chart"))
    };
    match chart {
        ChartView::Trend(series) => draw_trend(f, area, series),
        ChartView::Collecting => f.render_widget(caption(COLLECTING_TEXT, theme::CAPTION), area),
        ChartView::Warning(msg) => {
            f.render_widget(caption(&format!("⚠️ {msg}"), theme::WARNING), area)
        }
        ChartView::Failed(msg) => f.render_widget(caption(&format!("❌ {msg}"), theme::ERROR), area),
    }
}

fn draw_trend(f: &mut ratatui::Frame<'_>, area: Rect, s: &TrendSeries) {
    let title = Line::from(vec![
        Span::raw(format!("📈 Live Trend Chart ({} pts) ", s.len())),
        Span::styled("■ RAM ", Style::default().fg(theme::RAM_LINE)),
        Span::styled("■ Battery", Style::default().fg(theme::BATTERY_LINE)),
    ]);

    let ram = Dataset::default()
        .name("RAM")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::RAM_LINE))
        .data(&s.ram);
    let battery = Dataset::default()
        .name("Battery")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::BATTERY_LINE))
        .data(&s.battery);

    let x_max = s.len().saturating_sub(1).max(1) as f64;
    // first and last time keys; the axis is positional
    let x_labels = match (s.labels.first(), s.labels.last()) {
        (Some(first), Some(last)) => vec![
            Span::raw(truncate_middle(first, 12)),
            Span::raw(truncate_middle(last, 12)),
        ],
        _ => Vec::new(),
    };

    let chart = Chart::new(vec![ram, battery])
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(title)
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(theme::AXIS)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")])
                .style(Style::default().fg(theme::AXIS)),
        );
    f.render_widget(chart, area);
}
