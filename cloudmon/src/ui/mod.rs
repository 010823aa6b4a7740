//! UI module root: draws a whole [`BoardView`] frame.

pub mod chart;
pub mod device;
pub mod header;
pub mod notice;
pub mod theme;
pub mod util;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::view::BoardView;
use device::{draw_device, SECTION_HEIGHT};
use header::draw_header;
use notice::{draw_unavailable, draw_waiting};
use util::sections_per_page;

/// Draws the full frame. `scroll` is the index of the first device shown.
/// The output depends only on the arguments, so identical input yields an
/// identical frame.
pub fn draw_board(
    f: &mut ratatui::Frame<'_>,
    base_url: &str,
    view: Option<&BoardView>,
    scroll: usize,
) {
    let area = f.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    draw_header(f, rows[0], base_url, view);

    let body = rows[1];
    match view {
        None => {}
        Some(BoardView::Unavailable(failure)) => draw_unavailable(f, notice_area(body), failure),
        Some(BoardView::Waiting) => draw_waiting(f, notice_area(body)),
        Some(BoardView::Devices(devices)) => {
            let per_page = sections_per_page(body.height, SECTION_HEIGHT);
            let start = scroll.min(devices.len().saturating_sub(1));
            let shown = &devices[start..devices.len().min(start + per_page)];
            let constraints: Vec<Constraint> = shown
                .iter()
                .map(|_| Constraint::Length(SECTION_HEIGHT))
                .collect();
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(body);
            for (d, area) in shown.iter().zip(sections.iter()) {
                draw_device(f, *area, d);
            }
        }
    }
}

fn notice_area(body: Rect) -> Rect {
    Rect {
        height: body.height.min(4),
        ..body
    }
}
