//! App state and main loop: fetch a fresh board, draw it, wait the refresh
//! interval while handling keys, repeat.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::api::MetricsClient;
use crate::ui::{device::SECTION_HEIGHT, draw_board, util::sections_per_page};
use crate::view::{build_board, BoardView};

// Input poll granularity while waiting for the next cycle
const INPUT_SLICE: Duration = Duration::from_millis(100);

pub struct MonitorApp {
    client: MetricsClient,
    interval: Duration,

    // Last built view; kept only so resizes and scrolling can redraw without fetching
    view: Option<BoardView>,

    // Completed refreshes since start
    cycle: u64,

    pub scroll: usize,
    should_quit: bool,
    refresh_now: bool,
}

impl MonitorApp {
    pub fn new(client: MetricsClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            view: None,
            cycle: 0,
            scroll: 0,
            should_quit: false,
            refresh_now: false,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn view(&self) -> Option<&BoardView> {
        self.view.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> io::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        info!(
            url = %self.client.base_url(),
            interval = ?self.interval,
            timeout = ?self.client.timeout(),
            "monitor started"
        );

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        info!(cycles = self.cycle, "monitor stopped");
        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<()> {
        // First frame before the first fetch returns
        terminal.draw(|f| self.draw(f))?;
        while !self.should_quit {
            self.refresh().await;
            terminal.draw(|f| self.draw(f))?;
            self.wait_for_next_cycle(terminal)?;
        }
        Ok(())
    }

    /// One cycle: fetch everything and replace the current view.
    pub async fn refresh(&mut self) {
        let started = Instant::now();
        let view = build_board(&self.client).await;
        self.cycle += 1;
        debug!(
            cycle = self.cycle,
            devices = view.device_count(),
            elapsed = ?started.elapsed(),
            "cycle complete"
        );
        self.view = Some(view);
        self.clamp_scroll();
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        draw_board(f, self.client.base_url().as_str(), self.view.as_ref(), self.scroll);
    }

    // Sleeps out the interval in short input polls so keys stay responsive
    fn wait_for_next_cycle<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<()> {
        let deadline = Instant::now() + self.interval;
        while !self.should_quit && !self.refresh_now {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if !event::poll((deadline - now).min(INPUT_SLICE))? {
                continue;
            }
            let redraw = match event::read()? {
                Event::Key(k) => {
                    let height = terminal.size()?.height;
                    self.handle_key(k, sections_per_page(height, SECTION_HEIGHT))
                }
                Event::Resize(_, _) => true,
                _ => false,
            };
            if redraw {
                terminal.draw(|f| self.draw(f))?;
            }
        }
        self.refresh_now = false;
        Ok(())
    }

    /// Applies a key press. Returns true when the frame needs redrawing.
    pub fn handle_key(&mut self, k: KeyEvent, page: usize) -> bool {
        if k.kind != KeyEventKind::Press {
            return false;
        }
        let before = self.scroll;
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_now = true,
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(page),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = usize::MAX,
            _ => {}
        }
        self.clamp_scroll();
        self.scroll != before
    }

    fn clamp_scroll(&mut self) {
        let max = self
            .view
            .as_ref()
            .map(|v| v.device_count().saturating_sub(1))
            .unwrap_or(0);
        self.scroll = self.scroll.min(max);
    }
}
