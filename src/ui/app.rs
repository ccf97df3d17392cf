//! Terminal application state and event handling.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use ratatui::{prelude::*, widgets::TableState};
use tokio::time;
use tracing::info;

use crate::feed::{FeedSimulator, FeedState};
use crate::ui::screens;
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::helper_functions::format_address;

const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Which address of the selected row to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyTarget {
    Contract,
    Creator,
}

/// Key presses resolved against the current feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    ToggleLive,
    SelectPrevious,
    SelectNext,
    SelectFirst,
    Copy(CopyTarget),
}

impl Action {
    fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char(' ') | KeyCode::Char('p') => Some(Self::ToggleLive),
            KeyCode::Up | KeyCode::Char('k') => Some(Self::SelectPrevious),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::SelectNext),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::SelectFirst),
            KeyCode::Char('c') => Some(Self::Copy(CopyTarget::Contract)),
            KeyCode::Char('y') => Some(Self::Copy(CopyTarget::Creator)),
            _ => None,
        }
    }
}

fn clamp_selection(current: usize, len: usize) -> usize {
    current.min(len.saturating_sub(1))
}

fn next_selection(action: Action, current: usize, len: usize) -> usize {
    match action {
        Action::SelectPrevious => current.saturating_sub(1),
        Action::SelectNext => clamp_selection(current + 1, len),
        Action::SelectFirst => 0,
        _ => clamp_selection(current, len),
    }
}

pub struct TuiApp {
    simulator: FeedSimulator,
    tick_rate: Duration,
    table_state: TableState,
    notice: Option<(String, Instant)>,
    should_quit: bool,
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiApp {
    pub fn new(simulator: FeedSimulator, tick_rate: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Ok(Self {
            simulator,
            tick_rate,
            table_state,
            notice: None,
            should_quit: false,
            terminal,
        })
    }

    /// Redraws on every feed change, key press, or tick until the user quits.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut updates = self.simulator.subscribe();
        let mut ticker = time::interval(self.tick_rate);

        while !self.should_quit {
            let state = updates.borrow_and_update().clone();
            self.expire_notice();
            let selected = self.table_state.selected().unwrap_or(0);
            self.table_state
                .select(Some(clamp_selection(selected, state.tokens().len())));

            let notice = self.notice.as_ref().map(|(message, _)| message.clone());
            let table_state = &mut self.table_state;
            self.terminal
                .draw(|frame| screens::draw(frame, &state, notice.as_deref(), table_state))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if let Some(action) = Action::from_key(key.code) {
                            self.apply(action, &state);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e),
                    None => break,
                },
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {}
            }
        }

        self.simulator.shutdown();
        Ok(())
    }

    fn apply(&mut self, action: Action, state: &FeedState) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleLive => {
                let live = self.simulator.toggle_live();
                info!(?live, "feed toggled");
            }
            Action::SelectPrevious | Action::SelectNext | Action::SelectFirst => {
                let current = self.table_state.selected().unwrap_or(0);
                self.table_state
                    .select(Some(next_selection(action, current, state.tokens().len())));
            }
            Action::Copy(target) => {
                let selected = self.table_state.selected().unwrap_or(0);
                if let Some(token) = state.tokens().get(selected) {
                    let text = match target {
                        CopyTarget::Contract => &token.contract_address,
                        CopyTarget::Creator => &token.creator,
                    };
                    copy_to_clipboard(self.terminal.backend_mut(), text);
                    self.notice = Some((
                        format!("📋 Copied {}", format_address(text)),
                        Instant::now(),
                    ));
                }
            }
        }
    }

    fn expire_notice(&mut self) {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|(_, shown_at)| shown_at.elapsed() >= NOTICE_TTL);
        if expired {
            self.notice = None;
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
