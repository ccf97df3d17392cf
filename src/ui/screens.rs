//! Rendering for the tracker screen.

use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::feed::{FeedState, LiveState};
use crate::types::{TokenInfo, TokenStatus};
use crate::utils::constants::{NETWORK, SUBTITLE};
use crate::utils::helper_functions::{format_address, format_supply, format_time_ago};

const KEY_HINTS: &str =
    " [space]Pause/Resume | [Up/Down]Select | [c]Copy contract | [y]Copy creator | [q]Quit ";

pub fn draw(
    frame: &mut Frame,
    state: &FeedState,
    notice: Option<&str>,
    table_state: &mut TableState,
) {
    let now = Utc::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(3), // Stats
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);
    draw_stats(frame, chunks[1], state, now);
    draw_table(frame, chunks[2], state, now, table_state);
    draw_footer(frame, chunks[3], notice);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &FeedState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("▲ {}", state.title()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(title, halves[0]);

    let (dot, label, action) = match state.live_state() {
        LiveState::Live => (Color::Green, "LIVE FEED", "PAUSE"),
        LiveState::Paused => (Color::Yellow, "PAUSED", "RESUME"),
    };
    let status = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("● ", Style::default().fg(dot)),
            Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!("[space] {}", action),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(status, halves[1]);
}

fn draw_stats(frame: &mut Frame, area: Rect, state: &FeedState, now: DateTime<Utc>) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let last_update = state
        .tokens()
        .latest()
        .map(|t| format_time_ago(t.deployed_at, now))
        .unwrap_or_else(|| "--".to_string());

    let stats = [
        ("TOKENS TRACKED", state.tokens().len().to_string()),
        ("LAST UPDATE", last_update),
        ("NETWORK", NETWORK.to_string()),
    ];
    for ((label, value), column) in stats.into_iter().zip(columns.iter()) {
        let stat = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(
                value,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(stat, *column);
    }
}

fn status_style(status: TokenStatus) -> Style {
    let color = match status {
        TokenStatus::New => Color::Green,
        TokenStatus::Active => Color::Cyan,
        TokenStatus::Rug => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn token_row<'a>(token: &'a TokenInfo, flashing: bool, now: DateTime<Utc>) -> Row<'a> {
    let row = Row::new(vec![
        Cell::from(token.status.label()).style(status_style(token.status)),
        Cell::from(Line::from(vec![
            Span::styled(
                format!("${} ", token.symbol),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(token.name.as_str()),
        ])),
        Cell::from(format_address(&token.contract_address)),
        Cell::from(format_address(&token.creator)),
        Cell::from(format_supply(&token.initial_supply)),
        Cell::from(format_time_ago(token.deployed_at, now))
            .style(Style::default().fg(Color::DarkGray)),
    ]);

    if flashing {
        row.style(
            Style::default()
                .bg(Color::Green)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        row
    }
}

fn draw_table(
    frame: &mut Frame,
    area: Rect,
    state: &FeedState,
    now: DateTime<Utc>,
    table_state: &mut TableState,
) {
    let header_cells = ["STATUS", "TOKEN", "CONTRACT", "CREATOR", "SUPPLY", "DEPLOYED"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1);

    let rows = state
        .tokens()
        .iter()
        .map(|token| token_row(token, state.highlighted() == Some(token.id.as_str()), now));

    let widths = [
        Constraint::Length(8),
        Constraint::Min(24),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " New Deployments ({}/{}) ",
                    state.tokens().len(),
                    state.tokens().capacity()
                ))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, table_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let footer = match notice {
        Some(message) => Paragraph::new(format!(" {} ", message))
            .style(Style::default().fg(Color::Green)),
        None => Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer.block(Block::default().borders(Borders::ALL)), area);
}
