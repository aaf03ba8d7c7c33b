//! UI rendering
//!
//! Rendering functions that transform state into terminal frames. Apart
//! from the search field's cursor they have no side effects.

mod detail;
mod list;
pub mod search_field;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, Focus, Screen};
use search_field::SearchField;

/// Render the application UI
///
/// Main rendering entry point.
pub fn render(frame: &mut Frame, state: &AppState, search_field: &mut SearchField) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    match &state.current_screen {
        Screen::List => list::render(frame, chunks[0], state, search_field),
        Screen::Detail(repository) => detail::render(frame, chunks[0], state, repository),
    }

    render_status_bar(frame, chunks[1], state);

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }
}

/// Badge shown next to repositories with many forks
pub(crate) fn popular_badge(state: &AppState) -> Span<'static> {
    let text = if state.config.unicode_enabled {
        "★ Popular"
    } else {
        "[Popular]"
    };
    Span::styled(
        text,
        styled(state, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
}

/// Drop colors when they are disabled, keep modifiers
pub(crate) fn styled(state: &AppState, style: Style) -> Style {
    if state.config.colors_enabled {
        style
    } else {
        Style {
            fg: None,
            bg: None,
            ..style
        }
    }
}

/// Render the one-line status bar: toast, loading indicator or key hints
fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if let Some(toast) = &state.toast {
        Line::from(vec![
            Span::styled(
                " ! ",
                styled(state, Style::default().fg(Color::Black).bg(Color::Yellow)),
            ),
            Span::raw(" "),
            Span::styled(
                toast.message.as_str(),
                styled(state, Style::default().fg(Color::Yellow)),
            ),
        ])
    } else if state.search.is_loading {
        Line::from(Span::styled(
            " Loading...",
            styled(state, Style::default().fg(Color::Cyan)),
        ))
    } else {
        let hints = match (&state.current_screen, state.focus) {
            (Screen::Detail(_), _) => " Esc/Backspace: Back | q: Quit | F1: Help",
            (Screen::List, Focus::Search) => " Enter: Search | Tab: Results | Ctrl+C: Quit | F1: Help",
            (Screen::List, Focus::List) => {
                " Up/Down: Select | Enter: Details | Tab: Search | q: Quit | F1: Help"
            }
        };
        Line::from(Span::styled(hints, styled(state, Style::default().fg(Color::Gray))))
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  Ctrl+C   - Quit"),
        Line::from("  F1       - Toggle help"),
        Line::from("Search field:"),
        Line::from("  Enter    - Search"),
        Line::from("  Tab      - Focus results"),
        Line::from("  Esc      - Dismiss notice"),
        Line::from("Results:"),
        Line::from("  Up/Down  - Select (or k/j)"),
        Line::from("  Enter    - Show details"),
        Line::from("  Tab, /   - Focus search field"),
        Line::from("  q        - Quit"),
        Line::from("Details:"),
        Line::from("  Esc      - Back (or Backspace)"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Cyan))),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
