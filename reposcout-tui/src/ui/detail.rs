//! Repository detail screen

use libreposcout::format::{format_count, format_date};
use libreposcout::Repository;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{popular_badge, styled};
use crate::app::AppState;

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState, repository: &Repository) {
    let label = Style::default().add_modifier(Modifier::BOLD);
    let description = repository
        .description
        .as_deref()
        .unwrap_or("No description available");

    let mut forks = vec![
        Span::styled("Forks: ", label),
        Span::raw(format_count(repository.forks)),
    ];
    if repository.is_popular() {
        forks.push(Span::raw("  "));
        forks.push(popular_badge(state));
    }

    let lines = vec![
        Line::from(Span::styled(
            description,
            styled(state, Style::default().fg(Color::Gray)),
        )),
        Line::from(""),
        Line::from(forks),
        Line::from(vec![
            Span::styled("Stars: ", label),
            Span::raw(format_count(repository.stargazers_count)),
        ]),
        Line::from(vec![
            Span::styled("Last updated: ", label),
            Span::raw(format_date(&repository.updated_at)),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", repository.name))
        .borders(Borders::ALL)
        .border_style(styled(state, Style::default().fg(Color::Cyan)));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
