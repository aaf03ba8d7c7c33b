//! Repository list screen: search field, profile and repositories

use libreposcout::format::format_count;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::search_field::SearchField;
use super::{popular_badge, styled};
use crate::app::{AppState, Focus};

pub(super) fn render(frame: &mut Frame, area: Rect, state: &AppState, search_field: &mut SearchField) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search field
            Constraint::Length(4), // Profile
            Constraint::Min(3),    // Repositories
        ])
        .split(area);

    search_field.render(frame, chunks[0], state);
    render_profile(frame, chunks[1], state);
    render_repositories(frame, chunks[2], state);
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title(" Profile ").borders(Borders::ALL);
    let dim = styled(state, Style::default().fg(Color::DarkGray));

    let lines = match (&state.search.user, state.search.show_profile) {
        (Some(user), true) => {
            let avatar = match &user.avatar_url {
                Some(url) => Span::styled(url.as_str(), dim),
                None => Span::styled("No avatar", dim),
            };
            let all = [
                Line::from(Span::styled(
                    user.display_name(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(avatar),
            ];
            let shown = (state.search.profile_reveal as usize + 1).min(all.len());
            all.into_iter().take(shown).collect()
        }
        _ if state.search.is_loading => vec![Line::from(Span::styled("Loading profile...", dim))],
        _ => vec![Line::from(Span::styled(
            "Search for a GitHub user to see their profile",
            dim,
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_repositories(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::List && !state.help_visible;
    let border_style = if focused {
        styled(state, Style::default().fg(Color::Cyan))
    } else {
        Style::default()
    };

    let title = if state.search.show_list {
        format!(" Repositories ({}) ", state.search.repositories.len())
    } else {
        " Repositories ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let dim = styled(state, Style::default().fg(Color::DarkGray));

    if !state.search.show_list {
        let message = if state.search.is_loading {
            "Loading repositories..."
        } else {
            ""
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, dim)).block(block),
            area,
        );
        return;
    }

    if state.search.repositories.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No public repositories", dim))
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .search
        .repositories
        .iter()
        .take(state.visible_rows())
        .map(|repo| {
            let mut title = vec![Span::styled(
                repo.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if repo.is_popular() {
                title.push(Span::raw("  "));
                title.push(popular_badge(state));
                title.push(Span::styled(format!(" {} forks", format_count(repo.forks)), dim));
            }

            let description = repo.description.as_deref().unwrap_or("No description");
            ListItem::new(vec![
                Line::from(title),
                Line::from(Span::styled(format!("  {description}"), dim)),
            ])
        })
        .collect();

    let highlight_symbol = if state.config.unicode_enabled { "▶ " } else { "> " };
    let list = List::new(items)
        .block(block)
        .highlight_symbol(highlight_symbol)
        .highlight_style(if focused {
            styled(state, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        });

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
