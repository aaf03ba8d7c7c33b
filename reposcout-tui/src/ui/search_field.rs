//! Search field widget with tui-textarea integration
//!
//! Single-line editor for the GitHub user id. The text is mirrored into
//! `AppState` through `Action::SearchInputChanged`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::TextArea;

use crate::app::AppState;

const PLACEHOLDER: &str = "GitHub user id, e.g. octocat (Enter to search)";

/// Stateful search field
pub struct SearchField<'a> {
    textarea: TextArea<'a>,
}

impl Default for SearchField<'_> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<'a> SearchField<'a> {
    /// Create a field pre-filled with `text`
    pub fn new(text: &str) -> Self {
        let mut textarea = TextArea::from([text.to_string()]);
        textarea.move_cursor(tui_textarea::CursorMove::End);
        textarea.set_placeholder_text(PLACEHOLDER);
        textarea.set_cursor_line_style(Style::default());
        Self { textarea }
    }

    /// Current content
    pub fn text(&self) -> String {
        self.textarea.lines().concat()
    }

    /// Feed a key to the editor
    ///
    /// Returns the new content when the key changed it. Keys that would
    /// start a new line are dropped.
    pub fn input(&mut self, key: KeyEvent) -> Option<String> {
        let newline = matches!(key.code, KeyCode::Enter)
            || (key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')));
        if newline {
            return None;
        }

        self.textarea.input(key).then(|| self.text())
    }

    /// Restyle for the current focus and draw
    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.is_editing();
        let colors = state.config.colors_enabled;

        let border_style = if focused && colors {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        self.textarea.set_block(
            Block::default()
                .title(" Search GitHub user ")
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        let cursor_style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor_style);

        frame.render_widget(&self.textarea, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_updates_text() {
        let mut field = SearchField::default();
        assert_eq!(field.input(key(KeyCode::Char('o'))), Some("o".to_string()));
        assert_eq!(field.input(key(KeyCode::Char('k'))), Some("ok".to_string()));
        assert_eq!(field.input(key(KeyCode::Backspace)), Some("o".to_string()));
    }

    #[test]
    fn test_newlines_are_dropped() {
        let mut field = SearchField::new("octocat");
        assert_eq!(field.input(key(KeyCode::Enter)), None);
        assert_eq!(
            field.input(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(field.text(), "octocat");
    }

    #[test]
    fn test_prefilled_cursor_at_end() {
        let mut field = SearchField::new("octo");
        assert_eq!(field.input(key(KeyCode::Char('c'))), Some("octoc".to_string()));
    }
}
