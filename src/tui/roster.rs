//! Character roster sidebar — create, select, and delete characters.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::events::AreaFocus;
use super::layout::RosterVisibility;
use super::services::Services;
use super::theme;
use super::widgets::input_buffer::InputBuffer;

/// What a consumed roster key wants the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterResult {
    Consumed,
    Select(String),
    Create(String),
    Delete(String),
    FocusMain,
}

enum RosterMode {
    Browse,
    /// Inline name input for a new character.
    Creating(InputBuffer),
    /// Pending delete confirmation for the named character.
    ConfirmDelete(String),
}

/// Sidebar state: the character list plus its interaction mode.
pub struct RosterState {
    names: Vec<String>,
    selected: usize,
    mode: RosterMode,
    pub user_collapsed: bool,
}

impl RosterState {
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            selected: 0,
            mode: RosterMode::Browse,
            user_collapsed: false,
        }
    }

    /// Re-read the character list from disk, keeping the selection when
    /// possible.
    pub fn refresh(&mut self, services: &Services) {
        let keep = self.selected_name().map(|s| s.to_string());
        match services.store.list() {
            Ok(names) => {
                self.names = names;
            }
            Err(e) => {
                log::error!("Failed to list characters: {e}");
            }
        }
        self.selected = keep
            .and_then(|name| self.names.iter().position(|n| *n == name))
            .unwrap_or(0);
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(|s| s.as_str())
    }

    /// Move the highlight onto `name` if present.
    pub fn highlight(&mut self, name: &str) {
        if let Some(idx) = self.names.iter().position(|n| n == name) {
            self.selected = idx;
        }
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<RosterResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match &mut self.mode {
            RosterMode::Creating(input) => {
                let result = match (*modifiers, *code) {
                    (KeyModifiers::NONE, KeyCode::Esc) => {
                        self.mode = RosterMode::Browse;
                        RosterResult::Consumed
                    }
                    (KeyModifiers::NONE, KeyCode::Enter) => {
                        let name = input.take().trim().to_string();
                        self.mode = RosterMode::Browse;
                        if name.is_empty() {
                            RosterResult::Consumed
                        } else {
                            RosterResult::Create(name)
                        }
                    }
                    (KeyModifiers::NONE, KeyCode::Backspace) => {
                        input.backspace();
                        RosterResult::Consumed
                    }
                    (_, KeyCode::Char(c)) => {
                        input.insert_char(c);
                        RosterResult::Consumed
                    }
                    _ => RosterResult::Consumed,
                };
                Some(result)
            }
            RosterMode::ConfirmDelete(name) => {
                let name = name.clone();
                let result = match code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        self.mode = RosterMode::Browse;
                        RosterResult::Delete(name)
                    }
                    _ => {
                        self.mode = RosterMode::Browse;
                        RosterResult::Consumed
                    }
                };
                Some(result)
            }
            RosterMode::Browse => self.handle_browse_input(*code, *modifiers),
        }
    }

    fn handle_browse_input(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<RosterResult> {
        if modifiers != KeyModifiers::NONE && modifiers != KeyModifiers::SHIFT {
            return None;
        }

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.names.is_empty() {
                    self.selected = (self.selected + 1) % self.names.len();
                }
                Some(RosterResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.names.is_empty() {
                    self.selected =
                        (self.selected + self.names.len() - 1) % self.names.len();
                }
                Some(RosterResult::Consumed)
            }
            KeyCode::Enter | KeyCode::Char('l') => self
                .selected_name()
                .map(|name| RosterResult::Select(name.to_string())),
            KeyCode::Char('n') => {
                self.mode = RosterMode::Creating(InputBuffer::new());
                Some(RosterResult::Consumed)
            }
            KeyCode::Char('d') => {
                if let Some(name) = self.selected_name() {
                    self.mode = RosterMode::ConfirmDelete(name.to_string());
                }
                Some(RosterResult::Consumed)
            }
            KeyCode::Esc | KeyCode::Char('h') => Some(RosterResult::FocusMain),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: RosterVisibility,
        current: Option<&str>,
        area_focus: AreaFocus,
    ) {
        let focused = area_focus == AreaFocus::Roster;
        let border_style = if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let collapsed = visibility == RosterVisibility::Collapsed;
        let title = if collapsed { "" } else { " Characters " };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();

        if self.names.is_empty() {
            if !collapsed {
                lines.push(Line::styled("(none yet)", theme::dim()));
                lines.push(Line::raw(""));
                lines.push(Line::styled("n: new", theme::key_hint()));
            }
        } else {
            for (idx, name) in self.names.iter().enumerate() {
                let is_selected = idx == self.selected;
                let is_current = Some(name.as_str()) == current;

                let marker = if is_current { "●" } else { " " };
                let label = if collapsed {
                    name.chars().next().map(|c| c.to_string()).unwrap_or_default()
                } else {
                    name.clone()
                };

                let style = if is_selected && focused {
                    theme::highlight()
                } else if is_current {
                    Style::default().fg(theme::PRIMARY_LIGHT)
                } else {
                    Style::default().fg(theme::TEXT)
                };

                lines.push(Line::from(vec![
                    Span::styled(marker.to_string(), Style::default().fg(theme::SUCCESS)),
                    Span::raw(" "),
                    Span::styled(label, style),
                ]));
            }
        }

        match &self.mode {
            RosterMode::Creating(input) => {
                lines.push(Line::raw(""));
                lines.push(Line::styled("New character:", theme::heading()));
                lines.push(Line::from(vec![
                    Span::styled("> ", Style::default().fg(theme::ACCENT)),
                    Span::raw(input.text().to_string()),
                    Span::styled("▍", Style::default().fg(theme::TEXT_MUTED)),
                ]));
            }
            RosterMode::ConfirmDelete(name) => {
                lines.push(Line::raw(""));
                lines.push(Line::styled(
                    format!("Delete {name}?"),
                    Style::default().fg(theme::ERROR),
                ));
                lines.push(Line::styled("y: yes   any: no", theme::key_hint()));
            }
            RosterMode::Browse => {
                if !collapsed {
                    lines.push(Line::raw(""));
                    lines.push(Line::styled("n:new d:del Enter:open", theme::key_hint()));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn roster_with(names: &[&str]) -> RosterState {
        let mut roster = RosterState::new();
        roster.names = names.iter().map(|s| s.to_string()).collect();
        roster
    }

    #[test]
    fn test_navigation_wraps() {
        let mut roster = roster_with(&["Anna", "Brin", "Mara"]);
        roster.handle_input(&key(KeyCode::Char('k')));
        assert_eq!(roster.selected_name(), Some("Mara"));
        roster.handle_input(&key(KeyCode::Char('j')));
        assert_eq!(roster.selected_name(), Some("Anna"));
    }

    #[test]
    fn test_enter_selects() {
        let mut roster = roster_with(&["Anna", "Brin"]);
        roster.handle_input(&key(KeyCode::Char('j')));
        assert_eq!(
            roster.handle_input(&key(KeyCode::Enter)),
            Some(RosterResult::Select("Brin".to_string()))
        );
    }

    #[test]
    fn test_create_flow() {
        let mut roster = roster_with(&[]);
        roster.handle_input(&key(KeyCode::Char('n')));
        for c in "Zoe".chars() {
            roster.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(
            roster.handle_input(&key(KeyCode::Enter)),
            Some(RosterResult::Create("Zoe".to_string()))
        );
    }

    #[test]
    fn test_create_empty_name_is_noop() {
        let mut roster = roster_with(&[]);
        roster.handle_input(&key(KeyCode::Char('n')));
        assert_eq!(
            roster.handle_input(&key(KeyCode::Enter)),
            Some(RosterResult::Consumed)
        );
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut roster = roster_with(&["Anna"]);
        roster.handle_input(&key(KeyCode::Char('d')));
        // Any key but y cancels
        assert_eq!(
            roster.handle_input(&key(KeyCode::Char('x'))),
            Some(RosterResult::Consumed)
        );

        roster.handle_input(&key(KeyCode::Char('d')));
        assert_eq!(
            roster.handle_input(&key(KeyCode::Char('y'))),
            Some(RosterResult::Delete("Anna".to_string()))
        );
    }

    #[test]
    fn test_escape_returns_focus() {
        let mut roster = roster_with(&["Anna"]);
        assert_eq!(
            roster.handle_input(&key(KeyCode::Esc)),
            Some(RosterResult::FocusMain)
        );
    }

    #[test]
    fn test_highlight_moves_selection() {
        let mut roster = roster_with(&["Anna", "Brin"]);
        roster.highlight("Brin");
        assert_eq!(roster.selected_name(), Some("Brin"));
    }
}
