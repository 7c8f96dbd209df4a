//! Profile view — description input, recent updates, and the trait cloud.
//!
//! `i` to edit the description, `g` (or Ctrl+G while typing) to send it
//! to the LLM for delta proposals. The cloud below always shows the
//! selected character's current version.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::character::CharacterRecord;
use crate::core::session::SessionContext;
use crate::tui::theme;
use crate::tui::widgets::cloud::cloud_lines;
use crate::tui::widgets::input_buffer::{display_lines, InputBuffer};

/// What a consumed profile key wants the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileResult {
    Consumed,
    /// Send this description for delta proposals.
    Generate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Insert,
}

pub struct ProfileState {
    input: InputBuffer,
    mode: InputMode,
    /// A proposal call is in flight.
    pub busy: bool,
}

impl ProfileState {
    pub fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            mode: InputMode::Normal,
            busy: false,
        }
    }

    /// Clear per-character state (on character switch).
    pub fn reset(&mut self) {
        self.input.clear();
        self.mode = InputMode::Normal;
        self.busy = false;
    }

    pub fn is_insert(&self) -> bool {
        self.mode == InputMode::Insert
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<ProfileResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match self.mode {
            InputMode::Insert => self.handle_insert(*code, *modifiers),
            InputMode::Normal => self.handle_normal(*code, *modifiers),
        }
    }

    fn handle_insert(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<ProfileResult> {
        // Always fall through to global
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return None,
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => return None,
            _ => {}
        }

        let result = match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.mode = InputMode::Normal;
                ProfileResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => return self.generate(),
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.input.insert_newline();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.input.backspace();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Delete) => {
                self.input.delete();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Left) => {
                self.input.move_left();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                self.input.move_right();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.input.move_up();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.input.move_down();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Home) => {
                self.input.move_home();
                ProfileResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::End) => {
                self.input.move_end();
                ProfileResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.input.clear();
                ProfileResult::Consumed
            }
            (_, KeyCode::Char(c)) => {
                self.input.insert_char(c);
                ProfileResult::Consumed
            }
            _ => ProfileResult::Consumed,
        };
        Some(result)
    }

    fn handle_normal(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<ProfileResult> {
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('g') {
            return self.generate();
        }
        if modifiers != KeyModifiers::NONE && modifiers != KeyModifiers::SHIFT {
            return None;
        }

        match code {
            KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
                self.mode = InputMode::Insert;
                Some(ProfileResult::Consumed)
            }
            KeyCode::Char('g') => self.generate(),
            _ => None,
        }
    }

    fn generate(&mut self) -> Option<ProfileResult> {
        if self.busy || self.input.is_empty() {
            return Some(ProfileResult::Consumed);
        }
        Some(ProfileResult::Generate(self.input.text().to_string()))
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        record: Option<&CharacterRecord>,
        session: &SessionContext,
    ) {
        let Some(record) = record else {
            render_no_character(frame, area);
            return;
        };

        let has_report = session.last_report.as_ref().is_some_and(|r| !r.is_empty());
        let updates_height = if has_report { 7 } else { 0 };

        let chunks = Layout::vertical([
            Constraint::Length(8),
            Constraint::Length(updates_height),
            Constraint::Min(3),
        ])
        .split(area);

        self.render_description(frame, chunks[0]);
        if has_report {
            self.render_updates(frame, chunks[1], session);
        }
        render_cloud(frame, chunks[2], record);
    }

    fn render_description(&self, frame: &mut Frame, area: Rect) {
        let insert = self.mode == InputMode::Insert;
        let (border_style, title) = if insert {
            (
                Style::default().fg(theme::ACCENT_SOFT),
                " Character Description (Esc done, Ctrl+G generate) ",
            )
        } else {
            (theme::border_default(), " Character Description (i edit, g generate) ")
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);

        if self.busy {
            block = block.title_bottom(Line::styled(
                " proposing traits... ",
                Style::default().fg(theme::PRIMARY_LIGHT),
            ));
        }

        let lines = if self.input.text().is_empty() && !insert {
            vec![Line::styled(
                "Describe the character in free text...",
                theme::muted(),
            )]
        } else {
            let cursor_style = insert
                .then(|| Style::default().bg(theme::TEXT).fg(theme::BG_BASE));
            display_lines(&self.input, cursor_style)
        };

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }

    fn render_updates(&self, frame: &mut Frame, area: Rect, session: &SessionContext) {
        let Some(report) = session.last_report.as_ref() else {
            return;
        };

        let block = theme::block_default("Recent Updates");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::horizontal([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(inner);

        let strengthened: Vec<Line> = std::iter::once(Line::styled(
            "Strengthened",
            Style::default().fg(theme::SUCCESS).add_modifier(ratatui::style::Modifier::BOLD),
        ))
        .chain(
            report
                .strengthened
                .iter()
                .map(|(name, delta)| Line::raw(format!("{name} +{delta}"))),
        )
        .collect();

        let weakened: Vec<Line> = std::iter::once(Line::styled(
            "Weakened",
            Style::default().fg(theme::WARNING).add_modifier(ratatui::style::Modifier::BOLD),
        ))
        .chain(
            report
                .weakened
                .iter()
                .map(|(name, delta)| Line::raw(format!("{name} {delta}"))),
        )
        .collect();

        let removed: Vec<Line> = std::iter::once(Line::styled(
            "Removed",
            Style::default().fg(theme::ERROR).add_modifier(ratatui::style::Modifier::BOLD),
        ))
        .chain(report.removed.iter().map(|name| Line::raw(name.clone())))
        .collect();

        frame.render_widget(Paragraph::new(strengthened), cols[0]);
        frame.render_widget(Paragraph::new(weakened), cols[1]);
        frame.render_widget(Paragraph::new(removed), cols[2]);
    }
}

fn render_cloud(frame: &mut Frame, area: Rect, record: &CharacterRecord) {
    let current = record.current();
    let title = format!(" Trait Cloud — {} v{} ", record.character, current.version);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::border_default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = cloud_lines(&current.traits, inner.width);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_no_character(frame: &mut Frame, area: Rect) {
    let block = theme::block_default("Profile");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("No character selected", theme::heading())),
        Line::raw(""),
        Line::from(Span::styled(
            "Use the roster (Ctrl+B) to create or select one.",
            theme::muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_generate_requires_text() {
        let mut profile = ProfileState::new();
        assert_eq!(
            profile.handle_input(&key(KeyCode::Char('g'))),
            Some(ProfileResult::Consumed)
        );
    }

    #[test]
    fn test_typed_description_generates() {
        let mut profile = ProfileState::new();
        profile.handle_input(&key(KeyCode::Char('i')));
        for c in "brave".chars() {
            profile.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(
            profile.handle_input(&ctrl('g')),
            Some(ProfileResult::Generate("brave".to_string()))
        );
    }

    #[test]
    fn test_busy_blocks_generate() {
        let mut profile = ProfileState::new();
        profile.handle_input(&key(KeyCode::Char('i')));
        profile.handle_input(&key(KeyCode::Char('x')));
        profile.busy = true;
        assert_eq!(
            profile.handle_input(&ctrl('g')),
            Some(ProfileResult::Consumed)
        );
    }

    #[test]
    fn test_enter_inserts_newline_in_insert_mode() {
        let mut profile = ProfileState::new();
        profile.handle_input(&key(KeyCode::Char('i')));
        profile.handle_input(&key(KeyCode::Char('a')));
        profile.handle_input(&key(KeyCode::Enter));
        profile.handle_input(&key(KeyCode::Char('b')));
        profile.handle_input(&key(KeyCode::Esc));
        assert!(!profile.is_insert());
    }

    #[test]
    fn test_tab_falls_through() {
        let mut profile = ProfileState::new();
        profile.handle_input(&key(KeyCode::Char('i')));
        assert_eq!(profile.handle_input(&key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut profile = ProfileState::new();
        profile.handle_input(&key(KeyCode::Char('i')));
        profile.handle_input(&key(KeyCode::Char('x')));
        profile.busy = true;
        profile.reset();
        assert!(!profile.busy);
        assert!(!profile.is_insert());
    }
}
