//! Trait editor view — manual delta entry next to the current trait text.
//!
//! Left pane takes `trait: delta` lines to add onto the profile, right
//! pane is the current map as editable `trait: weight` text. `a` (or
//! Ctrl+S) applies both: deltas are merged onto the parsed current text
//! and the result becomes a new version.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::core::character::CharacterRecord;
use crate::core::codec::traits_to_text;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::{display_lines, InputBuffer};

/// What a consumed editor key wants the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorResult {
    Consumed,
    /// Apply the edited texts: parse, merge, append a version.
    Apply { updates: String, current: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Updates,
    Current,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Insert,
}

pub struct EditorState {
    updates: InputBuffer,
    current: InputBuffer,
    pane: Pane,
    mode: InputMode,
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            updates: InputBuffer::new(),
            current: InputBuffer::new(),
            pane: Pane::Updates,
            mode: InputMode::Normal,
        }
    }

    /// Sync the editor with a freshly loaded or just-saved record.
    pub fn load(&mut self, record: &CharacterRecord) {
        self.current.set_text(traits_to_text(&record.current_traits()));
        self.updates.clear();
        self.mode = InputMode::Normal;
    }

    pub fn reset(&mut self) {
        self.updates.clear();
        self.current.clear();
        self.pane = Pane::Updates;
        self.mode = InputMode::Normal;
    }

    pub fn is_insert(&self) -> bool {
        self.mode == InputMode::Insert
    }

    fn active_buffer(&mut self) -> &mut InputBuffer {
        match self.pane {
            Pane::Updates => &mut self.updates,
            Pane::Current => &mut self.current,
        }
    }

    fn apply(&self) -> EditorResult {
        EditorResult::Apply {
            updates: self.updates.text().to_string(),
            current: self.current.text().to_string(),
        }
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<EditorResult> {
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

    fn handle_insert(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<EditorResult> {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return None,
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => return None,
            _ => {}
        }

        let result = match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.mode = InputMode::Normal;
                EditorResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => self.apply(),
            (KeyModifiers::NONE, KeyCode::Enter) => {
                self.active_buffer().insert_newline();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.active_buffer().backspace();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Delete) => {
                self.active_buffer().delete();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Left) => {
                self.active_buffer().move_left();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                self.active_buffer().move_right();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.active_buffer().move_up();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.active_buffer().move_down();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Home) => {
                self.active_buffer().move_home();
                EditorResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::End) => {
                self.active_buffer().move_end();
                EditorResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.active_buffer().clear();
                EditorResult::Consumed
            }
            (_, KeyCode::Char(c)) => {
                self.active_buffer().insert_char(c);
                EditorResult::Consumed
            }
            _ => EditorResult::Consumed,
        };
        Some(result)
    }

    fn handle_normal(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<EditorResult> {
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('s') {
            return Some(self.apply());
        }
        if modifiers != KeyModifiers::NONE && modifiers != KeyModifiers::SHIFT {
            return None;
        }

        match code {
            KeyCode::Char('i') | KeyCode::Enter => {
                self.mode = InputMode::Insert;
                Some(EditorResult::Consumed)
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.pane = Pane::Updates;
                Some(EditorResult::Consumed)
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.pane = Pane::Current;
                Some(EditorResult::Consumed)
            }
            KeyCode::Char('a') => Some(self.apply()),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, record: Option<&CharacterRecord>) {
        if record.is_none() {
            let block = theme::block_default("Traits");
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Line::styled("No character selected", theme::muted())),
                inner,
            );
            return;
        }

        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
        let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        self.render_pane(
            frame,
            cols[0],
            Pane::Updates,
            "Change traits (trait: delta)",
            &self.updates,
            "Subtract to 0 to remove a trait...",
        );
        self.render_pane(
            frame,
            cols[1],
            Pane::Current,
            "Current traits (trait: weight)",
            &self.current,
            "",
        );

        let hints = Line::styled(
            " h/l: switch pane   i: edit   a / Ctrl+S: apply   (bad lines are skipped)",
            theme::key_hint(),
        );
        frame.render_widget(Paragraph::new(hints), chunks[1]);
    }

    fn render_pane(
        &self,
        frame: &mut Frame,
        area: Rect,
        pane: Pane,
        title: &str,
        buffer: &InputBuffer,
        placeholder: &str,
    ) {
        let active = self.pane == pane;
        let border_style = if active && self.mode == InputMode::Insert {
            Style::default().fg(theme::ACCENT_SOFT)
        } else if active {
            theme::border_focused()
        } else {
            theme::border_default()
        };

        let block = Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(border_style);

        let lines = if buffer.text().is_empty() && !placeholder.is_empty() {
            vec![Line::styled(placeholder.to_string(), theme::muted())]
        } else {
            let cursor_style = (active && self.mode == InputMode::Insert)
                .then(|| Style::default().bg(theme::TEXT).fg(theme::BG_BASE));
            display_lines(buffer, cursor_style)
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
