//! Analysis view — chat-style Q&A over the current trait profile.
//!
//! Quick prompts (1-4) prefill the question; Enter sends it with the
//! conversation history. Answers come back as one completion event —
//! a failed call leaves the history untouched.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::llm::{ChatMessage, MessageRole};
use crate::tui::theme;
use crate::tui::widgets::input_buffer::{display_lines, InputBuffer};

/// Canned questions, mirrored from the quick-analysis buttons.
pub const QUICK_PROMPTS: [(&str, &str); 4] = [
    (
        "Archetypes",
        "What common character archetypes does this personality profile fit?",
    ),
    (
        "Strengths & Flaws",
        "Analyze key strengths and flaws based on these traits.",
    ),
    (
        "MBTI/Enneagram",
        "What MBTI and Enneagram types are most likely for this character?",
    ),
    (
        "Opposite",
        "Who would be the complete opposite of this character?",
    ),
];

/// What a consumed chat key wants the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatResult {
    Consumed,
    /// Ask this question about the profile.
    Ask(String),
    /// Delete the conversation history.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Insert,
}

pub struct ChatState {
    input: InputBuffer,
    mode: InputMode,
    scroll: usize,
    auto_scroll: bool,
    /// An analysis call is in flight.
    pub asking: bool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            input: InputBuffer::new(),
            mode: InputMode::Normal,
            scroll: 0,
            auto_scroll: true,
            asking: false,
        }
    }

    pub fn reset(&mut self) {
        self.input.clear();
        self.mode = InputMode::Normal;
        self.scroll = 0;
        self.auto_scroll = true;
        self.asking = false;
    }

    pub fn is_insert(&self) -> bool {
        self.mode == InputMode::Insert
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<ChatResult> {
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

    fn handle_insert(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<ChatResult> {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return None,
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => return None,
            _ => {}
        }

        let result = match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.mode = InputMode::Normal;
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Enter) => return self.submit(),
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.input.backspace();
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Delete) => {
                self.input.delete();
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Left) => {
                self.input.move_left();
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                self.input.move_right();
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Home) => {
                self.input.move_home();
                ChatResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::End) => {
                self.input.move_end();
                ChatResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.input.clear();
                ChatResult::Consumed
            }
            (_, KeyCode::Char(c)) => {
                self.input.insert_char(c);
                ChatResult::Consumed
            }
            _ => ChatResult::Consumed,
        };
        Some(result)
    }

    fn handle_normal(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<ChatResult> {
        if modifiers != KeyModifiers::NONE && modifiers != KeyModifiers::SHIFT {
            return None;
        }

        match code {
            KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Enter => {
                self.mode = InputMode::Insert;
                Some(ChatResult::Consumed)
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                self.input.set_text(QUICK_PROMPTS[idx].1);
                self.mode = InputMode::Insert;
                Some(ChatResult::Consumed)
            }
            KeyCode::Char('c') => Some(ChatResult::Clear),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Some(ChatResult::Consumed)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.auto_scroll = false;
                self.scroll = self.scroll.saturating_sub(1);
                Some(ChatResult::Consumed)
            }
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(10);
                Some(ChatResult::Consumed)
            }
            KeyCode::PageUp => {
                self.auto_scroll = false;
                self.scroll = self.scroll.saturating_sub(10);
                Some(ChatResult::Consumed)
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.scroll_to_bottom();
                Some(ChatResult::Consumed)
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.auto_scroll = false;
                self.scroll = 0;
                Some(ChatResult::Consumed)
            }
            _ => None,
        }
    }

    fn submit(&mut self) -> Option<ChatResult> {
        if self.asking || self.input.is_empty() {
            return Some(ChatResult::Consumed);
        }
        let question = self.input.take().trim().to_string();
        self.mode = InputMode::Normal;
        Some(ChatResult::Ask(question))
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame, area: Rect, conversation: &[ChatMessage]) {
        let chunks = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .split(area);

        self.render_conversation(frame, chunks[0], conversation);
        self.render_quick_prompts(frame, chunks[1]);
        self.render_input(frame, chunks[2]);
    }

    fn render_conversation(&mut self, frame: &mut Frame, area: Rect, conversation: &[ChatMessage]) {
        let block = theme::block_default("Character Analysis");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        for msg in conversation {
            if msg.content.is_empty() {
                continue;
            }
            let (label, color) = match msg.role {
                MessageRole::User => ("You", theme::SUCCESS),
                MessageRole::Assistant => ("Gemini", theme::PRIMARY_LIGHT),
            };
            lines.push(Line::from(Span::styled(
                format!("── {label} ──"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for content_line in msg.content.lines() {
                lines.push(Line::raw(content_line.to_string()));
            }
            lines.push(Line::raw(""));
        }

        if lines.is_empty() {
            lines.push(Line::styled(
                "Ask about the character, e.g. \"How would they react to betrayal?\"",
                theme::muted(),
            ));
        }

        let total = lines.len();
        let visible = inner.height as usize;
        let max_scroll = total.saturating_sub(visible);
        if self.auto_scroll {
            self.scroll = max_scroll;
        } else {
            self.scroll = self.scroll.min(max_scroll);
            if self.scroll == max_scroll {
                self.auto_scroll = true;
            }
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll as u16, 0)),
            inner,
        );
    }

    fn render_quick_prompts(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("Quick: ", theme::muted())];
        for (idx, (label, _)) in QUICK_PROMPTS.iter().enumerate() {
            spans.push(Span::styled(
                format!("{}", idx + 1),
                Style::default().fg(theme::ACCENT_SOFT).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(":{label}  "), theme::key_hint()));
        }
        spans.push(Span::styled("c", Style::default().fg(theme::ACCENT_SOFT)));
        spans.push(Span::styled(":clear history", theme::key_hint()));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let insert = self.mode == InputMode::Insert;
        let (border_color, title) = if insert {
            (theme::ACCENT_SOFT, " Question (Enter to ask) ")
        } else {
            (theme::TEXT_DIM, " Question (i to type) ")
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title);

        if self.asking {
            block = block.title_bottom(Line::styled(
                " Gemini is thinking... ",
                Style::default().fg(theme::PRIMARY_LIGHT),
            ));
        }

        let lines = if self.input.text().is_empty() && !insert {
            vec![Line::styled(
                "e.g., How would this character react to betrayal?",
                theme::muted(),
            )]
        } else {
            let cursor_style =
                insert.then(|| Style::default().bg(theme::TEXT).fg(theme::BG_BASE));
            display_lines(&self.input, cursor_style)
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_submit_question() {
        let mut chat = ChatState::new();
        chat.handle_input(&key(KeyCode::Char('i')));
        for c in "why?".chars() {
            chat.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(
            chat.handle_input(&key(KeyCode::Enter)),
            Some(ChatResult::Ask("why?".to_string()))
        );
        assert!(chat.input.text().is_empty());
    }

    #[test]
    fn test_empty_question_is_not_sent() {
        let mut chat = ChatState::new();
        chat.handle_input(&key(KeyCode::Char('i')));
        assert_eq!(
            chat.handle_input(&key(KeyCode::Enter)),
            Some(ChatResult::Consumed)
        );
    }

    #[test]
    fn test_in_flight_blocks_submit() {
        let mut chat = ChatState::new();
        chat.asking = true;
        chat.handle_input(&key(KeyCode::Char('i')));
        chat.handle_input(&key(KeyCode::Char('x')));
        assert_eq!(
            chat.handle_input(&key(KeyCode::Enter)),
            Some(ChatResult::Consumed)
        );
    }

    #[test]
    fn test_quick_prompt_prefills_input() {
        let mut chat = ChatState::new();
        chat.handle_input(&key(KeyCode::Char('2')));
        assert_eq!(chat.input.text(), QUICK_PROMPTS[1].1);
        assert!(chat.is_insert());
    }

    #[test]
    fn test_clear_key() {
        let mut chat = ChatState::new();
        assert_eq!(
            chat.handle_input(&key(KeyCode::Char('c'))),
            Some(ChatResult::Clear)
        );
    }

    #[test]
    fn test_unknown_normal_key_falls_through() {
        let mut chat = ChatState::new();
        assert_eq!(chat.handle_input(&key(KeyCode::Char('q'))), None);
    }
}
