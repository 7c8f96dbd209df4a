//! History view — browse a character's version history.
//!
//! Read-only: the list on the left holds every version newest-first,
//! the panel on the right shows the selected snapshot's trait text.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::character::{CharacterRecord, TraitVersion};
use crate::core::codec::traits_to_text;
use crate::tui::theme;

pub struct HistoryState {
    /// Versions newest-first.
    versions: Vec<TraitVersion>,
    selected: usize,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            selected: 0,
        }
    }

    /// Sync with a freshly loaded or just-saved record.
    pub fn load(&mut self, record: &CharacterRecord) {
        self.versions = record.history.iter().rev().cloned().collect();
        self.selected = 0;
    }

    pub fn reset(&mut self) {
        self.versions.clear();
        self.selected = 0;
    }

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };
        if *modifiers != KeyModifiers::NONE && *modifiers != KeyModifiers::SHIFT {
            return false;
        }

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.versions.is_empty() {
                    self.selected = (self.selected + 1).min(self.versions.len() - 1);
                }
                true
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.selected = 0;
                true
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.versions.len().saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, record: Option<&CharacterRecord>) {
        let Some(record) = record else {
            let block = theme::block_default("History");
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(Line::styled("No character selected", theme::muted())),
                inner,
            );
            return;
        };

        let cols = Layout::horizontal([Constraint::Length(34), Constraint::Min(10)]).split(area);

        // Version list
        let list_title = format!("History — {}", record.character);
        let list_block = theme::block_focused(&list_title);
        let list_inner = list_block.inner(cols[0]);
        frame.render_widget(list_block, cols[0]);

        let visible = list_inner.height as usize;
        let first = self
            .selected
            .saturating_sub(visible.saturating_sub(1));

        let rows: Vec<Line> = self
            .versions
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .map(|(idx, version)| {
                let marker = if idx == self.selected { "▸" } else { " " };
                let style = if idx == self.selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                let date = version
                    .timestamp
                    .split('T')
                    .next()
                    .unwrap_or(&version.timestamp);
                Line::from(vec![
                    Span::styled(marker.to_string(), Style::default().fg(theme::ACCENT)),
                    Span::styled(format!(" v{:<3}", version.version), style),
                    Span::styled(format!(" {date}"), theme::muted()),
                    Span::styled(
                        format!("  {} traits", version.traits.len()),
                        theme::dim(),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(rows), list_inner);

        // Snapshot detail
        let detail_block = theme::block_default("Snapshot");
        let detail_inner = detail_block.inner(cols[1]);
        frame.render_widget(detail_block, cols[1]);

        let detail: Vec<Line> = match self.versions.get(self.selected) {
            Some(version) if version.traits.is_empty() => {
                vec![Line::styled("(empty trait map)", theme::dim())]
            }
            Some(version) => {
                let mut lines = vec![
                    Line::styled(version.timestamp.clone(), theme::muted()),
                    Line::raw(""),
                ];
                lines.extend(
                    traits_to_text(&version.traits)
                        .lines()
                        .map(|l| Line::raw(l.to_string())),
                );
                lines
            }
            None => vec![Line::styled("(no versions)", theme::dim())],
        };

        frame.render_widget(Paragraph::new(detail), detail_inner);
    }
}
