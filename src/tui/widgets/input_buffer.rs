//! Shared text input buffer with cursor management.
//!
//! Used by every editable field in the app. Supports embedded newlines
//! for the multi-line editors (description, trait text areas).

/// A text input buffer with byte-indexed cursor positioning.
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            content: String::new(),
            cursor: 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a line break at the cursor (multi-line editors only).
    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.content[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.len() {
            self.cursor = self.content[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.content.len());
        }
    }

    /// Start of the current line.
    pub fn move_home(&mut self) {
        self.cursor = self.content[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    /// End of the current line.
    pub fn move_end(&mut self) {
        self.cursor = self.content[self.cursor..]
            .find('\n')
            .map(|i| self.cursor + i)
            .unwrap_or(self.content.len());
    }

    /// Move the cursor one line up, clamping the column.
    pub fn move_up(&mut self) {
        let (line, col) = self.cursor_line_col();
        if line == 0 {
            return;
        }
        self.cursor = byte_index_for(&self.content, line - 1, col);
    }

    /// Move the cursor one line down, clamping the column.
    pub fn move_down(&mut self) {
        let (line, col) = self.cursor_line_col();
        let last_line = self.content.matches('\n').count();
        if line >= last_line {
            return;
        }
        self.cursor = byte_index_for(&self.content, line + 1, col);
    }

    /// Replace the whole buffer, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.cursor = self.content.len();
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Cursor position as (line, column) in characters.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let col = before
            .rfind('\n')
            .map(|i| before[i + 1..].chars().count())
            .unwrap_or_else(|| before.chars().count());
        (line, col)
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the buffer as text lines, optionally with a block cursor.
///
/// Multi-line aware: the cursor may sit on any line, including on the
/// line break itself (rendered as a block at end of line).
pub fn display_lines(
    input: &InputBuffer,
    cursor_style: Option<ratatui::style::Style>,
) -> Vec<ratatui::text::Line<'static>> {
    use ratatui::text::{Line, Span};

    let text = input.text();
    let cursor = input.cursor_position();
    let mut lines = Vec::new();
    let mut offset = 0usize;

    for raw_line in text.split('\n') {
        let end = offset + raw_line.len();
        let cursor_here = cursor_style.is_some() && cursor >= offset && cursor <= end;

        if let (true, Some(style)) = (cursor_here, cursor_style) {
            let local = cursor - offset;
            let before = raw_line[..local].to_string();
            let (cursor_char, after) = if local < raw_line.len() {
                let ch_len = raw_line[local..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(1);
                (
                    raw_line[local..local + ch_len].to_string(),
                    raw_line[local + ch_len..].to_string(),
                )
            } else {
                (" ".to_string(), String::new())
            };
            lines.push(Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char, style),
                Span::raw(after),
            ]));
        } else {
            lines.push(Line::raw(raw_line.to_string()));
        }

        offset = end + 1;
    }

    lines
}

/// Byte index of `col` (clamped to line length) on 0-based `line`.
fn byte_index_for(text: &str, line: usize, col: usize) -> usize {
    let mut start = 0;
    for _ in 0..line {
        match text[start..].find('\n') {
            Some(i) => start += i + 1,
            None => return text.len(),
        }
    }
    let end = text[start..].find('\n').map(|i| start + i).unwrap_or(text.len());
    let line_text = &text[start..end];
    line_text
        .char_indices()
        .nth(col)
        .map(|(i, _)| start + i)
        .unwrap_or(end)
}
