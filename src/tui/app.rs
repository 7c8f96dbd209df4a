use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::core::codec::text_to_traits;
use crate::core::character::CharacterRecord;
use crate::core::session::SessionContext;
use crate::core::store::StoreError;
use crate::core::traits::{merge, MergeReport, TraitMap};

use super::events::{
    Action, AppEvent, AreaFocus, Focus, LlmAction, Notification, NotificationLevel,
};
use super::layout::AppLayout;
use super::roster::{RosterResult, RosterState};
use super::services::Services;
use super::theme;
use super::views::chat::{ChatResult, ChatState};
use super::views::editor::{EditorResult, EditorState};
use super::views::history::HistoryState;
use super::views::profile::{ProfileResult, ProfileState};

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused top-level view.
    pub focus: Focus,
    /// Whether roster or main content has input focus.
    pub area_focus: AreaFocus,
    /// Character roster sidebar.
    pub roster: RosterState,
    /// Profile view state.
    pub profile: ProfileState,
    /// Trait editor view state.
    pub editor: EditorState,
    /// Analysis chat view state.
    pub chat: ChatState,
    /// Version history view state.
    pub history: HistoryState,
    /// Per-character session context (reset on switch).
    pub session: SessionContext,
    /// Loaded record for the selected character.
    record: Option<CharacterRecord>,
    /// LLM call in flight, if any. One at a time.
    llm_busy: Option<LlmAction>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for backend events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Backend services handle.
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            focus: Focus::Profile,
            area_focus: AreaFocus::Main,
            roster: RosterState::new(),
            profile: ProfileState::new(),
            editor: EditorState::new(),
            chat: ChatState::new(),
            history: HistoryState::new(),
            session: SessionContext::new(),
            record: None,
            llm_busy: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        // Load the roster and open the first character, if any
        self.roster.refresh(&self.services);
        if let Some(name) = self.roster.selected_name().map(str::to_string) {
            self.select_character(&name);
        } else {
            self.area_focus = AreaFocus::Roster;
        }

        if !self.services.llm_ready() {
            if let Err(message) = self.services.profiler() {
                self.push_notification(message, NotificationLevel::Warning);
            }
        }

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Roster input (when focused)
                if self.area_focus == AreaFocus::Roster {
                    if let Some(result) = self.roster.handle_input(&crossterm_event) {
                        self.handle_roster_result(result);
                        return;
                    }
                }

                // Priority 3: Focused view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 4: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Tick => self.on_tick(),
            AppEvent::DeltasProposed { character, deltas } => {
                self.on_deltas_proposed(character, deltas);
            }
            AppEvent::AnswerReady {
                character,
                question,
                answer,
            } => {
                self.on_answer_ready(character, question, answer);
            }
            AppEvent::LlmFailed { action, error } => {
                self.llm_busy = None;
                self.profile.busy = false;
                self.chat.asking = false;
                log::error!("{} failed: {error}", action.label());
                self.push_notification(
                    format!("{} failed: {error}", action.label()),
                    NotificationLevel::Error,
                );
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Profile => match self.profile.handle_input(event) {
                Some(ProfileResult::Generate(description)) => {
                    self.start_generate(description);
                    true
                }
                Some(ProfileResult::Consumed) => true,
                None => false,
            },
            Focus::Editor => match self.editor.handle_input(event) {
                Some(EditorResult::Apply { updates, current }) => {
                    self.apply_edits(&updates, &current);
                    true
                }
                Some(EditorResult::Consumed) => true,
                None => false,
            },
            Focus::Chat => match self.chat.handle_input(event) {
                Some(ChatResult::Ask(question)) => {
                    self.start_ask(question);
                    true
                }
                Some(ChatResult::Clear) => {
                    self.clear_chat();
                    true
                }
                Some(ChatResult::Consumed) => true,
                None => false,
            },
            Focus::History => self.history.handle_input(event),
        }
    }

    fn handle_roster_result(&mut self, result: RosterResult) {
        match result {
            RosterResult::Consumed => {}
            RosterResult::Select(name) => {
                self.select_character(&name);
                self.area_focus = AreaFocus::Main;
            }
            RosterResult::Create(name) => self.create_character(&name),
            RosterResult::Delete(name) => self.delete_character(&name),
            RosterResult::FocusMain => {
                self.area_focus = AreaFocus::Main;
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleRoster),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusProfile => self.set_focus(Focus::Profile),
            Action::FocusEditor => self.set_focus(Focus::Editor),
            Action::FocusChat => self.set_focus(Focus::Chat),
            Action::FocusHistory => self.set_focus(Focus::History),
            Action::TabNext => self.set_focus(self.focus.next()),
            Action::TabPrev => self.set_focus(self.focus.prev()),
            Action::ToggleRoster => {
                self.roster.toggle_collapse();
                if !self.roster.user_collapsed {
                    self.area_focus = AreaFocus::Roster;
                } else {
                    self.area_focus = AreaFocus::Main;
                }
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.area_focus = AreaFocus::Main;
    }

    // ── Character lifecycle ─────────────────────────────────────────────

    fn select_character(&mut self, name: &str) {
        let record = match self.services.store.load(name) {
            Ok(record) => record,
            Err(e) => {
                log::error!("Failed to load {name}: {e}");
                self.push_notification(
                    format!("Load failed: {e}"),
                    NotificationLevel::Error,
                );
                return;
            }
        };

        let switching = self.session.character.as_deref() != Some(name);
        if switching {
            self.session.switch_to(name);
            self.profile.reset();
            self.chat.reset();
        }
        self.editor.load(&record);
        self.history.load(&record);
        self.roster.highlight(name);
        self.record = Some(record);
        log::info!("Selected character {name}");
    }

    fn create_character(&mut self, name: &str) {
        match self.services.store.create(name) {
            Ok(_) => {
                self.roster.refresh(&self.services);
                self.select_character(name);
                self.push_notification(
                    format!("Created {name}"),
                    NotificationLevel::Success,
                );
            }
            Err(e @ StoreError::AlreadyExists(_)) | Err(e @ StoreError::InvalidName(_)) => {
                self.push_notification(e.to_string(), NotificationLevel::Warning);
            }
            Err(e) => {
                log::error!("Failed to create {name}: {e}");
                self.push_notification(
                    format!("Create failed: {e}"),
                    NotificationLevel::Error,
                );
            }
        }
    }

    fn delete_character(&mut self, name: &str) {
        if let Err(e) = self.services.store.delete(name) {
            log::error!("Failed to delete {name}: {e}");
            self.push_notification(format!("Delete failed: {e}"), NotificationLevel::Error);
            return;
        }

        self.roster.refresh(&self.services);

        if self.session.character.as_deref() == Some(name) {
            self.session.clear();
            self.record = None;
            self.profile.reset();
            self.chat.reset();
            self.editor.reset();
            self.history.reset();

            if let Some(next) = self.roster.selected_name().map(str::to_string) {
                self.select_character(&next);
            } else {
                self.area_focus = AreaFocus::Roster;
            }
        }

        self.push_notification(format!("Deleted {name}"), NotificationLevel::Info);
    }

    // ── Trait generation ────────────────────────────────────────────────

    fn start_generate(&mut self, description: String) {
        let Some(record) = &self.record else {
            self.push_notification(
                "Select a character first",
                NotificationLevel::Warning,
            );
            return;
        };
        if self.llm_busy.is_some() {
            return;
        }
        let profiler = match self.services.profiler() {
            Ok(profiler) => profiler,
            Err(message) => {
                self.push_notification(message, NotificationLevel::Error);
                return;
            }
        };

        let name = record.character.clone();
        let previous = record.current_traits();
        let tx = self.services.event_tx.clone();

        self.llm_busy = Some(LlmAction::Propose);
        self.profile.busy = true;

        tokio::spawn(async move {
            match profiler.propose_deltas(&description, &name, &previous).await {
                Ok(deltas) => {
                    let _ = tx.send(AppEvent::DeltasProposed {
                        character: name,
                        deltas,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::LlmFailed {
                        action: LlmAction::Propose,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn on_deltas_proposed(&mut self, character: String, deltas: TraitMap) {
        self.llm_busy = None;
        self.profile.busy = false;

        let Some(mut record) = self.record.clone() else {
            return;
        };
        if record.character != character {
            // The user switched characters while the call was in flight
            self.push_notification(
                format!("Discarded stale proposal for {character}"),
                NotificationLevel::Warning,
            );
            return;
        }

        if deltas.is_empty() {
            self.push_notification(
                "No trait changes proposed",
                NotificationLevel::Info,
            );
            return;
        }

        let previous = record.current_traits();
        let merged = merge(&previous, &deltas);
        let report = MergeReport::classify(&deltas, &merged);
        let version = record.append_version(merged);

        if let Err(e) = self.services.store.save(&record) {
            log::error!("Failed to save {}: {e}", record.character);
            self.push_notification(format!("Save failed: {e}"), NotificationLevel::Error);
        }

        self.editor.load(&record);
        self.history.load(&record);
        self.push_notification(
            format!(
                "Profile updated to v{version}: +{} −{} removed {}",
                report.strengthened.len(),
                report.weakened.len(),
                report.removed.len()
            ),
            NotificationLevel::Success,
        );
        self.session.record_update(deltas, report);
        self.record = Some(record);
    }

    // ── Manual edits ────────────────────────────────────────────────────

    fn apply_edits(&mut self, updates_text: &str, current_text: &str) {
        let Some(mut record) = self.record.clone() else {
            self.push_notification(
                "Select a character first",
                NotificationLevel::Warning,
            );
            return;
        };

        let updates = text_to_traits(updates_text);
        let current = text_to_traits(current_text);
        let merged = merge(&current, &updates);

        if merged == record.current_traits() {
            self.push_notification("No changes to apply", NotificationLevel::Info);
            return;
        }

        let report = MergeReport::classify(&updates, &merged);
        let version = record.append_version(merged);

        if let Err(e) = self.services.store.save(&record) {
            log::error!("Failed to save {}: {e}", record.character);
            self.push_notification(format!("Save failed: {e}"), NotificationLevel::Error);
        }

        self.editor.load(&record);
        self.history.load(&record);
        self.session.record_update(updates, report);
        self.record = Some(record);
        self.push_notification(
            format!("Changes applied (v{version})"),
            NotificationLevel::Success,
        );
    }

    // ── Analysis Q&A ────────────────────────────────────────────────────

    fn start_ask(&mut self, question: String) {
        let Some(record) = &self.record else {
            self.push_notification(
                "Select a character first",
                NotificationLevel::Warning,
            );
            return;
        };
        if self.llm_busy.is_some() {
            return;
        }
        let profiler = match self.services.profiler() {
            Ok(profiler) => profiler,
            Err(message) => {
                self.push_notification(message, NotificationLevel::Error);
                return;
            }
        };

        let name = record.character.clone();
        let traits = record.current_traits();
        let history = self.session.conversation.clone();
        let tx = self.services.event_tx.clone();

        self.llm_busy = Some(LlmAction::Ask);
        self.chat.asking = true;

        tokio::spawn(async move {
            match profiler.ask_question(&question, &name, &traits, &history).await {
                Ok(answer) => {
                    let _ = tx.send(AppEvent::AnswerReady {
                        character: name,
                        question,
                        answer,
                    });
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::LlmFailed {
                        action: LlmAction::Ask,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn on_answer_ready(&mut self, character: String, question: String, answer: String) {
        self.llm_busy = None;
        self.chat.asking = false;

        if self.session.character.as_deref() != Some(character.as_str()) {
            self.push_notification(
                format!("Discarded stale answer for {character}"),
                NotificationLevel::Warning,
            );
            return;
        }

        self.session.record_exchange(question, answer);
        self.chat.scroll_to_bottom();
    }

    fn clear_chat(&mut self) {
        self.session.conversation.clear();
        self.chat.scroll_to_bottom();
        self.push_notification("Conversation cleared", NotificationLevel::Info);
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let message = message.into();
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let (layout, visibility) = AppLayout::compute(area, self.roster.user_collapsed);

        if let Some(roster_area) = layout.roster {
            self.roster.render(
                frame,
                roster_area,
                visibility,
                self.session.character.as_deref(),
                self.area_focus,
            );
        }

        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.focus {
            Focus::Profile => {
                self.profile
                    .render(frame, area, self.record.as_ref(), &self.session)
            }
            Focus::Editor => self.editor.render(frame, area, self.record.as_ref()),
            Focus::Chat => self.chat.render(frame, area, &self.session.conversation),
            Focus::History => self.history.render(frame, area, self.record.as_ref()),
        }
    }

    fn is_insert(&self) -> bool {
        match self.focus {
            Focus::Profile => self.profile.is_insert(),
            Focus::Editor => self.editor.is_insert(),
            Focus::Chat => self.chat.is_insert(),
            Focus::History => false,
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let llm_status = if self.llm_busy.is_some() {
            Span::styled("thinking", Style::default().fg(theme::PRIMARY_LIGHT))
        } else if self.services.llm_ready() {
            Span::styled("ready", Style::default().fg(theme::TEXT_MUTED))
        } else {
            Span::styled("no API key", Style::default().fg(theme::WARNING))
        };

        let mode_indicator = if self.is_insert() && self.area_focus == AreaFocus::Main {
            Span::styled(" INSERT ", theme::insert_badge())
        } else {
            Span::raw("")
        };

        let character = self
            .session
            .character
            .as_deref()
            .unwrap_or("—")
            .to_string();

        let status = Line::from(vec![
            Span::styled(" traitcloud ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(character, Style::default().fg(theme::TEXT)),
            Span::raw(" │ "),
            Span::styled("LLM:", theme::key_hint()),
            Span::raw(" "),
            llm_status,
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":view "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":roster "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.clone()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit application"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous view"),
            ("Ctrl+B", "Toggle/focus character roster"),
            ("Ctrl+C", "Force quit"),
            ("", ""),
            ("Roster (when focused):", ""),
            ("j/k", "Navigate characters"),
            ("Enter / l", "Open character"),
            ("n", "New character"),
            ("d", "Delete character (y confirms)"),
            ("Esc / h", "Focus main content"),
            ("", ""),
            ("Profile View:", ""),
            ("i", "Edit the description"),
            ("g / Ctrl+G", "Generate trait deltas (LLM)"),
            ("Esc", "Exit insert mode"),
            ("", ""),
            ("Traits View:", ""),
            ("h/l", "Switch editor pane"),
            ("i", "Edit the active pane"),
            ("a / Ctrl+S", "Apply changes (new version)"),
            ("", ""),
            ("Analysis View:", ""),
            ("i / Enter", "Type a question"),
            ("1-4", "Quick analysis prompts"),
            ("c", "Delete chat history"),
            ("j/k, G/g", "Scroll conversation"),
            ("", ""),
            ("History View:", ""),
            ("j/k", "Navigate versions"),
            ("g/G", "Jump to newest / oldest"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        let hint_key = Style::default()
            .fg(theme::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD);
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", hint_key),
            Span::raw(" or "),
            Span::styled("Esc", hint_key),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
