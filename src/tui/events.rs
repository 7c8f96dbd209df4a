//! Events flowing through the Elm-architecture event loop.

use crate::core::traits::TraitMap;

/// Events delivered to the main loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The LLM proposed trait deltas for a description round.
    DeltasProposed {
        character: String,
        deltas: TraitMap,
    },
    /// The LLM answered a profile question.
    AnswerReady {
        character: String,
        question: String,
        answer: String,
    },
    /// An LLM call failed; scoped to the one action that issued it.
    LlmFailed { action: LlmAction, error: String },
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// Which kind of LLM call is (or was) in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmAction {
    Propose,
    Ask,
}

impl LlmAction {
    pub fn label(self) -> &'static str {
        match self {
            LlmAction::Propose => "trait generation",
            LlmAction::Ask => "analysis",
        }
    }
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusProfile,
    FocusEditor,
    FocusChat,
    FocusHistory,
    TabNext,
    TabPrev,
    ToggleRoster,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Profile,
    Editor,
    Chat,
    History,
}

impl Focus {
    pub const ALL: [Focus; 4] = [Focus::Profile, Focus::Editor, Focus::Chat, Focus::History];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Profile => "Profile",
            Focus::Editor => "Traits",
            Focus::Chat => "Analysis",
            Focus::History => "History",
        }
    }

    pub fn to_action(self) -> Action {
        match self {
            Focus::Profile => Action::FocusProfile,
            Focus::Editor => Action::FocusEditor,
            Focus::Chat => Action::FocusChat,
            Focus::History => Action::FocusHistory,
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

/// Whether the roster sidebar or main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaFocus {
    Roster,
    Main,
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

impl Notification {
    /// A notification with the ID left for the app state to assign.
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            id: 0,
            message: message.into(),
            level,
            ttl_ticks: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_next_cycles() {
        let mut f = Focus::Profile;
        for _ in 0..Focus::ALL.len() {
            f = f.next();
        }
        assert_eq!(f, Focus::Profile);
    }

    #[test]
    fn test_focus_prev_cycles() {
        let mut f = Focus::Profile;
        for _ in 0..Focus::ALL.len() {
            f = f.prev();
        }
        assert_eq!(f, Focus::Profile);
    }

    #[test]
    fn test_focus_next_first_step() {
        assert_eq!(Focus::Profile.next(), Focus::Editor);
        assert_eq!(Focus::History.next(), Focus::Profile);
    }

    #[test]
    fn test_focus_all_labels() {
        for f in Focus::ALL {
            assert!(!f.label().is_empty());
        }
    }

    #[test]
    fn test_focus_to_action_is_unique() {
        let actions: Vec<Action> = Focus::ALL.iter().map(|f| f.to_action()).collect();
        for (i, a) in actions.iter().enumerate() {
            for (j, b) in actions.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
