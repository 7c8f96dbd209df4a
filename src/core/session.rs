//! Per-character session context.
//!
//! Everything the UI accumulates while one character is selected: the
//! last round of proposed deltas, the merge report derived from them,
//! and the Q&A conversation. Switching characters resets the lot.

use crate::core::llm::ChatMessage;
use crate::core::traits::{MergeReport, TraitMap};

/// Mutable session state scoped to the selected character.
#[derive(Default)]
pub struct SessionContext {
    /// Name of the selected character, if any.
    pub character: Option<String>,
    /// Raw delta map from the most recent generate/apply round.
    pub last_update: TraitMap,
    /// Classification of `last_update` against the merge it produced.
    pub last_report: Option<MergeReport>,
    /// Q&A conversation history, oldest first.
    pub conversation: Vec<ChatMessage>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a character, clearing all per-character state.
    pub fn switch_to(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.character.as_deref() == Some(name.as_str()) {
            return;
        }
        self.character = Some(name);
        self.last_update = TraitMap::new();
        self.last_report = None;
        self.conversation.clear();
    }

    /// Deselect entirely (e.g. the selected character was deleted).
    pub fn clear(&mut self) {
        self.character = None;
        self.last_update = TraitMap::new();
        self.last_report = None;
        self.conversation.clear();
    }

    /// Record a completed delta round for the update panel.
    pub fn record_update(&mut self, deltas: TraitMap, report: MergeReport) {
        self.last_update = deltas;
        self.last_report = Some(report);
    }

    /// Append one Q&A exchange to the conversation.
    pub fn record_exchange(&mut self, question: String, answer: String) {
        self.conversation.push(ChatMessage::user(question));
        self.conversation.push(ChatMessage::assistant(answer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::merge;

    #[test]
    fn test_switch_resets_state() {
        let mut session = SessionContext::new();
        session.switch_to("Mara");
        session.record_exchange("q".to_string(), "a".to_string());

        let mut deltas = TraitMap::new();
        deltas.insert("curious".to_string(), 3);
        let merged = merge(&TraitMap::new(), &deltas);
        let report = MergeReport::classify(&deltas, &merged);
        session.record_update(deltas, report);

        session.switch_to("Brin");
        assert_eq!(session.character.as_deref(), Some("Brin"));
        assert!(session.conversation.is_empty());
        assert!(session.last_update.is_empty());
        assert!(session.last_report.is_none());
    }

    #[test]
    fn test_switch_to_same_character_keeps_state() {
        let mut session = SessionContext::new();
        session.switch_to("Mara");
        session.record_exchange("q".to_string(), "a".to_string());
        session.switch_to("Mara");
        assert_eq!(session.conversation.len(), 2);
    }

    #[test]
    fn test_record_exchange_orders_roles() {
        let mut session = SessionContext::new();
        session.switch_to("Mara");
        session.record_exchange("who?".to_string(), "her.".to_string());
        assert_eq!(session.conversation[0].content, "who?");
        assert_eq!(session.conversation[1].content, "her.");
    }

    #[test]
    fn test_clear_deselects() {
        let mut session = SessionContext::new();
        session.switch_to("Mara");
        session.clear();
        assert!(session.character.is_none());
    }
}
