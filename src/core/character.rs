//! Character records and their version history.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::core::traits::TraitMap;

/// A timestamped snapshot of a character's full trait map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraitVersion {
    /// Monotonic, 1-based.
    pub version: u32,
    /// ISO-8601 creation time.
    pub timestamp: String,
    pub traits: TraitMap,
}

/// A named character with an append-only trait history.
///
/// The last history entry is the current profile. History is never
/// rewritten: every mutating action appends a fresh version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterRecord {
    pub character: String,
    pub history: Vec<TraitVersion>,
}

impl CharacterRecord {
    /// A new character starts with a single empty version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            character: name.into(),
            history: vec![TraitVersion {
                version: 1,
                timestamp: now_iso8601(),
                traits: TraitMap::new(),
            }],
        }
    }

    /// The current (latest) version.
    ///
    /// The constructor and `append_version` guarantee at least one entry,
    /// so this only falls back to an empty snapshot for hand-edited files
    /// with an empty history array.
    pub fn current(&self) -> TraitVersion {
        self.history.last().cloned().unwrap_or(TraitVersion {
            version: 1,
            timestamp: now_iso8601(),
            traits: TraitMap::new(),
        })
    }

    /// Current trait map, cloned for mutation-free callers.
    pub fn current_traits(&self) -> TraitMap {
        self.history
            .last()
            .map(|v| v.traits.clone())
            .unwrap_or_default()
    }

    /// Append a new version holding `traits`, returning its number.
    pub fn append_version(&mut self, traits: TraitMap) -> u32 {
        let version = self.history.last().map(|v| v.version).unwrap_or(0) + 1;
        self.history.push(TraitVersion {
            version,
            timestamp: now_iso8601(),
            traits,
        });
        version
    }
}

fn now_iso8601() -> String {
    Local::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character_has_one_empty_version() {
        let record = CharacterRecord::new("Mara");
        assert_eq!(record.character, "Mara");
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].version, 1);
        assert!(record.history[0].traits.is_empty());
    }

    #[test]
    fn test_append_version_is_monotonic() {
        let mut record = CharacterRecord::new("Mara");
        let mut traits = TraitMap::new();
        traits.insert("curious".to_string(), 3);

        assert_eq!(record.append_version(traits.clone()), 2);
        assert_eq!(record.append_version(traits), 3);
        assert_eq!(record.history.len(), 3);
        assert_eq!(record.current().version, 3);
    }

    #[test]
    fn test_append_does_not_touch_prior_versions() {
        let mut record = CharacterRecord::new("Mara");
        let mut traits = TraitMap::new();
        traits.insert("bold".to_string(), 2);
        record.append_version(traits);

        assert!(record.history[0].traits.is_empty());
        assert_eq!(record.current_traits().get("bold"), Some(&2));
    }

    #[test]
    fn test_json_shape_roundtrip() {
        let mut record = CharacterRecord::new("Mara");
        let mut traits = TraitMap::new();
        traits.insert("curious".to_string(), 3);
        record.append_version(traits);

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("\"character\": \"Mara\""));
        assert!(json.contains("\"history\""));

        let parsed: CharacterRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_timestamps_are_iso8601() {
        let record = CharacterRecord::new("Mara");
        let ts = &record.history[0].timestamp;
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
