//! Text ⇄ trait-map codec.
//!
//! The manual editors exchange trait maps as plain text, one
//! `"<trait>: <weight>"` line per entry. Encoding is deterministic;
//! decoding is tolerant and silently skips anything it cannot parse.

use crate::core::traits::TraitMap;

/// Serialize a trait map to editor text.
///
/// Lines are sorted by descending absolute weight, then ascending
/// case-insensitive name, so the strongest traits always lead and ties
/// break stably.
pub fn traits_to_text(traits: &TraitMap) -> String {
    let mut entries: Vec<(&String, &i32)> = traits.iter().collect();
    entries.sort_by(|(a_name, a_weight), (b_name, b_weight)| {
        b_weight
            .abs()
            .cmp(&a_weight.abs())
            .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
    });

    entries
        .iter()
        .map(|(name, weight)| format!("{name}: {weight}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse editor text back into a trait map.
///
/// Each line is split on its first colon; both halves are trimmed.
/// Blank lines, lines without a colon, and lines whose value is not an
/// integer are skipped without feedback. Positivity is not enforced
/// here — only the merge prunes.
pub fn text_to_traits(text: &str) -> TraitMap {
    let mut traits = TraitMap::new();

    for line in text.lines() {
        let line = line.trim();
        let Some((name, weight_str)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if let Ok(weight) = weight_str.trim().parse::<i32>() {
            traits.insert(name.to_string(), weight);
        }
    }

    traits
}
