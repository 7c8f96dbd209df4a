//! Trait cloud rendering.
//!
//! The terminal stand-in for the original word-cloud image: traits flow
//! left to right in weight order, colored by where their weight sits in
//! the profile's [min, max] range. Four plasma buckets, top bucket bold.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::traits::TraitMap;
use crate::tui::theme;

/// Which plasma quadrant a weight falls in (0 = weakest, 3 = strongest).
///
/// Normalizes `value` into the profile's weight range; a flat profile
/// (min == max) lands everything mid-range.
pub fn quadrant_index(value: i32, min: i32, max: i32) -> usize {
    let normalized = if max == min {
        0.5
    } else {
        (value - min) as f64 / (max - min) as f64
    };

    if normalized < 0.25 {
        0
    } else if normalized < 0.5 {
        1
    } else if normalized < 0.75 {
        2
    } else {
        3
    }
}

fn span_for(name: &str, weight: i32, min: i32, max: i32) -> Span<'static> {
    let quadrant = quadrant_index(weight, min, max);
    let mut style = Style::default().fg(theme::CLOUD_QUADRANTS[quadrant]);
    if quadrant == 3 {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(name.to_string(), style)
}

/// Lay the trait map out as flowing lines no wider than `width`.
///
/// Strongest traits first (the codec's display order), two spaces
/// between words, one word per line when the name alone exceeds the
/// width.
pub fn cloud_lines(traits: &TraitMap, width: u16) -> Vec<Line<'static>> {
    if traits.is_empty() {
        return vec![Line::styled(
            "No traits to display yet.",
            Style::default().fg(theme::TEXT_MUTED),
        )];
    }

    let min = traits.values().min().copied().unwrap_or(0);
    let max = traits.values().max().copied().unwrap_or(0);

    let mut entries: Vec<(&String, &i32)> = traits.iter().collect();
    entries.sort_by(|(a_name, a_weight), (b_name, b_weight)| {
        b_weight
            .abs()
            .cmp(&a_weight.abs())
            .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
    });

    let width = width.max(1) as usize;
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    for (name, weight) in entries {
        let word_width = name.chars().count();
        let needed = if current.is_empty() {
            word_width
        } else {
            word_width + 2
        };

        if !current.is_empty() && current_width + needed > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
        }

        if !current.is_empty() {
            current.push(Span::raw("  "));
            current_width += 2;
        }
        current.push(span_for(name, *weight, min, max));
        current_width += word_width;
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i32)]) -> TraitMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn test_quadrant_boundaries() {
        // Range 0..100: quarters split at 25/50/75
        assert_eq!(quadrant_index(0, 0, 100), 0);
        assert_eq!(quadrant_index(24, 0, 100), 0);
        assert_eq!(quadrant_index(25, 0, 100), 1);
        assert_eq!(quadrant_index(49, 0, 100), 1);
        assert_eq!(quadrant_index(50, 0, 100), 2);
        assert_eq!(quadrant_index(74, 0, 100), 2);
        assert_eq!(quadrant_index(75, 0, 100), 3);
        assert_eq!(quadrant_index(100, 0, 100), 3);
    }

    #[test]
    fn test_quadrant_flat_range_is_mid() {
        assert_eq!(quadrant_index(7, 7, 7), 2);
    }

    #[test]
    fn test_empty_map_renders_placeholder() {
        let lines = cloud_lines(&TraitMap::new(), 40);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_strongest_trait_leads() {
        let lines = cloud_lines(&map(&[("minor", 1), ("major", 9)]), 80);
        let first_span = &lines[0].spans[0];
        assert_eq!(first_span.content.as_ref(), "major");
    }

    #[test]
    fn test_flow_respects_width() {
        let traits = map(&[("aaaa", 3), ("bbbb", 2), ("cccc", 1)]);
        // Width 9 fits one 4-char word plus separator, not two
        let lines = cloud_lines(&traits, 9);
        assert_eq!(lines.len(), 3);

        let wide = cloud_lines(&traits, 80);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let traits = map(&[("averyveryverylongtrait", 2), ("tiny", 1)]);
        let lines = cloud_lines(&traits, 8);
        assert_eq!(lines.len(), 2);
    }
}
