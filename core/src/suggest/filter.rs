//! Redundancy filtering of tolerance-window candidates.

use crate::suggest::equivalence::EquivalenceClasses;
use crate::suggest::types::Suggestion;

/// Drop every candidate whose subject and partner already share an
/// equivalence class: a constraint chain ties them together and offering
/// the pair again would be redundant.
///
/// Surviving candidates keep their tolerance-sorted order; nothing is
/// reordered or deduplicated here, only removed. Subjects left with no
/// candidates are dropped from the result.
pub fn drop_redundant(window: Vec<Suggestion>, classes: &EquivalenceClasses) -> Vec<Suggestion> {
    window
        .into_iter()
        .filter_map(|mut suggestion| {
            suggestion
                .candidates
                .retain(|entry| !classes.same_class(suggestion.subject, entry.other));
            if suggestion.candidates.is_empty() {
                None
            } else {
                Some(suggestion)
            }
        })
        .collect()
}
