//! Next-ritual suggestions derived from the lineage tail.

use crate::lineage::{LineageEntry, RitualTag};
use crate::service::RitualKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub ritual: RitualKind,
    pub title: String,
    pub message: String,
}

/// Suggest `reflect` when the lineage ends with `mutate` then `evolve`.
///
/// This is the whole rule set.
pub fn suggest(entries: &[LineageEntry]) -> Vec<Suggestion> {
    let [.., prev, last] = entries else {
        return Vec::new();
    };

    if last.ritual == RitualTag::Evolve && prev.ritual == RitualTag::Mutate {
        vec![Suggestion {
            ritual: RitualKind::Reflect,
            title: "Consider Reflecting".to_string(),
            message: "You've evolved and mutated; reflect to extract meaning.".to_string(),
        }]
    } else {
        Vec::new()
    }
}
