use crate::lineage::RitualTag;
use console::style;
use std::fmt::Display;

/// Green bold: commits, confirmations
pub fn success<D: Display>(text: D) -> String {
    style(text).green().bold().to_string()
}

/// White bold: section headers
pub fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

/// Dim: timestamps, hints
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Red: ritual failures
pub fn failure<D: Display>(text: D) -> String {
    style(text).red().to_string()
}

/// Magenta italic: oracle insights
pub fn insight<D: Display>(text: D) -> String {
    style(text).magenta().italic().to_string()
}

/// Yellow: ghost previews and suggestions
pub fn ghost<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Cyan bold: entry indices
pub fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

/// Lineage tag, colored by where the entry came from.
pub fn tag(tag: RitualTag) -> String {
    let label = format!("{tag:<8}");
    match tag {
        RitualTag::Init | RitualTag::Manual => style(label).dim().to_string(),
        RitualTag::Evolve => style(label).green().to_string(),
        RitualTag::Mutate => style(label).blue().to_string(),
        RitualTag::Reflect => style(label).magenta().to_string(),
        RitualTag::Compress => style(label).cyan().to_string(),
    }
}
