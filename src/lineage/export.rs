use super::store::LineageStore;
use crate::error::{ExportError, GlyphError};
use std::fs;
use std::path::{Path, PathBuf};

pub const HISTORY_FILE_NAME: &str = "glyph_lineage_history.json";

/// Pretty JSON array of every lineage entry, oldest first.
pub fn history_json(store: &LineageStore) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(store.all())?)
}

/// Write the full history into `dir` and return the file path.
pub fn export_history(store: &LineageStore, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(HISTORY_FILE_NAME);
    fs::write(&path, history_json(store)?)?;
    Ok(path)
}

/// Write one entry as `glyph_{n}.svg` and `glyph_{n}.json` (1-based `n`).
pub fn export_entry(
    store: &LineageStore,
    index: usize,
    dir: &Path,
) -> Result<(PathBuf, PathBuf), GlyphError> {
    let entry = store.at(index)?;
    fs::create_dir_all(dir).map_err(ExportError::from)?;

    let stem = format!("glyph_{}", index + 1);
    let svg_path = dir.join(format!("{stem}.svg"));
    let json_path = dir.join(format!("{stem}.json"));

    fs::write(&svg_path, &entry.svg).map_err(ExportError::from)?;
    let glyph = serde_json::to_string_pretty(&entry.glyph).map_err(ExportError::from)?;
    fs::write(&json_path, glyph).map_err(ExportError::from)?;

    Ok((svg_path, json_path))
}
