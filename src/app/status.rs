use anyhow::{Context, Result};
use glyphcodex::Config;
use glyphcodex::ui::style as ui;

pub fn render_config(config: &Config) -> Result<String> {
    let body = toml::to_string_pretty(config).context("Failed to serialize config")?;
    Ok(format!(
        "{} {}\n{}      {}\n\n{body}",
        ui::header("◆ glyphcodex"),
        env!("CARGO_PKG_VERSION"),
        ui::dim("config"),
        config.config_path.display(),
    ))
}
