use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use glyphcodex::Config;
use glyphcodex::commands::{StudioContext, render_entry, render_lineage};
use glyphcodex::events::StudioEvent;
use glyphcodex::service::RitualKind;
use glyphcodex::studio::Mode;
use glyphcodex::ui::style as ui;
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracing::info;

use crate::app::shell;
use crate::app::status::render_config;

/// Seed, run `kinds` in order, print the lineage. With `preview` the last
/// ritual is left as a ghost.
async fn run_rituals(config: &Config, kinds: &[RitualKind], preview: bool) -> Result<()> {
    let ctx = StudioContext::from_config(config);
    ctx.orchestrator
        .seed()
        .await
        .context("Failed to seed a glyph from the service")?;

    for (i, kind) in kinds.iter().enumerate() {
        if preview && i + 1 == kinds.len() {
            ctx.orchestrator.set_mode(Mode::Test);
        }
        ctx.orchestrator
            .run_ritual(*kind)
            .await
            .with_context(|| format!("{kind} ritual failed"))?;
    }

    println!("{}", render_lineage(&ctx.studio().lineage()));
    if let Some(ghost) = ctx.studio().ghost() {
        println!(
            "{} {}",
            ui::ghost(format!("ghost {}", ghost.kind)),
            render_entry(ctx.studio().lineage_len(), &ghost.entry)
        );
    }
    for suggestion in ctx.studio().suggestions() {
        println!("{} {}", ui::ghost(&suggestion.title), ui::dim(&suggestion.message));
    }
    if let Some(current) = ctx.studio().current() {
        println!("{}", current.svg);
    }
    Ok(())
}

/// Run the dream loop until `ticks` steps completed, it fails, or Ctrl-C.
async fn run_dream(config: &Config, ticks: u64, log: Option<PathBuf>) -> Result<()> {
    if ticks == 0 {
        bail!("--ticks must be at least 1");
    }

    let ctx = StudioContext::from_config(config);
    ctx.orchestrator
        .seed()
        .await
        .context("Failed to seed a glyph from the service")?;

    let mut events = ctx.studio().subscribe();
    ctx.dream.start().await.context("Dream loop failed")?;

    let mut failure = None;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(StudioEvent::DreamStepCompleted { step }) => {
                    info!(step, "dream step finished");
                    if step >= ticks {
                        break;
                    }
                }
                Ok(StudioEvent::DreamFailed { ritual, message }) => {
                    failure = Some(format!("{ritual}: {message}"));
                    break;
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted, stopping dream loop");
                break;
            }
        }
    }
    ctx.dream.stop();

    println!("{}", render_lineage(&ctx.studio().lineage()));
    if let Some(path) = log {
        let json = ctx.dream.log_json().context("Failed to serialize dream log")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write dream log to {}", path.display()))?;
        println!("{}", ui::dim(format!("dream log written to {}", path.display())));
    }

    if let Some(failure) = failure {
        bail!("Dream loop stopped after a failed step ({failure})");
    }
    Ok(())
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
        config.validate()?;
    }

    match cli.command {
        Commands::Ritual { kinds, preview } => run_rituals(&config, &kinds, preview).await,
        Commands::Dream { ticks, log } => run_dream(&config, ticks, log).await,
        Commands::Studio => shell::run(&config).await,
        Commands::Config => {
            println!("{}", render_config(&config)?);
            Ok(())
        }
    }
}
