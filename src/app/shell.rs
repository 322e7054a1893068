use anyhow::{Context, Result};
use glyphcodex::Config;
use glyphcodex::commands::{
    Command, StudioContext, handle_command, parse_command, render_lineage,
};
use glyphcodex::events::StudioEvent;
use glyphcodex::studio::Studio;
use glyphcodex::ui::style as ui;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

const PROMPT: &str = "glyph> ";

fn prompt() {
    print!("{}", ui::dim(PROMPT));
    let _ = std::io::stdout().flush();
}

/// Print what the dream loop does in the background.
fn spawn_dream_printer(studio: Arc<Studio>) -> JoinHandle<()> {
    let mut events = studio.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StudioEvent::DreamStepCompleted { step }) => {
                    let insight = studio
                        .insight()
                        .map(|i| format!(" {}", ui::insight(i.text)))
                        .unwrap_or_default();
                    println!("\n{}{insight}", ui::accent(format!("✧ dream step {step}")));
                    prompt();
                }
                Ok(StudioEvent::DreamFailed { ritual, message }) => {
                    println!(
                        "\n{}",
                        ui::failure(format!("dream {ritual} failed: {message}"))
                    );
                    prompt();
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    })
}

pub async fn run(config: &Config) -> Result<()> {
    let ctx = StudioContext::from_config(config);

    println!(
        "{} {}",
        ui::header("◆ glyphcodex studio"),
        ui::dim(&config.service.base_url)
    );
    match ctx.orchestrator.seed().await {
        Ok(()) => println!("{}", render_lineage(&ctx.studio().lineage())),
        Err(err) => println!(
            "{} {}",
            ui::failure(format!("Could not seed a glyph: {err}")),
            ui::dim("rituals will start from an empty glyph")
        ),
    }
    println!("{}", ui::dim("Type /help for commands."));

    let printer = spawn_dream_printer(Arc::clone(ctx.studio()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt();
        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read from stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            println!("{}", ui::dim("Unknown command. Type /help."));
            continue;
        };
        if command == Command::Quit {
            break;
        }

        let result = handle_command(&ctx, &command).await;
        if result.ephemeral {
            println!("{}", ui::dim(&result.text));
        } else {
            println!("{}", result.text);
        }
    }

    ctx.dream.stop();
    printer.abort();
    Ok(())
}
