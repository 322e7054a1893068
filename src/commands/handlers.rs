use super::context::StudioContext;
use super::types::{Command, CommandResult, DreamAction};
use crate::dream::{DreamStatus, export_log};
use crate::lineage::{LineageEntry, export_entry, export_history};
use crate::service::RitualKind;
use crate::studio::{Mode, RitualOutcome};
use crate::ui::style as ui;
use std::fmt::Write as _;

pub async fn handle_command(ctx: &StudioContext, command: &Command) -> CommandResult {
    match command {
        Command::Ritual(kind) => handle_ritual(ctx, *kind).await,
        Command::Mode(mode) => handle_mode(ctx, *mode),
        Command::Commit => handle_commit(ctx),
        Command::Cancel => handle_cancel(ctx),
        Command::Restore { index } => handle_restore(ctx, *index),
        Command::Dream(action) => handle_dream(ctx, *action).await,
        Command::Suggest { run } => handle_suggest(ctx, *run).await,
        Command::Lineage => CommandResult::visible(render_lineage(&ctx.studio().lineage())),
        Command::Export { index } => handle_export(ctx, *index),
        Command::Help => handle_help(),
        Command::Quit => CommandResult::ephemeral("Bye."),
    }
}

/// One lineage row: index, tag, time, and insight when present.
pub fn render_entry(index: usize, entry: &LineageEntry) -> String {
    let mut line = format!(
        "{} {} {}",
        ui::accent(format!("#{index:<3}")),
        ui::tag(entry.ritual),
        ui::dim(entry.timestamp.format("%H:%M:%S")),
    );
    if let Some(text) = &entry.insight {
        let _ = write!(line, "  {}", ui::insight(text));
    }
    if entry.compressed.is_some() {
        let _ = write!(line, "  {}", ui::dim("(compressed)"));
    }
    line
}

pub fn render_lineage(entries: &[LineageEntry]) -> String {
    if entries.is_empty() {
        return ui::dim("Lineage is empty.");
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| render_entry(i, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_dream_status(status: &DreamStatus) -> String {
    let mut line = format!(
        "dream {}: {} step(s), {} log entr{}",
        ui::header(status.state),
        status.step_count,
        status.log_len,
        if status.log_len == 1 { "y" } else { "ies" }
    );
    if let Some(id) = &status.session_id {
        let _ = write!(line, " {}", ui::dim(format!("[{id}]")));
    }
    line
}

async fn handle_ritual(ctx: &StudioContext, kind: RitualKind) -> CommandResult {
    match ctx.orchestrator.run_ritual(kind).await {
        Ok(RitualOutcome::Committed { index }) => {
            let mut text = match ctx.studio().entry(index) {
                Ok(entry) => render_entry(index, &entry),
                Err(_) => ui::success(format!("{kind} committed as #{index}")),
            };
            for suggestion in ctx.studio().suggestions() {
                let _ = write!(
                    text,
                    "\n{} {}",
                    ui::ghost(&suggestion.title),
                    ui::dim(&suggestion.message)
                );
            }
            CommandResult::visible(text)
        }
        Ok(RitualOutcome::Previewed) => CommandResult::visible(format!(
            "{} {}",
            ui::ghost(format!("ghost {kind} ready.")),
            ui::dim("/commit to keep it, /cancel to discard")
        )),
        Err(err) => CommandResult::visible(ui::failure(format!("{kind} failed: {err}"))),
    }
}

fn handle_mode(ctx: &StudioContext, mode: Option<Mode>) -> CommandResult {
    match mode {
        Some(mode) => {
            ctx.orchestrator.set_mode(mode);
            CommandResult::ephemeral(format!("Mode set to {mode}."))
        }
        None => CommandResult::ephemeral(format!("Mode: {}", ctx.orchestrator.mode())),
    }
}

fn handle_commit(ctx: &StudioContext) -> CommandResult {
    match ctx.orchestrator.commit() {
        Some(index) => CommandResult::visible(ui::success(format!("Ghost committed as #{index}."))),
        None => CommandResult::ephemeral("No ghost preview to commit."),
    }
}

fn handle_cancel(ctx: &StudioContext) -> CommandResult {
    if ctx.orchestrator.cancel() {
        CommandResult::visible("Ghost preview discarded.")
    } else {
        CommandResult::ephemeral("No ghost preview to cancel.")
    }
}

fn handle_restore(ctx: &StudioContext, index: usize) -> CommandResult {
    match ctx.orchestrator.restore(index) {
        Ok(new_index) => CommandResult::visible(ui::success(format!(
            "Restored #{index} as #{new_index}."
        ))),
        Err(err) => CommandResult::visible(ui::failure(err)),
    }
}

async fn handle_dream(ctx: &StudioContext, action: DreamAction) -> CommandResult {
    match action {
        DreamAction::Start => match ctx.dream.start().await {
            Ok(()) => CommandResult::visible(format!(
                "Dreaming every {}s. {}",
                ctx.dream.interval().as_secs(),
                render_dream_status(&ctx.dream.status())
            )),
            Err(err) => CommandResult::visible(ui::failure(format!("dream stopped: {err}"))),
        },
        DreamAction::Stop => {
            ctx.dream.stop();
            CommandResult::visible(render_dream_status(&ctx.dream.status()))
        }
        DreamAction::Pause => {
            ctx.dream.pause();
            CommandResult::ephemeral(render_dream_status(&ctx.dream.status()))
        }
        DreamAction::Resume => {
            ctx.dream.resume();
            CommandResult::ephemeral(render_dream_status(&ctx.dream.status()))
        }
        DreamAction::Status => CommandResult::ephemeral(render_dream_status(&ctx.dream.status())),
    }
}

async fn handle_suggest(ctx: &StudioContext, run: bool) -> CommandResult {
    let suggestions = ctx.studio().suggestions();
    let Some(first) = suggestions.first() else {
        return CommandResult::ephemeral("No suggestions right now.");
    };
    if run {
        return handle_ritual(ctx, first.ritual).await;
    }
    let text = suggestions
        .iter()
        .map(|s| {
            format!(
                "{} {} {}",
                ui::ghost(&s.title),
                ui::dim(&s.message),
                ui::dim(format!("(/suggest run to {})", s.ritual))
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    CommandResult::visible(text)
}

fn handle_export(ctx: &StudioContext, index: Option<usize>) -> CommandResult {
    let dir = &ctx.export_dir;
    let studio = ctx.studio();

    if let Some(index) = index {
        return match studio.with_state(|s| export_entry(&s.lineage, index, dir)) {
            Ok((svg, json)) => CommandResult::visible(format!(
                "Wrote {} and {}",
                svg.display(),
                json.display()
            )),
            Err(err) => CommandResult::visible(ui::failure(err)),
        };
    }

    let history = studio.with_state(|s| export_history(&s.lineage, dir));
    let log = export_log(&ctx.dream.log(), dir);
    match (history, log) {
        (Ok(history), Ok(log)) => CommandResult::visible(format!(
            "Wrote {} and {}",
            history.display(),
            log.display()
        )),
        (Err(err), _) | (_, Err(err)) => CommandResult::visible(ui::failure(err)),
    }
}

fn handle_help() -> CommandResult {
    let mut text = String::new();
    for kind in RitualKind::ALL {
        let _ = writeln!(text, "/{kind:<17} -- {}", kind.describe());
    }
    text.push_str(
        "/mode [live|test]  -- Show or switch how results are applied\n\
         /commit            -- Keep the ghost preview\n\
         /cancel            -- Discard the ghost preview\n\
         /restore N         -- Make lineage entry N current again\n\
         /lineage           -- List the lineage\n\
         /dream [start|stop|pause|resume|status] -- Control the dream loop\n\
         /suggest [run]     -- Show or run the suggested next ritual\n\
         /export [N]        -- Export history and dream log, or entry N\n\
         /help              -- Show this help message\n\
         /quit              -- Leave the studio",
    );
    CommandResult::visible(text)
}
