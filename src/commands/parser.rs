use super::types::{Command, DreamAction};
use crate::service::RitualKind;
use crate::studio::Mode;
use std::str::FromStr;

/// Parse one shell line. Plain text, unknown commands and bad arguments
/// yield `None`.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next()?.to_lowercase();
    let args = parts.next().unwrap_or("").trim();

    if let Some(name) = cmd.strip_prefix('/')
        && let Ok(kind) = RitualKind::from_str(name)
    {
        return Some(Command::Ritual(kind));
    }

    match cmd.as_str() {
        "/mode" => {
            if args.is_empty() {
                Some(Command::Mode(None))
            } else {
                Mode::from_str(args).ok().map(|m| Command::Mode(Some(m)))
            }
        }
        "/commit" => Some(Command::Commit),
        "/cancel" => Some(Command::Cancel),
        "/restore" => args
            .parse()
            .ok()
            .map(|index| Command::Restore { index }),
        "/dream" => {
            let action = if args.is_empty() { "status" } else { args };
            DreamAction::from_str(action).ok().map(Command::Dream)
        }
        "/suggest" => match args {
            "" => Some(Command::Suggest { run: false }),
            "run" | "accept" => Some(Command::Suggest { run: true }),
            _ => None,
        },
        "/lineage" | "/history" => Some(Command::Lineage),
        "/export" => {
            if args.is_empty() {
                Some(Command::Export { index: None })
            } else {
                args.parse()
                    .ok()
                    .map(|index| Command::Export { index: Some(index) })
            }
        }
        "/help" | "/?" => Some(Command::Help),
        "/quit" | "/exit" => Some(Command::Quit),
        _ => None,
    }
}
