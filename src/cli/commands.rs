use clap::{Parser, Subcommand};
use glyphcodex::service::RitualKind;
use std::path::PathBuf;
use std::str::FromStr;

/// `glyphcodex` - drive a symbolic glyph service from the terminal.
#[derive(Parser, Debug)]
#[command(name = "glyphcodex")]
#[command(version)]
#[command(about = "Evolve, mutate, reflect on and dream glyphs.", long_about = None)]
pub struct Cli {
    /// Glyph service URL (overrides config and GLYPHCODEX_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed a glyph, run rituals in order, and print the lineage
    Ritual {
        /// Rituals to run (evolve, mutate, reflect, compress)
        #[arg(required = true, value_parser = parse_ritual)]
        kinds: Vec<RitualKind>,

        /// Hold the last ritual as a ghost preview instead of committing it
        #[arg(long)]
        preview: bool,
    },

    /// Run the dream loop for a number of steps
    Dream {
        /// Completed evolve/mutate/reflect steps before stopping
        #[arg(short, long, default_value = "1")]
        ticks: u64,

        /// Write the dream log as JSON to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Interactive studio shell
    Studio,

    /// Print the effective configuration
    Config,
}

fn parse_ritual(input: &str) -> Result<RitualKind, String> {
    RitualKind::from_str(input).map_err(|_| {
        format!("unknown ritual {input:?}; expected evolve, mutate, reflect or compress")
    })
}
