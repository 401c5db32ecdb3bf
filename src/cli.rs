//! CLI definitions: argument parsing, subcommands, and help text.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  kimisa                                   Read chat commands from stdin
  echo '!kimi Zeta normal c.L' | kimisa    One command, reply on stdout
  kimisa render 5l.json -c Gran -m 5L      Render a saved scraper document
  kimisa normalize c l                     Show the canonical move name
  kimisa config                            Show the effective configuration
  kimisa completions bash                  Generate bash completions
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "GBVSR frame data chat bot backed by the Dustloop Wiki",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read chat lines (`user: message`) from stdin and print the bot's messages
    Console,
    /// Compose and chunk a saved scraper JSON document
    Render {
        /// Path to the scraper output (use '-' for stdin)
        path: PathBuf,
        /// Character name shown in the header
        #[arg(short, long)]
        character: String,
        /// Move name shown in the header
        #[arg(short = 'm', long = "move")]
        move_name: String,
        /// Maximum characters per message
        #[arg(long)]
        max_len: Option<usize>,
        /// Also print tooltip definitions
        #[arg(long)]
        glossary: bool,
        /// Also print frame bars for startup, active, and recovery
        #[arg(long)]
        bars: bool,
    },
    /// Print the canonical name for move shorthand
    Normalize {
        /// Shorthand such as `c l`, `2H`, or `236236U`
        #[arg(required = true, num_args = 1..)]
        token: Vec<String>,
    },
    /// Show the effective configuration
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }
}
