//! # Kimisa - GBVSR frame data bot
//!
//! Answers `!kimi <character> <section> <move>` chat commands with frame data
//! scraped from the Dustloop Wiki. Without a chat service attached, the bot reads
//! `user: message` lines from stdin and prints its replies on stdout.

mod bot;
mod cli;
mod core;
mod run;

use std::io;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    // Print a user-friendly message; exit uses Display not Debug.
    let config = core::config::load().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    match args.command.unwrap_or(Commands::Console) {
        Commands::Console => run::run_console(config).await?,
        Commands::Render {
            path,
            character,
            move_name,
            max_len,
            glossary,
            bars,
        } => {
            let request = run::RenderRequest {
                path: &path,
                character: &character,
                move_name: &move_name,
                max_len: max_len.unwrap_or(config.max_message_len),
                glossary,
                bars,
            };
            match run::render_file(&request) {
                Ok(out) => print!("{}", out),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Normalize { token } => {
            println!("{}", core::aliases::normalize_move(&token.join(" ")));
        }
        Commands::Config => run::print_config(&config),
        Commands::Completions { shell } => {
            let mut cmd = Args::command();
            cli::generate(shell, &mut cmd, core::app::NAME, &mut io::stdout());
        }
    }

    Ok(())
}
