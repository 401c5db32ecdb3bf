//! Application run modes: logger init, console bot, offline render, small tools.

use std::io::{self, Read};
use std::path::Path;

use crate::bot::{Dispatcher, console};
use crate::cli::Args;
use crate::core;
use crate::core::config::Config;
use crate::core::scraper::ProcessScraper;

/// Initialize env_logger on stderr so stdout stays clean for bot output.
pub fn init_logger(args: &Args) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level()),
    )
    .target(env_logger::Target::Stderr)
    .try_init();
}

/// Run the bot against stdin/stdout until EOF.
pub async fn run_console(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "{} {} online (prefix {})",
        core::app::NAME,
        core::app::VERSION,
        config.prefix
    );
    let scraper = ProcessScraper::from_config(&config);
    let mut dispatcher = Dispatcher::new(scraper, config);
    console::run(&mut dispatcher).await?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum RenderFileError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid scraper document: {0}")]
    Document(#[from] core::scraper::ScrapeError),
}

pub struct RenderRequest<'a> {
    pub path: &'a Path,
    pub character: &'a str,
    pub move_name: &'a str,
    pub max_len: usize,
    pub glossary: bool,
    pub bars: bool,
}

/// Compose a saved document and return what the console would print.
pub fn render_file(req: &RenderRequest<'_>) -> Result<String, RenderFileError> {
    let read_err = |source| RenderFileError::Read {
        path: req.path.display().to_string(),
        source,
    };
    let json = if req.path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_err)?;
        buf
    } else {
        std::fs::read_to_string(req.path).map_err(read_err)?
    };
    let record = core::scraper::parse_move(&json)?;
    let reply = core::compose::compose(req.character, req.move_name, &record);

    let mut out = String::new();
    let chunks = core::chunk::chunk(&reply.text, req.max_len);
    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n---\n");
        }
        out.push_str(chunk);
    }
    out.push('\n');
    for image in &reply.images {
        out.push_str(&format!("[image] {}: {}\n", image.title, image.url));
    }
    if req.bars {
        let summary = core::bars::frame_summary(&record);
        if !summary.is_empty() {
            out.push('\n');
            out.push_str(&summary);
            out.push('\n');
        }
    }
    if req.glossary && !reply.glossary.is_empty() {
        out.push_str("\nGlossary\n");
        for entry in &reply.glossary {
            out.push_str(&format!("• {}: {}\n", entry.term, entry.definition));
        }
    }
    Ok(out)
}

/// Print effective configuration.
pub fn print_config(config: &Config) {
    println!("{} {}", core::app::NAME, core::app::VERSION);
    println!("  prefix:          {}", config.prefix);
    println!(
        "  scraper:         {} {}",
        config.scraper_program, config.scraper_script
    );
    println!(
        "  structure:       {} {}",
        config.scraper_program, config.scraper_debug_script
    );
    println!("  timeout:         {}s", config.scraper_timeout.as_secs());
    println!("  cooldown:        {}ms", config.cooldown.as_millis());
    println!("  max message len: {}", config.max_message_len);
    println!("  debug mode:      {}", config.debug_mode);
    println!("  sections:        {}", core::aliases::section_titles().join(", "));
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn request(path: &Path) -> RenderRequest<'_> {
        RenderRequest {
            path,
            character: "Gran",
            move_name: "5L",
            max_len: 1900,
            glossary: true,
            bars: true,
        }
    }

    #[test]
    fn render_file_prints_reply_images_bars_and_glossary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"frame_data": {{"Startup": "3"}},
                "usage": [["paragraph", [["tooltip", "Chip", "Damage through guard"]]]],
                "image_url": "https://img/5l.png"}}"#
        )
        .unwrap();
        let out = render_file(&request(file.path())).unwrap();
        assert!(out.starts_with("**Gran - 5L**\n\n**Frame Data**\n• Startup: 3\n"));
        assert!(out.contains("Total Frames: 2\n"));
        assert!(out.contains("[image] Gran - 5L: https://img/5l.png\n"));
        assert!(out.contains("Startup  ▮▮▮\n"));
        assert!(out.ends_with("Glossary\n• Chip: Damage through guard\n"));
    }

    #[test]
    fn render_file_missing_path() {
        let err = render_file(&request(Path::new("/nonexistent/kimisa.json"))).unwrap_err();
        assert!(matches!(err, RenderFileError::Read { .. }));
    }

    #[test]
    fn render_file_reported_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"error": "Content not found"}}"#).unwrap();
        let err = render_file(&request(file.path())).unwrap_err();
        assert_eq!(err.to_string(), "Invalid scraper document: Content not found");
    }
}
