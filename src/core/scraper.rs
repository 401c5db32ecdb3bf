//! External scraper process: invocation and output decoding.
//!
//! The scraper prints one JSON document on stdout, either the move data or
//! `{"error": "..."}`, and diagnostics on stderr.

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use indexmap::IndexMap;
use serde_json::Value;
use tokio::process::Command;

use crate::core::config::Config;
use crate::core::record::MoveRecord;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to start scraper: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("scraper exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("scraper did not finish within {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// The scraper ran and reported a problem (unknown character, missing move, ...).
    #[error("{0}")]
    Reported(String),
}

/// Raw process output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Source of scraped documents.
pub trait Scraper {
    /// Data for one move: `(character, section title, move name)`.
    fn scrape_move(
        &self,
        character: &str,
        section: &str,
        subsection: &str,
    ) -> impl Future<Output = Result<ScrapeOutput, ScrapeError>> + Send;

    /// Section -> move names for a character page.
    fn scrape_structure(
        &self,
        character: &str,
    ) -> impl Future<Output = Result<ScrapeOutput, ScrapeError>> + Send;
}

/// Runs the scraper scripts as child processes.
#[derive(Debug, Clone)]
pub struct ProcessScraper {
    program: String,
    script: String,
    debug_script: String,
    timeout: Duration,
}

impl ProcessScraper {
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.scraper_program.clone(),
            script: config.scraper_script.clone(),
            debug_script: config.scraper_debug_script.clone(),
            timeout: config.scraper_timeout,
        }
    }

    async fn run(&self, script: &str, args: &[&str]) -> Result<ScrapeOutput, ScrapeError> {
        log::debug!("running {} {} {:?}", self.program, script, args);
        let mut command = Command::new(&self.program);
        command
            .arg(script)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| ScrapeError::Timeout(self.timeout))?
            .map_err(ScrapeError::Spawn)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            log::error!("scraper failed ({}): {}", output.status, stderr.trim());
            return Err(ScrapeError::Exit {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.is_empty() {
            log::debug!("scraper stderr:\n{}", stderr);
        }
        Ok(ScrapeOutput { stdout, stderr })
    }
}

impl Scraper for ProcessScraper {
    async fn scrape_move(
        &self,
        character: &str,
        section: &str,
        subsection: &str,
    ) -> Result<ScrapeOutput, ScrapeError> {
        self.run(&self.script, &[character, section, subsection])
            .await
    }

    async fn scrape_structure(&self, character: &str) -> Result<ScrapeOutput, ScrapeError> {
        self.run(&self.debug_script, &[character]).await
    }
}

fn reported_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null => None,
        Value::String(msg) => Some(msg.clone()),
        other => Some(other.to_string()),
    }
}

/// Decode a move document.
pub fn parse_move(stdout: &str) -> Result<MoveRecord, ScrapeError> {
    let value: Value = serde_json::from_str(stdout.trim())?;
    if let Some(msg) = reported_error(&value) {
        return Err(ScrapeError::Reported(msg));
    }
    Ok(serde_json::from_value(value)?)
}

/// Decode a page-structure document (section title -> move names, page order).
pub fn parse_structure(stdout: &str) -> Result<IndexMap<String, Vec<String>>, ScrapeError> {
    let value: Value = serde_json::from_str(stdout.trim())?;
    if let Some(msg) = reported_error(&value) {
        return Err(ScrapeError::Reported(msg));
    }
    Ok(serde_json::from_value(value)?)
}
