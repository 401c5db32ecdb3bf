//! Chat command handling: parses commands, applies cooldowns, runs the scraper,
//! and turns the result into chat messages.

mod command;
pub mod console;
mod cooldown;
mod replies;

use std::time::Instant;

use crate::core::aliases;
use crate::core::chunk::chunk;
use crate::core::compose::{ImageEmbed, compose};
use crate::core::config::Config;
use crate::core::scraper::{self, ScrapeError, Scraper};

pub use command::{Command, capitalize, parse};
pub use cooldown::Cooldowns;

/// One chat message to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outgoing {
    pub content: String,
    pub images: Vec<ImageEmbed>,
}

impl Outgoing {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            images: Vec::new(),
        }
    }
}

pub struct Dispatcher<S> {
    scraper: S,
    config: Config,
    cooldowns: Cooldowns,
}

impl<S: Scraper> Dispatcher<S> {
    pub fn new(scraper: S, config: Config) -> Self {
        let cooldowns = Cooldowns::new(config.cooldown);
        Self {
            scraper,
            config,
            cooldowns,
        }
    }

    /// Handle one incoming message from `user`. Returns the messages to send, in order;
    /// empty when the message is not a command.
    pub async fn handle(&mut self, user: &str, content: &str, now: Instant) -> Vec<Outgoing> {
        let Some(command) = parse(content, &self.config.prefix) else {
            return Vec::new();
        };
        let prefix = self.config.prefix.as_str();
        match command {
            Command::Help => vec![Outgoing::text(replies::help(prefix))],
            Command::StructureUsage => vec![Outgoing::text(replies::structure_usage(prefix))],
            Command::Structure { character } => self.structure(&capitalize(&character)).await,
            Command::LookupUsage | Command::Lookup { .. } => {
                if let Some(left) = self.cooldowns.remaining(user, now) {
                    return vec![Outgoing::text(replies::cooldown(left.as_secs_f64()))];
                }
                let Command::Lookup {
                    character,
                    section,
                    subsection,
                } = command
                else {
                    return vec![Outgoing::text(replies::lookup_usage(prefix))];
                };
                self.cooldowns.start(user, now);
                self.lookup(
                    &capitalize(&character),
                    &aliases::normalize_section(&section),
                    &aliases::normalize_move(&subsection),
                )
                .await
            }
        }
    }

    async fn lookup(&self, character: &str, section: &str, subsection: &str) -> Vec<Outgoing> {
        log::info!(
            "Received command: {} {} {} {}",
            self.config.prefix,
            character,
            section,
            subsection
        );
        log::info!("Searching for {}'s {} move data...", character, subsection);

        let output = match self
            .scraper
            .scrape_move(character, section, subsection)
            .await
        {
            Ok(output) => output,
            Err(e) => {
                log::error!("scraper error: {}", e);
                return vec![Outgoing::text(format!("An error occurred: {}", e))];
            }
        };

        let mut messages = self.debug_messages(&output.stderr);
        match scraper::parse_move(&output.stdout) {
            Ok(record) => {
                let reply = compose(character, subsection, &record);
                log::debug!("Final formatted output:\n{}", reply.text);
                messages.extend(self.deliver(&reply.text, reply.images));
            }
            Err(ScrapeError::Reported(msg)) => {
                messages.push(Outgoing::text(format!("Error: {}", msg)));
            }
            Err(e) => {
                log::error!("Error parsing scraper output: {}", e);
                log::error!("Problematic stdout: {}", output.stdout);
                messages.push(Outgoing::text(format!(
                    "An error occurred while processing the result. Error: {}",
                    e
                )));
            }
        }
        messages
    }

    async fn structure(&self, character: &str) -> Vec<Outgoing> {
        log::info!("Analyzing {}'s page structure...", character);
        let output = match self.scraper.scrape_structure(character).await {
            Ok(output) => output,
            Err(e) => {
                log::error!("structure scraper error: {}", e);
                return vec![Outgoing::text(format!("Error analyzing page: {}", e))];
            }
        };
        match scraper::parse_structure(&output.stdout) {
            Ok(sections) => self.deliver(&replies::structure(character, &sections), Vec::new()),
            Err(ScrapeError::Reported(msg)) => vec![Outgoing::text(format!("Error: {}", msg))],
            Err(e) => vec![Outgoing::text(format!("Error processing results: {}", e))],
        }
    }

    /// Scraper diagnostics relayed into chat when debug mode is on.
    fn debug_messages(&self, stderr: &str) -> Vec<Outgoing> {
        if !self.config.debug_mode || stderr.trim().is_empty() {
            return Vec::new();
        }
        chunk(stderr, self.config.max_message_len)
            .into_iter()
            .map(|c| Outgoing::text(format!("Debug information:\n```{}```", c)))
            .collect()
    }

    /// Chunk `text`; images ride on the last chunk, or alone when there is no text.
    fn deliver(&self, text: &str, images: Vec<ImageEmbed>) -> Vec<Outgoing> {
        let mut messages: Vec<Outgoing> = chunk(text, self.config.max_message_len)
            .into_iter()
            .filter(|c| !c.is_empty())
            .map(Outgoing::text)
            .collect();
        if images.is_empty() {
            return messages;
        }
        match messages.last_mut() {
            Some(last) => last.images = images,
            None => messages.push(Outgoing {
                content: String::new(),
                images,
            }),
        }
        messages
    }
}

#[cfg(test)]
mod tests;
