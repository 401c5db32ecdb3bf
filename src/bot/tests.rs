use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::{Dispatcher, Outgoing};
use crate::core::config::Config;
use crate::core::scraper::{ScrapeError, ScrapeOutput, Scraper};

/// Canned scraper that records the arguments it was called with.
#[derive(Default)]
struct FakeScraper {
    stdout: String,
    stderr: String,
    fail: bool,
    calls: Mutex<Vec<Vec<String>>>,
}

impl FakeScraper {
    fn returning(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            ..Default::default()
        }
    }

    fn respond(&self, args: &[&str]) -> Result<ScrapeOutput, ScrapeError> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|s| s.to_string()).collect());
        if self.fail {
            return Err(ScrapeError::Spawn(std::io::Error::other("no python")));
        }
        Ok(ScrapeOutput {
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        })
    }
}

impl Scraper for FakeScraper {
    async fn scrape_move(
        &self,
        character: &str,
        section: &str,
        subsection: &str,
    ) -> Result<ScrapeOutput, ScrapeError> {
        self.respond(&[character, section, subsection])
    }

    async fn scrape_structure(&self, character: &str) -> Result<ScrapeOutput, ScrapeError> {
        self.respond(&[character])
    }
}

const MOVE_JSON: &str = r#"{
    "frame_data": {"Startup": "7", "Active": "3", "Recovery": "15"},
    "additional_data": {"On-Counter Hit": "+2"},
    "overview": [[["text", "Test move."]]],
    "usage": [["list", [["text", "safe option"]]]],
    "image_url": "https://img/5l.png",
    "hitbox_url": "https://img/5l_hitbox.png"
}"#;

fn dispatcher(scraper: FakeScraper) -> Dispatcher<FakeScraper> {
    Dispatcher::new(scraper, Config::default())
}

fn contents(messages: &[Outgoing]) -> Vec<&str> {
    messages.iter().map(|m| m.content.as_str()).collect()
}

#[tokio::test]
async fn lookup_normalizes_arguments() {
    let mut d = dispatcher(FakeScraper::returning(MOVE_JSON));
    d.handle("ann", "!kimi vikala skill 236 h", Instant::now()).await;
    let calls = d.scraper.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![vec!["Vikala", "Skills", "Dream Attraction"]]);
}

#[tokio::test]
async fn lookup_replies_with_composed_text_and_images() {
    let mut d = dispatcher(FakeScraper::returning(MOVE_JSON));
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert_eq!(messages.len(), 1);
    let reply = &messages[0];
    assert!(reply.content.starts_with("**Gran - 5L**\n\n**Frame Data**\n• Startup: 7"));
    assert!(reply.content.contains("Total Frames: 24"));
    assert!(reply.content.contains("• On-Counter Hit: +2"));
    assert!(reply.content.ends_with("Description & Usage**\nTest move.\n• safe option"));
    let titles: Vec<&str> = reply.images.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Gran - 5L", "Gran - 5L (Hitbox)"]);
}

#[tokio::test]
async fn long_replies_are_chunked_with_images_last() {
    let long_usage: Vec<String> = (0..60)
        .map(|i| format!(r#"["list", [["text", "Point number {i} about spacing and pressure"]]]"#))
        .collect();
    let json = format!(
        r#"{{"usage": [{}], "image_url": "https://img/a.png"}}"#,
        long_usage.join(",")
    );
    let mut d = Dispatcher::new(
        FakeScraper::returning(&json),
        Config {
            max_message_len: 500,
            ..Config::default()
        },
    );
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert!(messages.len() > 1);
    for m in &messages {
        assert!(m.content.chars().count() <= 500);
    }
    assert!(messages[..messages.len() - 1].iter().all(|m| m.images.is_empty()));
    assert_eq!(messages.last().unwrap().images.len(), 1);
}

#[tokio::test]
async fn reported_error_is_relayed() {
    let mut d = dispatcher(FakeScraper::returning(
        r#"{"error": "Move 'xyz' not found in section 'Normal Moves' for Gran"}"#,
    ));
    let messages = d.handle("ann", "!kimi gran normal xyz", Instant::now()).await;
    assert_eq!(
        contents(&messages),
        vec!["Error: Move 'xyz' not found in section 'Normal Moves' for Gran"]
    );
    let calls = d.scraper.calls.lock().unwrap().clone();
    assert_eq!(calls[0][2], "xyz");
}

#[tokio::test]
async fn unparseable_output_is_reported() {
    let mut d = dispatcher(FakeScraper::returning("not json"));
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0]
            .content
            .starts_with("An error occurred while processing the result. Error: ")
    );
}

#[tokio::test]
async fn spawn_failure_is_reported() {
    let mut d = dispatcher(FakeScraper {
        fail: true,
        ..Default::default()
    });
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert_eq!(
        contents(&messages),
        vec!["An error occurred: failed to start scraper: no python"]
    );
}

#[tokio::test]
async fn cooldown_blocks_second_lookup() {
    let mut d = dispatcher(FakeScraper::returning(MOVE_JSON));
    let t0 = Instant::now();
    d.handle("ann", "!kimi gran normal 5l", t0).await;
    let blocked = d
        .handle("ann", "!kimi gran normal 5m", t0 + Duration::from_millis(500))
        .await;
    assert_eq!(
        contents(&blocked),
        vec!["Please wait 2.5 seconds before using this command again."]
    );

    let other_user = d
        .handle("bob", "!kimi gran normal 5m", t0 + Duration::from_millis(500))
        .await;
    assert!(other_user[0].content.starts_with("**Gran - 5M**"));

    let later = d
        .handle("ann", "!kimi gran normal 5m", t0 + Duration::from_secs(3))
        .await;
    assert!(later[0].content.starts_with("**Gran - 5M**"));
    assert_eq!(d.scraper.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn usage_does_not_start_cooldown() {
    let mut d = dispatcher(FakeScraper::returning(MOVE_JSON));
    let t0 = Instant::now();
    let usage = d.handle("ann", "!kimi gran", t0).await;
    assert!(usage[0].content.starts_with("Usage: !kimi <character> <section> <subsection>"));
    let reply = d.handle("ann", "!kimi gran normal 5l", t0).await;
    assert!(reply[0].content.starts_with("**Gran - 5L**"));
}

#[tokio::test]
async fn help_and_non_commands() {
    let mut d = dispatcher(FakeScraper::default());
    let help = d.handle("ann", "!kimi help", Instant::now()).await;
    assert!(help[0].content.contains("Basic Usage"));
    assert!(d.handle("ann", "good game", Instant::now()).await.is_empty());
    assert!(d.scraper.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn debug_mode_relays_stderr_first() {
    let scraper = FakeScraper {
        stdout: MOVE_JSON.to_string(),
        stderr: "DEBUG:__main__:Fetching URL".to_string(),
        ..Default::default()
    };
    let mut d = Dispatcher::new(
        scraper,
        Config {
            debug_mode: true,
            ..Config::default()
        },
    );
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0].content,
        "Debug information:\n```DEBUG:__main__:Fetching URL```"
    );
}

#[tokio::test]
async fn stderr_hidden_without_debug_mode() {
    let scraper = FakeScraper {
        stdout: MOVE_JSON.to_string(),
        stderr: "noise".to_string(),
        ..Default::default()
    };
    let mut d = dispatcher(scraper);
    let messages = d.handle("ann", "!kimi gran normal 5l", Instant::now()).await;
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn structure_listing() {
    let mut d = dispatcher(FakeScraper::returning(
        r#"{"Normal Moves": ["c.L", "5H"], "Skills": []}"#,
    ));
    let messages = d.handle("ann", "!kimi-debug NARMAYA", Instant::now()).await;
    assert_eq!(
        contents(&messages),
        vec!["**Narmaya's Move Structure**\n\n**Normal Moves**\n• c.L\n• 5H\n\n**Skills**\n• No moves found"]
    );
    let usage = d.handle("ann", "!kimi-debug", Instant::now()).await;
    assert_eq!(contents(&usage), vec!["Usage: !kimi-debug <character>"]);
}
