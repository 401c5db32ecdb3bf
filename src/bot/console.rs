//! Console transport: chat lines in on stdin, bot messages out on stdout.

use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::{Dispatcher, Outgoing};
use crate::core::scraper::Scraper;

/// Author used for lines without a `name: ` prefix.
pub const DEFAULT_USER: &str = "console";

/// Split `"ann: !kimi help"` into author and message.
pub fn split_author(line: &str) -> (&str, &str) {
    let line = line.trim();
    if line.starts_with('!') {
        return (DEFAULT_USER, line);
    }
    match line.split_once(": ") {
        Some((user, message)) if !user.trim().is_empty() && !user.contains(' ') => {
            (user.trim(), message.trim())
        }
        _ => (DEFAULT_USER, line),
    }
}

/// Render a message the way the console shows it.
pub fn format_outgoing(message: &Outgoing) -> String {
    let mut out = String::new();
    if !message.content.is_empty() {
        out.push_str(&message.content);
        out.push('\n');
    }
    for image in &message.images {
        out.push_str(&format!("[image] {}: {}\n", image.title, image.url));
    }
    out.push_str("---\n");
    out
}

/// Read stdin until EOF, dispatching every line.
pub async fn run<S: Scraper>(dispatcher: &mut Dispatcher<S>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        let (user, content) = split_author(&line);
        let messages = dispatcher.handle(user, content, Instant::now()).await;
        write_messages(&mut stdout, &messages).await?;
    }
    Ok(())
}

async fn write_messages<W: AsyncWrite + Unpin>(
    out: &mut W,
    messages: &[Outgoing],
) -> std::io::Result<()> {
    for message in messages {
        out.write_all(format_outgoing(message).as_bytes()).await?;
    }
    out.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compose::ImageEmbed;

    #[test]
    fn split_author_variants() {
        assert_eq!(split_author("ann: !kimi help"), ("ann", "!kimi help"));
        assert_eq!(split_author("!kimi help"), ("console", "!kimi help"));
        assert_eq!(split_author("just chatting: nothing"), ("console", "just chatting: nothing"));
        assert_eq!(split_author("  bob:  !kimi x y z "), ("bob", "!kimi x y z"));
    }

    #[test]
    fn format_with_images() {
        let message = Outgoing {
            content: "**Gran - 5L**".into(),
            images: vec![ImageEmbed {
                title: "Gran - 5L".into(),
                url: "https://img/a.png".into(),
            }],
        };
        assert_eq!(
            format_outgoing(&message),
            "**Gran - 5L**\n[image] Gran - 5L: https://img/a.png\n---\n"
        );
    }

    #[tokio::test]
    async fn write_messages_flushes_all() {
        let mut buf: Vec<u8> = Vec::new();
        write_messages(&mut buf, &[Outgoing::text("one"), Outgoing::text("two")])
            .await
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "one\n---\ntwo\n---\n");
    }
}
