//! Reply composition: header, frame data, properties, and the description body.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::record::{ContentBlock, MoveRecord};
use crate::core::render::{self, Glossary, GlossaryEntry, RenderContext};

/// Counter-hit advantage is only shown when it is a plain signed integer.
static SIGNED_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("signed integer pattern"));

const COUNTER_HIT_KEY: &str = "On-Counter Hit";

/// An image to attach to the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEmbed {
    pub title: String,
    pub url: String,
}

/// Composed reply: message text plus attachments, before chunking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedReply {
    pub text: String,
    pub images: Vec<ImageEmbed>,
    pub glossary: Vec<GlossaryEntry>,
}

/// Build the full reply for one move.
pub fn compose(character: &str, subsection: &str, record: &MoveRecord) -> RenderedReply {
    let title = format!("{} - {}", character, subsection);
    let mut out = format!("**{}**\n\n", title);

    if !record.frame_data.is_empty() {
        out.push_str("**Frame Data**\n");
        for (key, value) in &record.frame_data {
            out.push_str(&format!("• {}: {}\n", key, value));
        }
        out.push('\n');
    }

    out.push_str(&format!("Total Frames: {}\n\n", total_frames(record)));

    if let Some(counter_hit) = record.additional_data.get(COUNTER_HIT_KEY)
        && SIGNED_INT.is_match(counter_hit)
    {
        out.push_str("**Properties**\n");
        out.push_str(&format!("• {}: {}\n\n", COUNTER_HIT_KEY, counter_hit));
    }

    out.push_str("**Description & Usage**\n");
    let mut glossary = Glossary::default();
    out.push_str(&compose_body(record, &mut glossary));
    out.push('\n');

    let mut images = Vec::new();
    if let Some(url) = non_empty(&record.image_url) {
        images.push(ImageEmbed {
            title: title.clone(),
            url: url.to_string(),
        });
    }
    if let Some(url) = non_empty(&record.hitbox_url) {
        images.push(ImageEmbed {
            title: format!("{} (Hitbox)", title),
            url: url.to_string(),
        });
    }

    log::debug!("composed reply for {}: {} chars", title, out.chars().count());
    RenderedReply {
        text: out,
        images,
        glossary: glossary.into_entries(),
    }
}

/// Chart total when the page has one, otherwise startup + active + recovery - 1.
pub fn total_frames(record: &MoveRecord) -> String {
    if let Some(total) = record
        .frame_chart
        .as_ref()
        .and_then(|c| non_empty(&c.total_frames))
    {
        return total.to_string();
    }
    // Saturates instead of overflowing on absurd page values.
    let sum = record
        .frame_value("Startup")
        .saturating_add(record.frame_value("Active"))
        .saturating_add(record.frame_value("Recovery"));
    sum.saturating_sub(1).to_string()
}

/// Overview paragraphs then usage blocks, one newline between consecutive blocks.
fn compose_body(record: &MoveRecord, glossary: &mut Glossary) -> String {
    let blocks = record
        .overview
        .iter()
        .map(|nodes| ContentBlock::Paragraph(nodes.clone()))
        .chain(record.usage.iter().cloned());

    let mut out = String::new();
    for (i, block) in blocks.enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let nodes = block.nodes();
        glossary.collect(nodes);
        let text = render::render(nodes, RenderContext::for_nodes(nodes));
        match block {
            ContentBlock::Paragraph(_) => out.push_str(&text),
            ContentBlock::List(_) => {
                out.push_str("• ");
                out.push_str(text.trim());
            }
        }
    }
    out
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
