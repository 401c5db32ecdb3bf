//! Scraped move data: content nodes, content blocks, and the move record.
//!
//! Decoding is lenient. The scraper emits tuples as JSON arrays with a string tag
//! (`["move", "5H"]`), any key may be missing or `null`, and values that do not fit
//! the expected shape degrade to plain text or empty collections instead of failing.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One inline piece of scraped prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Text(String),
    /// Inline glossary term: visible text plus its definition.
    Tooltip { display: String, definition: String },
    /// Linked or highlighted move name.
    Move(String),
    /// Untagged value or unknown tag, kept as opaque text.
    Raw(String),
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    pub fn tooltip(display: impl Into<String>, definition: impl Into<String>) -> Self {
        ContentNode::Tooltip {
            display: display.into(),
            definition: definition.into(),
        }
    }

    pub fn move_label(label: impl Into<String>) -> Self {
        ContentNode::Move(label.into())
    }

    fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            return ContentNode::Raw(value_text(&value));
        };
        match items.first().and_then(Value::as_str) {
            Some("text") => ContentNode::Text(item_text(&items, 1)),
            Some("tooltip") => ContentNode::Tooltip {
                display: item_text(&items, 1),
                definition: item_text(&items, 2),
            },
            Some("move") => ContentNode::Move(item_text(&items, 1)),
            _ => ContentNode::Raw(
                items
                    .iter()
                    .skip(1)
                    .map(value_text)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for ContentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(ContentNode::from_value)
    }
}

/// A paragraph, or a single bullet of a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    Paragraph(Vec<ContentNode>),
    List(Vec<ContentNode>),
}

impl ContentBlock {
    pub fn nodes(&self) -> &[ContentNode] {
        match self {
            ContentBlock::Paragraph(nodes) | ContentBlock::List(nodes) => nodes,
        }
    }

    /// `["paragraph", nodes]` or `["list", nodes]`; anything else is dropped.
    fn from_value(value: Value) -> Option<Self> {
        let Value::Array(mut items) = value else {
            return None;
        };
        if items.len() < 2 {
            return None;
        }
        let nodes = node_list(items.swap_remove(1));
        match items.first().and_then(Value::as_str) {
            Some("paragraph") => Some(ContentBlock::Paragraph(nodes)),
            Some("list") => Some(ContentBlock::List(nodes)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrameChart {
    #[serde(default, deserialize_with = "opt_string")]
    pub total_frames: Option<String>,
}

/// Everything the scraper extracted for one move.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoveRecord {
    /// Startup, Active, Recovery, ... in page order.
    #[serde(default, deserialize_with = "string_map")]
    pub frame_data: IndexMap<String, String>,
    #[serde(default)]
    pub frame_chart: Option<FrameChart>,
    #[serde(default, deserialize_with = "string_map")]
    pub additional_data: IndexMap<String, String>,
    /// One node list per overview paragraph.
    #[serde(default, deserialize_with = "paragraphs")]
    pub overview: Vec<Vec<ContentNode>>,
    #[serde(default, deserialize_with = "blocks")]
    pub usage: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "opt_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub hitbox_url: Option<String>,
}

impl MoveRecord {
    /// Leading integer of a frame data field, 0 when absent or non-numeric.
    pub fn frame_value(&self, key: &str) -> i64 {
        self.frame_data
            .get(key)
            .map(|v| leading_int(v))
            .unwrap_or(0)
    }
}

/// Parse the integer at the start of `s` ("12", "+3", "7~9" -> 7, "12 [15]" -> 12).
/// Returns 0 when there is none.
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    rest[..digits_len]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn item_text(items: &[Value], index: usize) -> String {
    items.get(index).map(value_text).unwrap_or_default()
}

fn node_list(value: Value) -> Vec<ContentNode> {
    match value {
        Value::Array(items) => items.into_iter().map(ContentNode::from_value).collect(),
        Value::Null => Vec::new(),
        other => vec![ContentNode::from_value(other)],
    }
}

fn string_map<'de, D: Deserializer<'de>>(d: D) -> Result<IndexMap<String, String>, D::Error> {
    let Value::Object(map) = Value::deserialize(d)? else {
        return Ok(IndexMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let v = value_text(&v);
            (k, v)
        })
        .collect())
}

fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

fn paragraphs<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<ContentNode>>, D::Error> {
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().map(node_list).collect())
}

fn blocks<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ContentBlock>, D::Error> {
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(ContentBlock::from_value)
        .collect())
}
