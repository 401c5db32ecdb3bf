//! Inline content rendering: turns a scraped node list into one chat-ready string.

mod cleanup;
mod spans;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::record::ContentNode;

/// Wiki style-sheet fragments that leak into scraped text.
static STYLE_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.mw-parser-output[^}]+\}").expect("style artifact pattern"));

/// Text that marks a node list as a follow-up list.
const LINKS_MARKER: &str = "Links into";

/// Per node-list rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Follow-up lists show move names without bold.
    pub is_links_list: bool,
}

impl RenderContext {
    pub fn for_nodes(nodes: &[ContentNode]) -> Self {
        let is_links_list = nodes
            .iter()
            .any(|node| matches!(node, ContentNode::Text(value) if value.contains(LINKS_MARKER)));
        Self { is_links_list }
    }
}

/// A tooltip term and its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Tooltip definitions met while rendering, first occurrence of each term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary(Vec<GlossaryEntry>);

impl Glossary {
    pub fn add(&mut self, term: &str, definition: &str) {
        let definition = definition.trim();
        if definition.is_empty() || self.0.iter().any(|e| e.term == term) {
            return;
        }
        self.0.push(GlossaryEntry {
            term: term.to_string(),
            definition: definition.to_string(),
        });
    }

    /// Record every tooltip in `nodes`.
    pub fn collect(&mut self, nodes: &[ContentNode]) {
        for node in nodes {
            if let ContentNode::Tooltip {
                display,
                definition,
            } = node
            {
                self.add(&strip_style_artifacts(display), definition);
            }
        }
    }

    pub fn into_entries(self) -> Vec<GlossaryEntry> {
        self.0
    }
}

/// Remove leaked style-sheet blocks.
pub fn strip_style_artifacts(s: &str) -> Cow<'_, str> {
    STYLE_ARTIFACT.replace_all(s, "")
}

/// Render `nodes` in order into one string.
pub fn render(nodes: &[ContentNode], ctx: RenderContext) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            ContentNode::Text(value) => {
                out.push_str(&cleanup::clean_text(&strip_style_artifacts(value)));
            }
            ContentNode::Tooltip { display, .. } => out.push_str(&strip_style_artifacts(display)),
            ContentNode::Move(label) => {
                let label = strip_style_artifacts(label);
                if ctx.is_links_list {
                    out.push_str(&label);
                } else {
                    out.push_str("**");
                    out.push_str(&label);
                    out.push_str("**");
                }
            }
            ContentNode::Raw(value) => out.push_str(&strip_style_artifacts(value)),
        }
    }
    out
}
