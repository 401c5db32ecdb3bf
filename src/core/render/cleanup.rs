//! Cleanup of scraped prose: the ordered rewrite pipeline for text nodes.
//!
//! The passes run in a fixed order and several depend on the earlier ones
//! (the button-list fold expects protected letters and padded commas, the
//! lowercase-gap pass expects the padding passes to have run).

use std::sync::LazyLock;

use regex::Regex;

use super::spans::Spans;

/// Move notation and frame-data terms that must come out as separate words.
static NOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\d[LMHU]|[jc]\.[LMHU]|\b[LMHU]\b|\b(?:Guard|Startup|Recovery|Advantage|Mid|High|Low)\b",
    )
    .expect("notation pattern")
});

/// Words the wiki markup tends to split, with their repaired form.
static WORD_SPLITS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bfor\s+ced\b", "forced"),
        (r"\bperfor\s+med\b", "performed"),
        (r"\bU\s+niversal\b", "Universal"),
        (r"\bU\s+ses\b", "Uses"),
    ]
    .into_iter()
    .map(|(pattern, fixed)| (Regex::new(pattern).expect("word split pattern"), fixed))
    .collect()
});

static INFO_ICON: LazyLock<Regex> = LazyLock::new(|| Regex::new("ⓘ").expect("info icon"));
static SPACED_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pressing|activates").expect("spaced words"));
static OR_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bor\b").expect("or"));
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.]").expect("punctuation"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace"));
static AFTER_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(Guard|Startup|Recovery|Advantage)\s+([A-Z])").expect("after term")
});
static BEFORE_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z])\s+(Mid|High|Low)\b").expect("before height"));

const BULLET: char = '•';

/// Run the full pipeline over one text node (style artifacts already stripped).
pub(super) fn clean_text(text: &str) -> String {
    let mut spans = Spans::protect(text, &NOTATION);

    for (re, fixed) in WORD_SPLITS.iter() {
        spans.replace_across(re, fixed);
    }

    spans.break_at(BULLET);
    spans.pad(&INFO_ICON, false, true);

    spans.pad(&SPACED_AFTER, false, true);
    spans.pad(&OR_WORD, true, true);
    spans.pad(&PUNCTUATION, false, true);

    spans.join_button_lists();
    spans.close_lowercase_gaps();

    // Bullet line breaks are whitespace too and collapse with the rest.
    let text = spans.into_text();
    tighten(WHITESPACE.replace_all(&text, " ").trim())
}

/// Exactly one space after Guard/Startup/Recovery/Advantage and before Mid/High/Low.
fn tighten(line: &str) -> String {
    let line = AFTER_TERM.replace_all(line, "$1 $2");
    BEFORE_HEIGHT.replace_all(&line, "$1 $2").into_owned()
}
