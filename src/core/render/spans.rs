//! Span list used by the text cleanup passes.
//!
//! Protected spans hold move notation and frame-data terms; whitespace passes never
//! look inside them. Whitespace added by the cleanup itself is kept as `Gap` so later
//! passes can tell it apart from whitespace that came with the text.

use std::ops::Range;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Span {
    Plain(String),
    Protected(String),
    /// Whitespace inserted by a cleanup pass.
    Gap,
    /// Bullet glyph moved onto a new line: `"\n• "`.
    Bullet,
}

impl Span {
    fn flat_text(&self) -> &str {
        match self {
            Span::Plain(s) | Span::Protected(s) => s,
            Span::Gap => " ",
            Span::Bullet => "\n• ",
        }
    }

    fn first_char(&self) -> Option<char> {
        self.flat_text().chars().next()
    }

    fn last_char(&self) -> Option<char> {
        self.flat_text().chars().next_back()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Spans(Vec<Span>);

impl Spans {
    /// Split `text` into protected spans (matches of `protect`) and plain spans.
    pub(super) fn protect(text: &str, protect: &Regex) -> Self {
        let mut spans = Vec::new();
        let mut last = 0;
        for m in protect.find_iter(text) {
            if m.start() > last {
                spans.push(Span::Plain(text[last..m.start()].to_string()));
            }
            spans.push(Span::Protected(m.as_str().to_string()));
            last = m.end();
        }
        if last < text.len() {
            spans.push(Span::Plain(text[last..].to_string()));
        }
        Spans(spans)
    }

    #[cfg(test)]
    pub(super) fn as_slice(&self) -> &[Span] {
        &self.0
    }

    /// Replace every match of `re` in the concatenated text with `replacement`.
    /// A match may cross span boundaries; the replaced region becomes plain text.
    pub(super) fn replace_across(&mut self, re: &Regex, replacement: &str) {
        let mut joined = String::new();
        let mut bounds: Vec<Range<usize>> = Vec::with_capacity(self.0.len());
        for span in &self.0 {
            let start = joined.len();
            joined.push_str(span.flat_text());
            bounds.push(start..joined.len());
        }
        let matches: Vec<Range<usize>> = re.find_iter(&joined).map(|m| m.range()).collect();
        if matches.is_empty() {
            return;
        }

        let mut out = Vec::with_capacity(self.0.len() + matches.len());
        let mut pos = 0;
        for range in matches {
            self.copy_region(&joined, &bounds, pos..range.start, &mut out);
            out.push(Span::Plain(replacement.to_string()));
            pos = range.end;
        }
        self.copy_region(&joined, &bounds, pos..joined.len(), &mut out);
        self.0 = out;
        self.merge_plain();
    }

    /// Push the parts of the spans that overlap `region`, keeping their kinds.
    fn copy_region(
        &self,
        joined: &str,
        bounds: &[Range<usize>],
        region: Range<usize>,
        out: &mut Vec<Span>,
    ) {
        if region.is_empty() {
            return;
        }
        for (span, bound) in self.0.iter().zip(bounds) {
            let start = bound.start.max(region.start);
            let end = bound.end.min(region.end);
            if start >= end {
                continue;
            }
            if start == bound.start && end == bound.end {
                out.push(span.clone());
                continue;
            }
            let piece = joined[start..end].to_string();
            out.push(match span {
                Span::Protected(_) => Span::Protected(piece),
                _ => Span::Plain(piece),
            });
        }
    }

    /// Split plain spans on `glyph`, putting a bullet span in its place.
    pub(super) fn break_at(&mut self, glyph: char) {
        let mut out = Vec::with_capacity(self.0.len());
        for span in self.0.drain(..) {
            match span {
                Span::Plain(s) if s.contains(glyph) => {
                    for (i, part) in s.split(glyph).enumerate() {
                        if i > 0 {
                            out.push(Span::Bullet);
                        }
                        if !part.is_empty() {
                            out.push(Span::Plain(part.to_string()));
                        }
                    }
                }
                other => out.push(other),
            }
        }
        self.0 = out;
    }

    /// Insert gaps around matches of `re` inside plain spans.
    pub(super) fn pad(&mut self, re: &Regex, before: bool, after: bool) {
        let mut out = Vec::with_capacity(self.0.len());
        for span in self.0.drain(..) {
            let Span::Plain(s) = span else {
                out.push(span);
                continue;
            };
            let mut last = 0;
            for m in re.find_iter(&s) {
                if m.start() > last {
                    out.push(Span::Plain(s[last..m.start()].to_string()));
                }
                if before {
                    out.push(Span::Gap);
                }
                out.push(Span::Plain(m.as_str().to_string()));
                if after {
                    out.push(Span::Gap);
                }
                last = m.end();
            }
            if last < s.len() {
                out.push(Span::Plain(s[last..].to_string()));
            }
        }
        self.0 = out;
    }

    /// Fold three protected button letters separated only by commas into one span.
    pub(super) fn join_button_lists(&mut self) {
        let mut out = Vec::with_capacity(self.0.len());
        let mut i = 0;
        while i < self.0.len() {
            if let Some((joined, next)) = self.button_list_at(i) {
                out.push(Span::Protected(joined));
                i = next;
            } else {
                out.push(self.0[i].clone());
                i += 1;
            }
        }
        self.0 = out;
    }

    fn button_list_at(&self, start: usize) -> Option<(String, usize)> {
        let mut letters: Vec<&str> = Vec::with_capacity(3);
        let mut i = start;
        loop {
            letters.push(button_letter(self.0.get(i)?)?);
            i += 1;
            if letters.len() == 3 {
                return Some((letters.join(","), i));
            }
            i = self.comma_separator_end(i)?;
        }
    }

    fn comma_separator_end(&self, mut i: usize) -> Option<usize> {
        let mut sep = String::new();
        while let Some(span) = self.0.get(i) {
            match span {
                Span::Plain(s) => sep.push_str(s),
                Span::Gap => sep.push(' '),
                _ => break,
            }
            i += 1;
        }
        (sep.trim() == ",").then_some(i)
    }

    /// Drop inserted gaps that landed between two lowercase letters.
    pub(super) fn close_lowercase_gaps(&mut self) {
        let spans = std::mem::take(&mut self.0);
        let mut out: Vec<Span> = Vec::with_capacity(spans.len());
        for (i, span) in spans.iter().enumerate() {
            if *span == Span::Gap {
                let prev = out.last().and_then(Span::last_char);
                let next = spans.get(i + 1).and_then(Span::first_char);
                if prev.is_some_and(|c| c.is_ascii_lowercase())
                    && next.is_some_and(|c| c.is_ascii_lowercase())
                {
                    continue;
                }
            }
            out.push(span.clone());
        }
        self.0 = out;
        self.merge_plain();
    }

    /// Flatten to text. Protected spans get a space on each side; whitespace is
    /// not normalized here.
    pub(super) fn into_text(self) -> String {
        let mut out = String::new();
        for span in self.0 {
            match span {
                Span::Protected(s) => {
                    out.push(' ');
                    out.push_str(&s);
                    out.push(' ');
                }
                other => out.push_str(other.flat_text()),
            }
        }
        out
    }

    fn merge_plain(&mut self) {
        let mut out: Vec<Span> = Vec::with_capacity(self.0.len());
        for span in self.0.drain(..) {
            if let Span::Plain(s) = &span {
                if s.is_empty() {
                    continue;
                }
                if let Some(Span::Plain(prev)) = out.last_mut() {
                    prev.push_str(s);
                    continue;
                }
            }
            out.push(span);
        }
        self.0 = out;
    }
}

fn button_letter(span: &Span) -> Option<&str> {
    match span {
        Span::Protected(s) if matches!(s.as_str(), "L" | "M" | "H" | "U") => Some(s),
        _ => None,
    }
}
