//! Splitting long replies into chat-sized messages on line boundaries.

/// Default per-message budget, below the platform's hard 2000-character cap.
pub const DEFAULT_MAX_LEN: usize = 1900;

/// Split `text` into chunks of at most `max_len` characters, never inside a line.
/// A single line longer than `max_len` becomes its own oversized chunk.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.trim().to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for line in text.split('\n') {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_len {
            push_trimmed(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }
    push_trimmed(&mut chunks, &current);
    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
