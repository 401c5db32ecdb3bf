//! Chat command parsing.

/// A recognised chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Move lookup. `subsection` is the raw words after the section, joined by spaces.
    Lookup {
        character: String,
        section: String,
        subsection: String,
    },
    /// Lookup with too few arguments.
    LookupUsage,
    /// Page structure listing for one character.
    Structure { character: String },
    StructureUsage,
}

/// Parse a chat message. Returns `None` when the message is not addressed to the bot.
/// `prefix` must be lowercase.
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    let mut words = content.split_whitespace();
    let head = words.next()?.to_lowercase();
    let args: Vec<&str> = words.collect();

    if head == format!("{}-debug", prefix) {
        return Some(match args.first() {
            Some(character) => Command::Structure {
                character: character.to_string(),
            },
            None => Command::StructureUsage,
        });
    }
    if head != prefix {
        return None;
    }
    if args.len() == 1 && args[0].eq_ignore_ascii_case("help") {
        return Some(Command::Help);
    }
    if args.len() < 2 {
        return Some(Command::LookupUsage);
    }
    Some(Command::Lookup {
        character: args[0].to_string(),
        section: args[1].to_string(),
        subsection: args[2..].join(" "),
    })
}

/// "zETA" -> "Zeta".
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
