//! Fixed reply texts and the move-structure listing.

use indexmap::IndexMap;

use crate::core::app;

pub fn help(prefix: &str) -> String {
    format!(
        "**{title}**\n\
         Get frame data and move information from Dustloop Wiki\n\n\
         **Basic Usage**\n`{p} <character> <section> <move>`\n\
         **Sections**\n`normal`, `dash`, `air`, `unique`, `skill`\n\
         **Examples**\n`{p} Zeta normal c.L`\n`{p} Gran dash 66H`\n`{p} Charlotta air j.M`\n\
         **Debug**\n`{p}-debug <character>` - Shows all available moves for a character\n\n\
         *Data sourced from Dustloop Wiki*",
        title = app::TITLE,
        p = prefix
    )
}

pub fn lookup_usage(prefix: &str) -> String {
    format!(
        "Usage: {p} <character> <section> <subsection>\n\
         Example: {p} Zeta normal c.L\n\
         Use {p} help for more information.",
        p = prefix
    )
}

pub fn structure_usage(prefix: &str) -> String {
    format!("Usage: {}-debug <character>", prefix)
}

pub fn cooldown(remaining_secs: f64) -> String {
    format!(
        "Please wait {:.1} seconds before using this command again.",
        remaining_secs
    )
}

/// `**<Character>'s Move Structure**`, then each section with its moves.
pub fn structure(character: &str, sections: &IndexMap<String, Vec<String>>) -> String {
    let mut out = format!("**{}'s Move Structure**\n\n", character);
    for (section, moves) in sections {
        out.push_str(&format!("**{}**\n", section));
        if moves.is_empty() {
            out.push_str("• No moves found\n");
        }
        for name in moves {
            out.push_str(&format!("• {}\n", name));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_uses_prefix() {
        let text = help("!fd");
        assert!(text.starts_with("**Kimisa Bot - GBVSR Frame Data**\n"));
        assert!(text.contains("`!fd Gran dash 66H`"));
        assert!(text.contains("`!fd-debug <character>`"));
    }

    #[test]
    fn cooldown_has_one_decimal() {
        assert_eq!(
            cooldown(2.34),
            "Please wait 2.3 seconds before using this command again."
        );
    }

    #[test]
    fn structure_listing() {
        let mut sections = IndexMap::new();
        sections.insert("Normal Moves".to_string(), vec!["c.L".to_string(), "5H".to_string()]);
        sections.insert("Skills".to_string(), vec![]);
        assert_eq!(
            structure("Narmaya", &sections),
            "**Narmaya's Move Structure**\n\n**Normal Moves**\n• c.L\n• 5H\n\n**Skills**\n• No moves found\n\n"
        );
    }
}
