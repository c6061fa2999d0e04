//! Line-level tokenizer
//!
//! Splits text into headings, list blocks and plain lines. Consecutive
//! `* ` lines are grouped into a single list block; any other line ends
//! the run.

/// A block-level unit of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// `#`, `##` or `###` heading with its level and content
    Heading(u8, &'a str),
    /// Contiguous run of `* ` items
    List(Vec<&'a str>),
    /// Any other line, rendered inline
    Line(&'a str),
}

/// Split `text` into blocks
pub fn tokenize(text: &str) -> Vec<Block<'_>> {
    let mut blocks: Vec<Block<'_>> = Vec::new();

    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some((level, content)) = heading(line) {
            blocks.push(Block::Heading(level, content));
        } else if let Some(item) = non_empty_suffix(line, "* ") {
            match blocks.last_mut() {
                Some(Block::List(items)) => items.push(item),
                _ => blocks.push(Block::List(vec![item])),
            }
        } else {
            blocks.push(Block::Line(line));
        }
    }

    blocks
}

/// Match heading prefixes from most to least specific
fn heading(line: &str) -> Option<(u8, &str)> {
    [(3u8, "### "), (2, "## "), (1, "# ")]
        .into_iter()
        .find_map(|(level, prefix)| non_empty_suffix(line, prefix).map(|content| (level, content)))
}

fn non_empty_suffix<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}
