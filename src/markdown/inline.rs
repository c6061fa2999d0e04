//! Inline span rendering
//!
//! Scans a single line left to right. At each position the first rule that
//! fully matches consumes its span; anything else is copied through.
//!
//! ```text
//! [label](url)      → <a href="url" target="_blank" rel="noopener noreferrer">label</a>
//! **x**  __x__      → <strong>x</strong>
//! *x*    _x_        → <em>x</em>
//! `x`               → <code>x</code>
//! ```
//!
//! A run of three or more identical emphasis markers is literal text. Bold
//! spans may sit inside italic ones.

use nom::{
    bytes::complete::{tag, take_till, take_till1, take_until},
    character::complete::char,
    combinator::verify,
    error::{Error, ErrorKind},
    sequence::{delimited, pair},
    IResult,
};

/// Render the inline spans of one line of text
pub fn render_inline(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 16);
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '[' => {
                if let Ok((next, (label, url))) = parse_link(rest) {
                    out.push_str("<a href=\"");
                    out.push_str(url);
                    out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                    out.push_str(&render_inline(label));
                    out.push_str("</a>");
                    rest = next;
                    continue;
                }
            }
            '*' | '_' => {
                // Markers are ASCII, so the run length is also its byte length
                let run = rest.chars().take_while(|&ch| ch == c).count();

                let parsed = match run {
                    1 => parse_italic(c, rest).ok().map(|(next, inner)| (next, "em", inner)),
                    2 => parse_bold(c, rest).ok().map(|(next, inner)| (next, "strong", inner)),
                    _ => None,
                };

                match parsed {
                    Some((next, element, inner)) => {
                        out.push('<');
                        out.push_str(element);
                        out.push('>');
                        out.push_str(&render_inline(inner));
                        out.push_str("</");
                        out.push_str(element);
                        out.push('>');
                        rest = next;
                    }
                    None => {
                        out.push_str(&rest[..run]);
                        rest = &rest[run..];
                    }
                }
                continue;
            }
            '`' => {
                if let Ok((next, code)) = parse_code(rest) {
                    out.push_str("<code>");
                    out.push_str(code);
                    out.push_str("</code>");
                    rest = next;
                    continue;
                }
            }
            _ => {}
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Parse `[label](url)`
fn parse_link(input: &str) -> IResult<&str, (&str, &str)> {
    pair(
        delimited(char('['), take_till1(|c: char| c == ']'), char(']')),
        delimited(char('('), take_till1(|c: char| c == ')'), char(')')),
    )(input)
}

/// Parse `**x**` or `__x__` with non-empty content
fn parse_bold(marker: char, input: &str) -> IResult<&str, &str> {
    let delim = if marker == '*' { "**" } else { "__" };

    delimited(
        tag(delim),
        verify(take_until(delim), |inner: &str| !inner.is_empty()),
        tag(delim),
    )(input)
}

/// Parse `*x*` or `_x_` with non-empty content
fn parse_italic(marker: char, input: &str) -> IResult<&str, &str> {
    delimited(
        char(marker),
        verify(|i| until_lone(marker, i), |inner: &str| !inner.is_empty()),
        char(marker),
    )(input)
}

/// Take everything up to the next single `marker`
///
/// Runs of two or more markers belong to bold spans and are stepped over.
fn until_lone(marker: char, input: &str) -> IResult<&str, &str> {
    let mut offset = 0;
    while let Some(found) = input[offset..].find(marker) {
        let start = offset + found;
        let run = input[start..].chars().take_while(|&c| c == marker).count();
        if run == 1 {
            return Ok((&input[start..], &input[..start]));
        }
        offset = start + run;
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

/// Parse `` `x` ``; content is kept verbatim
fn parse_code(input: &str) -> IResult<&str, &str> {
    delimited(char('`'), take_till(|c: char| c == '`'), char('`'))(input)
}
