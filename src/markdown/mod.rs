//! Markdown Renderer
//!
//! Converts the small markdown dialect used in assistant replies into HTML
//! markup. Rendering is pure: the same text always yields the same markup.
//!
//! # Dialect
//!
//! ```text
//! # / ## / ###       headings (exactly three levels)
//! * item             list items; consecutive items share one <ul>
//! [label](url)       links, opened in a new browsing context
//! **x** / __x__      strong emphasis
//! *x*   / _x_        emphasis
//! `x`                inline code
//! newline            <br> between plain lines
//! ```
//!
//! Source text is not escaped: HTML embedded in a reply passes through.
//!
//! # Example
//!
//! ```rust
//! use creator_chat::markdown::render;
//!
//! let html = render("# Hi\n* one\n* two");
//! assert_eq!(html, "<h1>Hi</h1><ul><li>one</li><li>two</li></ul>");
//! ```

mod block;
mod inline;

pub use block::{tokenize, Block};
pub use inline::render_inline;

/// Render markdown-like text into HTML markup
pub fn render(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut after_line = false;

    for block in tokenize(text) {
        match block {
            Block::Line(line) => {
                if after_line {
                    out.push_str("<br>");
                }
                out.push_str(&render_inline(line));
                after_line = true;
            }
            Block::Heading(level, content) => {
                out.push_str(&format!("<h{0}>{1}</h{0}>", level, render_inline(content)));
                after_line = false;
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    out.push_str(&render_inline(item));
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
                after_line = false;
            }
        }
    }

    out
}
