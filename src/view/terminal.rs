//! Line-oriented terminal surface
//!
//! Prints page banners, the creator grid, suggestions and new chat turns as
//! plain text. Markup is flattened with a couple of regexes; values typed by
//! the user are fed in with [`TerminalSurface::set_value`].

use regex::Regex;
use std::collections::HashMap;
use std::io::{self, Stdout, Write};

use super::surface::{Action, Child, Fragment, Node, RenderSurface};

/// Renders the controller's output to a writer, stdout by default
pub struct TerminalSurface<W: Write = Stdout> {
    out: W,
    block_break: Regex,
    tag: Regex,
    page: Option<Node>,
    text: HashMap<Node, String>,
    values: HashMap<Node, String>,
    suggestions: Vec<Fragment>,
    printed_messages: usize,
}

impl TerminalSurface<Stdout> {
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn with_writer(out: W) -> Result<Self, regex::Error> {
        Ok(Self {
            out,
            block_break: Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|ul)>")?,
            tag: Regex::new(r"<[^>]*>")?,
            page: None,
            text: HashMap::new(),
            values: HashMap::new(),
            suggestions: Vec::new(),
            printed_messages: 0,
        })
    }

    /// Record what the user typed into an input region
    pub fn set_value(&mut self, node: Node, value: impl Into<String>) {
        self.values.insert(node, value.into());
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Flatten markup into text lines
    fn plain_lines(&self, html: &str) -> Vec<String> {
        let html = html.replace("<li>", "<li>* ").replace("</button>", "</button>: ");
        let broken = self.block_break.replace_all(&html, "\n");
        let stripped = self.tag.replace_all(&broken, "");

        stripped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// One line per fragment, prefixed with its selection key when it has one
    fn fragment_line(&self, fragment: &Fragment) -> String {
        let body = self.plain_lines(&fragment.html).join("  ");
        match fragment.action {
            Some(Action::SelectCreator(id)) => format!("  [{}] {}", id, body),
            None => format!("  {}", body),
        }
    }

    /// Chat turns keep their line structure; the first line carries the speaker
    fn message_text(&self, fragment: &Fragment) -> String {
        let lines = self.plain_lines(&fragment.html);
        match lines.split_first() {
            Some((speaker, rest)) if speaker.ends_with(':') => {
                format!("{} {}", speaker, rest.join("\n    "))
            }
            _ => lines.join("\n"),
        }
    }

    fn banner(&mut self, node: Node) {
        let lines = match node {
            Node::HomePage => vec![
                "=== Creator Chat ===".to_string(),
                "Type `user` to browse creators or `creator` to set up your own.".to_string(),
            ],
            Node::CreatorPage => vec![
                "=== Choose a creator ===".to_string(),
                "Type to search, a number to pick, `/back` to return.".to_string(),
            ],
            Node::ChatPage => {
                let name = self.text.get(&Node::CreatorName).cloned().unwrap_or_default();
                let specialty = self
                    .text
                    .get(&Node::CreatorSpecialty)
                    .cloned()
                    .unwrap_or_default();
                vec![
                    format!("=== Chatting with {} ({}) ===", name, specialty),
                    format!("Say hello to {}. `/back` picks another creator.", name),
                ]
            }
            _ => return,
        };

        for line in lines {
            self.emit(&line);
        }
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write to terminal");
        }
    }

    fn print_fragments(&mut self, fragments: &[Fragment]) {
        let lines: Vec<String> = fragments.iter().map(|f| self.fragment_line(f)).collect();
        for line in lines {
            self.emit(&line);
        }
    }

    fn print_messages(&mut self, children: &[Child]) {
        let messages: Vec<&Fragment> = children
            .iter()
            .filter_map(|child| match child {
                Child::Fragment(fragment) => Some(fragment),
                Child::Node(_) => None,
            })
            .collect();

        // A shorter list means a new session started
        if messages.len() < self.printed_messages {
            self.printed_messages = 0;
        }

        let fresh: Vec<String> = messages[self.printed_messages..]
            .iter()
            .map(|fragment| self.message_text(fragment))
            .collect();
        self.printed_messages = messages.len();

        for text in fresh {
            self.emit(&text);
        }
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn set_visible(&mut self, node: Node, visible: bool) {
        match node {
            Node::HomePage | Node::CreatorPage | Node::ChatPage => {
                if visible && self.page != Some(node) {
                    self.page = Some(node);
                    self.banner(node);
                }
            }
            Node::LoadingOverlay if visible => self.emit("  ..."),
            Node::SearchSuggestions if visible => {
                let suggestions = std::mem::take(&mut self.suggestions);
                self.print_fragments(&suggestions);
                self.suggestions = suggestions;
            }
            _ => {}
        }
    }

    fn set_text(&mut self, node: Node, text: &str) {
        if node == Node::MessageInput || node == Node::CreatorSearch {
            self.values.insert(node, text.to_string());
        } else {
            self.text.insert(node, text.to_string());
        }
    }

    fn set_children(&mut self, node: Node, children: Vec<Child>) {
        match node {
            Node::CreatorsGrid if self.page == Some(Node::CreatorPage) => {
                let cards: Vec<Fragment> = children
                    .into_iter()
                    .filter_map(|child| match child {
                        Child::Fragment(fragment) => Some(fragment),
                        Child::Node(_) => None,
                    })
                    .collect();
                self.print_fragments(&cards);
            }
            Node::SearchSuggestions => {
                self.suggestions = children
                    .into_iter()
                    .filter_map(|child| match child {
                        Child::Fragment(fragment) => Some(fragment),
                        Child::Node(_) => None,
                    })
                    .collect();
            }
            Node::ChatMessages => self.print_messages(&children),
            _ => {}
        }
    }

    fn read_value(&self, node: Node) -> String {
        self.values.get(&node).cloned().unwrap_or_default()
    }

    fn focus(&mut self, node: Node) {
        tracing::trace!(region = %node, "Focus");
    }

    fn notify(&mut self, message: &str) {
        self.emit(&format!("! {}", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::state::ChatMessage;
    use crate::view::markup;

    fn surface() -> TerminalSurface<Vec<u8>> {
        TerminalSurface::with_writer(Vec::new()).unwrap()
    }

    fn output(surface: TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_lines_flatten_markup() {
        let surface = surface();
        let lines = surface.plain_lines("<h2>Tips</h2><ul><li>one</li><li>two</li></ul>x<br>y");
        assert_eq!(lines, vec!["Tips", "* one", "* two", "x", "y"]);
    }

    #[test]
    fn test_grid_printed_only_on_creator_page() {
        let catalog = Catalog::builtin();
        let cards = || {
            catalog
                .iter()
                .map(|c| Child::Fragment(markup::creator_card(c)))
                .collect::<Vec<_>>()
        };

        let mut surface = surface();
        surface.set_children(Node::CreatorsGrid, cards());
        surface.set_visible(Node::CreatorPage, true);
        surface.set_children(Node::CreatorsGrid, cards());

        let out = output(surface);
        assert_eq!(out.matches("[1] Marques Brownlee").count(), 1);
        assert!(out.contains("[5] Lewis George Hilsenteger"));
    }

    #[test]
    fn test_only_new_messages_printed() {
        let mut surface = surface();
        let first = Child::Fragment(markup::chat_message(&ChatMessage::user("hi"), None));
        let second = Child::Fragment(markup::chat_message(&ChatMessage::assistant("**hey**"), None));

        surface.set_children(Node::ChatMessages, vec![Child::Node(Node::WelcomeMessage), first.clone()]);
        surface.set_children(
            Node::ChatMessages,
            vec![Child::Node(Node::WelcomeMessage), first, second],
        );

        let out = output(surface);
        assert_eq!(out.matches("U: hi").count(), 1);
        assert!(out.contains("AI: hey"));
    }

    #[test]
    fn test_new_session_resets_transcript() {
        let mut surface = surface();
        let turn = Child::Fragment(markup::chat_message(&ChatMessage::user("hi"), None));
        surface.set_children(Node::ChatMessages, vec![turn.clone(), turn.clone()]);
        surface.set_children(Node::ChatMessages, vec![Child::Node(Node::WelcomeMessage)]);
        surface.set_children(Node::ChatMessages, vec![turn]);

        assert_eq!(output(surface).matches("U: hi").count(), 3);
    }

    #[test]
    fn test_inputs_and_notices() {
        let mut surface = surface();
        surface.set_value(Node::MessageInput, "draft");
        assert_eq!(surface.read_value(Node::MessageInput), "draft");
        surface.set_text(Node::MessageInput, "");
        assert_eq!(surface.read_value(Node::MessageInput), "");

        surface.notify("Creator not found!");
        assert!(output(surface).contains("! Creator not found!"));
    }
}
