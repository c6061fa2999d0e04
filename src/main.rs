//! Creator Chat CLI
//!
//! Interactive terminal front end plus a few catalog and rendering helpers.

use anyhow::Context;
use clap::{Parser, Subcommand};
use creator_chat::markdown;
use creator_chat::search::{self, NO_RESULTS_LABEL};
use creator_chat::{
    generate_default_config, Catalog, Config, CreatorId, HttpChatTransport, LoggingConfig, Node,
    Page, RenderSurface, SendOutcome, Suggestions, TerminalSurface, UserRole, ViewController,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "creator-chat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with AI personas of your favorite tech creators")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: searched in the user config dir, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chat backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (default)
    Chat,

    /// List the available creators
    Creators,

    /// Search creators by name, specialty or description
    Search {
        /// Search text
        query: String,
    },

    /// Render markdown to markup
    Render {
        /// Input file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; a broken default file falls back
    let (mut config, ignored) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => match Config::load_default() {
            Ok(config) => (config, None),
            Err(e) => (Config::from_env(), Some(e)),
        },
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);
    if let Some(e) = ignored {
        tracing::warn!(error = %e, "Ignoring config file, using defaults");
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(&config).await?,

        Commands::Creators => {
            for creator in config.catalog()?.iter() {
                println!("[{}] {} {}", creator.id, creator.name, creator.specialty);
                if !creator.description.is_empty() {
                    println!("    {}", creator.description);
                }
            }
        }

        Commands::Search { query } => {
            for line in search_lines(&config.catalog()?, &query) {
                println!("{}", line);
            }
        }

        Commands::Render { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            println!("{}", markdown::render(&text));
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so they stay out of the transcript
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("creator_chat={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_chat(config: &Config) -> anyhow::Result<()> {
    let transport = HttpChatTransport::new(config.transport_config())?;
    let surface = TerminalSurface::new()?;
    let mut view = ViewController::new(surface, transport, config.catalog()?);
    view.init();

    tracing::info!(endpoint = %view.transport().endpoint(), "Chat session ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Input::parse(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Home => view.navigate(Page::Home),
            Input::Back => match view.state().page() {
                Page::Chat => view.navigate(Page::CreatorSelect),
                Page::CreatorSelect => view.navigate(Page::Home),
                Page::Home => {}
            },
            Input::Page(name) => {
                if let Err(e) = view.show_page(&name) {
                    view.surface_mut().notify(&e.to_string());
                }
            }
            Input::Role(role) => {
                view.select_role(role);
            }
            Input::Pick(id) => pick_creator(&mut view, id),
            Input::Debug => println!("{}", serde_json::to_string_pretty(&view.debug_info())?),
            Input::Invalid(message) => view.surface_mut().notify(&message),
            Input::Text(text) => handle_text(&mut view, text).await,
        }
    }

    tracing::info!("Chat session ended");
    Ok(())
}

/// Plain text means different things on each page
async fn handle_text(view: &mut ViewController<TerminalSurface, HttpChatTransport>, text: String) {
    match view.state().page() {
        Page::Home => match text.parse::<UserRole>() {
            Ok(role) => {
                view.select_role(role);
            }
            Err(e) => view.surface_mut().notify(&e),
        },
        Page::CreatorSelect => match text.parse::<CreatorId>() {
            Ok(id) => pick_creator(view, id),
            Err(_) => {
                view.surface_mut().set_value(Node::CreatorSearch, text);
                view.handle_search();
            }
        },
        Page::Chat => {
            view.surface_mut().set_value(Node::MessageInput, text);
            if let SendOutcome::Ignored(reason) = view.send_message().await {
                view.surface_mut().notify(&reason.to_string());
            }
        }
    }
}

/// Unknown ids are already reported on the surface
fn pick_creator(view: &mut ViewController<TerminalSurface, HttpChatTransport>, id: CreatorId) {
    if let Err(e) = view.select_creator(id) {
        tracing::debug!(error = %e, "Creator selection rejected");
    }
}

/// Output of the `search` command; a blank query prints nothing
fn search_lines(catalog: &Catalog, query: &str) -> Vec<String> {
    match search::suggest(catalog, query) {
        Suggestions::Hidden => Vec::new(),
        Suggestions::NoResults => vec![NO_RESULTS_LABEL.to_string()],
        Suggestions::Matches(creators) => creators
            .into_iter()
            .map(|creator| format!("[{}] {} {}", creator.id, creator.name, creator.specialty))
            .collect(),
    }
}

/// One line typed at the prompt
#[derive(Debug, PartialEq)]
enum Input {
    Empty,
    Quit,
    Back,
    Home,
    Debug,
    Page(String),
    Pick(CreatorId),
    Role(UserRole),
    Invalid(String),
    Text(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }

        let Some(command) = line.strip_prefix('/') else {
            return Input::Text(line.to_string());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));

        match name {
            "quit" | "exit" => Input::Quit,
            "back" => Input::Back,
            "home" => Input::Home,
            "debug" => Input::Debug,
            "page" if !arg.is_empty() => Input::Page(arg.to_string()),
            "pick" => match arg.parse() {
                Ok(id) => Input::Pick(id),
                Err(_) => Input::Invalid(format!("Not a creator id: {:?}", arg)),
            },
            "role" => match arg.parse() {
                Ok(role) => Input::Role(role),
                Err(e) => Input::Invalid(e),
            },
            _ => Input::Invalid(format!("Unknown command: /{}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("  "), Input::Empty);
        assert_eq!(Input::parse("/quit"), Input::Quit);
        assert_eq!(Input::parse("/back"), Input::Back);
        assert_eq!(Input::parse("/page  creatorSelect "), Input::Page("creatorSelect".to_string()));
        assert_eq!(Input::parse("/pick 3"), Input::Pick(3));
        assert_eq!(Input::parse("/role Creator"), Input::Role(UserRole::Creator));
    }

    #[test]
    fn test_search_lines() {
        let catalog = Catalog::builtin();
        assert!(search_lines(&catalog, "").is_empty());
        assert!(search_lines(&catalog, "   ").is_empty());
        assert_eq!(search_lines(&catalog, "cooking"), vec![NO_RESULTS_LABEL.to_string()]);

        let lines = search_lines(&catalog, "unboxing");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[3] Justine Ezarik"));
    }

    #[test]
    fn test_parse_text_and_errors() {
        assert_eq!(Input::parse(" hello there "), Input::Text("hello there".to_string()));
        assert!(matches!(Input::parse("/pick x"), Input::Invalid(_)));
        assert!(matches!(Input::parse("/page"), Input::Invalid(_)));
        assert!(matches!(Input::parse("/dance"), Input::Invalid(_)));
    }
}
