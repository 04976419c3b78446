// ABOUTME: Terminal front end for confab - single questions, chat and brainstorms.
// ABOUTME: Plays the editor's role: reads input, renders answers with their colors.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use rustyline::DefaultEditor;

use confab::prelude::*;

#[derive(Parser)]
#[command(
    name = "confab",
    version,
    about = "Talk to OpenAI, Anthropic, Gemini, Ollama and xAI from one place"
)]
struct Cli {
    /// Settings file (default: <config dir>/confab/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question
        #[arg(required = true)]
        text: Vec<String>,

        /// Provider to ask (default: active_provider from settings)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Start a multi-turn chat session
    Chat {
        /// Provider to chat with (default: active_provider from settings)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Let several providers discuss a topic in turn
    Brainstorm {
        /// The topic
        #[arg(required = true)]
        topic: Vec<String>,

        /// Number of rounds (default: brainstorm_rounds from settings)
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Comma-separated participants (default: every provider)
        #[arg(short, long = "with", value_delimiter = ',')]
        with: Vec<String>,
    },

    /// List configured providers
    Providers,
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

/// Wrap `text` in a 24-bit ANSI color taken from a `#RRGGBB` code.
fn paint(color_code: &str, text: &str) -> String {
    let hex = color_code.trim_start_matches('#');
    let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
        _ => text.to_string(),
    }
}

fn print_reply(reply: &Reply) {
    println!("\n{}\n", paint(&reply.color_code, &format!("[{}]", reply.label)));
    println!("{}\n", reply.answer);
}

async fn cmd_ask(settings: &Settings, provider: Option<&str>, text: &str) -> Result<()> {
    let mut ctx = ChatContext::from_settings(settings)?;
    let reply = match provider {
        Some(name) => ctx.ask_with(name, text).await?,
        None => ctx.ask(text).await?,
    };
    print_reply(&reply);
    Ok(())
}

async fn cmd_chat(config: Option<&Path>, provider: Option<&str>) -> Result<()> {
    let settings = load_settings(config)?;
    let mut ctx = ChatContext::from_settings(&settings)?;
    if let Some(name) = provider {
        ctx.set_active(name)?;
    }
    let mut rl = DefaultEditor::new()?;

    println!(
        "Chatting with {} - '/use <provider>' switches, '/reset' clears history, 'quit' exits.\n",
        ctx.registry().active().name()
    );

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        let _ = rl.add_history_entry(line);

        if line == "/reset" {
            ctx.registry_mut().active_mut().reset_history();
            println!("History cleared.\n");
            continue;
        }
        if let Some(name) = line.strip_prefix("/use ") {
            match ctx.set_active(name.trim()) {
                Ok(()) => println!("Now chatting with {}.\n", name.trim()),
                Err(e) => println!("{}\n", e),
            }
            continue;
        }

        // Settings are re-read before every turn, the way an editor plugin
        // picks up edits without a restart.
        match load_settings(config) {
            Ok(fresh) => {
                let active = ctx.registry().active().name().to_string();
                if let Err(e) = ctx.apply_settings(&fresh) {
                    tracing::warn!(error = %e, "ignoring settings");
                }
                // Keep a /use choice made during the session.
                ctx.set_active(&active)?;
            }
            Err(e) => tracing::warn!(error = %e, "could not reload settings"),
        }

        match ctx.ask(line).await {
            Ok(reply) => print_reply(&reply),
            Err(e) => println!("\nError: {}\n", e),
        }
    }

    Ok(())
}

async fn cmd_brainstorm(
    settings: &Settings,
    topic: &str,
    rounds: Option<usize>,
    with: &[String],
) -> Result<()> {
    let mut ctx = ChatContext::from_settings(settings)?;
    let colors: Vec<(String, String)> = ctx
        .registry()
        .all()
        .iter()
        .map(|p| (p.name().to_string(), p.config().color_code.clone()))
        .collect();

    let turns = ctx.brainstorm(topic, rounds, with)?;
    futures::pin_mut!(turns);

    while let Some(turn) = turns.next().await {
        let turn = turn?;
        let color_code = colors
            .iter()
            .find(|(name, _)| *name == turn.speaker)
            .map(|(_, code)| code.as_str())
            .unwrap_or_default();
        println!("\n{}\n", paint(color_code, &format!("[{}]", turn.speaker)));
        println!("{}\n", turn.content);
    }

    Ok(())
}

fn cmd_providers(settings: &Settings) -> Result<()> {
    let registry = ProviderRegistry::from_settings(settings)?;
    for provider in registry.all() {
        let config = provider.config();
        let marker = if provider.name() == registry.active().name() {
            "*"
        } else {
            " "
        };
        let key = if config.api_key.is_empty() { "no key" } else { "key set" };
        println!(
            "{} {:<10} {:<28} {}://{}:{}{}  ({})",
            marker,
            paint(&config.color_code, provider.name()),
            config.model,
            config.protocol.scheme(),
            config.host,
            config.port,
            config.url_path,
            key
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Ask { text, provider } => {
            let settings = load_settings(config)?;
            cmd_ask(&settings, provider.as_deref(), &text.join(" ")).await
        }
        Commands::Chat { provider } => cmd_chat(config, provider.as_deref()).await,
        Commands::Brainstorm {
            topic,
            rounds,
            with,
        } => {
            let settings = load_settings(config)?;
            cmd_brainstorm(&settings, &topic.join(" "), rounds, &with).await
        }
        Commands::Providers => {
            let settings = load_settings(config)?;
            cmd_providers(&settings)
        }
    }
}
