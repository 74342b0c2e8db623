//! folio-check - validate portfolio config and content without opening a window
//!
//! Loads the site config and portfolio content the same way the GUI does,
//! runs their validation, and prints what the presenter would show. Exits
//! non-zero on the first problem, so it can gate content edits in CI.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use folio::{default_registry, Portfolio, SiteConfig};

/// Validate portfolio configuration and content
#[derive(Parser)]
#[command(name = "folio-check")]
#[command(about = "Validate portfolio configuration and content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Site config file (defaults to $FOLIO_CONFIG, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Portfolio content file (overrides content_path from the config)
    #[arg(long)]
    content: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate everything and print a summary (default)
    Check,

    /// List sections in display order
    Sections,

    /// Print the effective config as JSON, with credentials masked
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let config = SiteConfig::discover(cli.config.as_deref()).context("invalid site config")?;
    let content_path = cli.content.as_deref().or(config.content_path.as_deref());

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            let portfolio = Portfolio::load_or_bundled(content_path).context("invalid portfolio content")?;
            print_summary(&config, &portfolio)?;
        }
        Commands::Sections => print_sections()?,
        Commands::Config => {
            let mut masked = config.clone();
            masked.chat.api_keys = masked.chat.api_keys.iter().map(|key| mask(key)).collect();
            masked.contact.public_key = mask(&masked.contact.public_key);
            println!("{}", serde_json::to_string_pretty(&masked)?);
        }
    }

    Ok(())
}

fn print_summary(config: &SiteConfig, portfolio: &Portfolio) -> Result<()> {
    let nav = &config.navigation;

    println!("Portfolio: {} ({})", portfolio.profile.name, portfolio.profile.headline);
    println!(
        "  education: {}  skill groups: {}  projects: {}",
        portfolio.education.len(),
        portfolio.skills.len(),
        portfolio.projects.len()
    );
    println!();
    print_sections()?;
    println!();
    println!(
        "Navigation: lock {} ms, completion tolerance {} px, swipe threshold {} px",
        nav.lock_duration_ms(),
        nav.completion_tolerance_px,
        nav.touch_threshold_px
    );
    println!(
        "Chat: model {}, {} key(s), {} char limit",
        config.chat.model,
        config.chat.api_keys.len(),
        config.chat.max_input_chars
    );
    println!(
        "Contact relay: {}",
        if config.contact.is_configured() { "configured" } else { "not configured" }
    );

    info!("config and content are valid");
    Ok(())
}

fn print_sections() -> Result<()> {
    let registry = default_registry().context("invalid section registry")?;
    println!("Sections:");
    for (index, section) in registry.iter().enumerate() {
        println!("  {}. {:<10} {}", index + 1, section.id(), section.title());
    }
    Ok(())
}

/// Keeps the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
