use anyhow::{Context as AnyhowContext, Result};
use chatcart_catalog::{Category, Decimal, ProductFilter, StoreProfile};
use chatcart_sync::{ChatMessage, SessionContext, SyncConfig, SyncOutcome, Synchronizer};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use report::ReplayEvent;

mod report;
mod transcript;

#[derive(Parser)]
#[command(name = "chatcart")]
#[command(about = "Derive recommendations and cart state from shopping chats", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Store profile TOML (default: built-in store)
    #[arg(long, global = true)]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL chat transcript and print every published update
    Replay(ReplayArgs),

    /// List catalog products
    Catalog(CatalogArgs),

    /// Show what one remote message matches in the catalog
    Match(MatchArgs),
}

#[derive(Args)]
struct ReplayArgs {
    /// Transcript file, one {"sender", "text"} object per line
    transcript: PathBuf,

    /// Emit one JSON object per event
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct CatalogArgs {
    /// Category label or slug (e.g. hoodie, t-shirt)
    #[arg(long)]
    category: Option<Category>,

    /// Inclusive upper price bound
    #[arg(long)]
    max_price: Option<Decimal>,

    /// Inclusive lower price bound
    #[arg(long)]
    min_price: Option<Decimal>,

    /// Color, case-insensitive
    #[arg(long)]
    color: Option<String>,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MatchArgs {
    /// Message text
    text: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let (profile, config) = load_profile(cli.profile.as_deref())?;
    log::debug!(
        "Store {:?}: {} products, {} keywords",
        profile.name,
        profile.catalog.len(),
        profile.keywords.len()
    );

    match cli.command {
        Commands::Replay(args) => run_replay(&args, &profile, config),
        Commands::Catalog(args) => run_catalog(&args, &profile),
        Commands::Match(args) => run_match(&args, &profile, config),
    }
}

/// Store profile plus its `[sync]` table; both come from the same document
fn load_profile(path: Option<&Path>) -> Result<(StoreProfile, SyncConfig)> {
    let Some(path) = path else {
        let profile = StoreProfile::builtin().context("Built-in profile is invalid")?;
        let config = SyncConfig::from_toml_str(StoreProfile::builtin_source())
            .context("Built-in profile has an invalid [sync] table")?;
        return Ok((profile, config));
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile = StoreProfile::from_toml_str(&raw)
        .with_context(|| format!("Invalid store profile {}", path.display()))?;
    let config = SyncConfig::from_toml_str(&raw)
        .with_context(|| format!("Invalid [sync] table in {}", path.display()))?;
    Ok((profile, config))
}

fn run_replay(args: &ReplayArgs, profile: &StoreProfile, config: SyncConfig) -> Result<()> {
    let lines = transcript::read_transcript(&args.transcript)?;
    let mut sync = Synchronizer::from_profile(profile, config)?;

    for (idx, line) in lines.into_iter().enumerate() {
        let outcome = sync.ingest(ChatMessage::new(line.sender, line.text, idx))?;
        print_outcome(&sync, idx, &outcome, args.json)?;
    }

    log::info!(
        "Replayed {} messages: {} recommendations, cart {}",
        sync.history().len(),
        sync.recommendations().len(),
        sync.cart().item_label()
    );
    Ok(())
}

fn print_outcome(sync: &Synchronizer, at: usize, outcome: &SyncOutcome, json: bool) -> Result<()> {
    if let Some(ranked) = &outcome.recommendations {
        let highlighted: Vec<&str> = sync.highlighted().map(|e| e.item_id.as_str()).collect();
        if json {
            let event = ReplayEvent::Recommendations {
                at,
                items: ranked,
                highlighted,
            };
            println!("{}", serde_json::to_string(&event)?);
        } else {
            print!("{}", report::render_recommendations(at, ranked, &highlighted));
        }
    }
    if let Some(cart) = &outcome.cart {
        if json {
            println!("{}", serde_json::to_string(&ReplayEvent::Cart { at, cart })?);
        } else {
            print!("{}", report::render_cart(at, cart));
        }
    }
    Ok(())
}

fn run_catalog(args: &CatalogArgs, profile: &StoreProfile) -> Result<()> {
    let filter = ProductFilter {
        category: args.category,
        max_price: args.max_price,
        min_price: args.min_price,
        color: args.color.clone(),
    };
    let items = profile.catalog.filter(&filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for item in &items {
            println!("{}", report::render_item(item));
        }
        println!("{} products", items.len());
    }
    Ok(())
}

fn run_match(args: &MatchArgs, profile: &StoreProfile, config: SyncConfig) -> Result<()> {
    let context = SessionContext::new(
        std::sync::Arc::new(profile.catalog.clone()),
        &profile.keywords,
        config,
    )?;
    let candidates = context.matcher().match_text(&args.text);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
    } else if candidates.is_empty() {
        println!("No matches");
    } else {
        for candidate in &candidates {
            let item = context.catalog().get(&candidate.item_id);
            println!("{}", report::render_candidate(candidate, item));
        }
    }
    Ok(())
}
