//! swipe-replay - run a scripted gesture session against a deck
//!
//! Usage:
//!   cargo run --bin swipe-replay -- scripts/three_cards.yaml
//!   cargo run --bin swipe-replay -- scripts/three_cards.yaml --until 12 --format json
//!   SWIPE_DECK_CONFIG=config/swiper.yaml cargo run --bin swipe-replay -- scripts/three_cards.yaml --settle

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use swipe_deck::config::ConfigLoader;
use swipe_deck::{DeckEvent, GestureLog, OverlayLabels};
use swipe_core::replay::TimestampedInput;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swipe-replay")]
#[command(about = "Replay a scripted swipe session and print the notifications")]
struct Cli {
    /// Script file (YAML)
    script: PathBuf,

    /// Deck config file (defaults to config/swiper.yaml when present)
    #[arg(short, long, env = "SWIPE_DECK_CONFIG")]
    config: Option<PathBuf>,

    /// Stop after this tick
    #[arg(long)]
    until: Option<u64>,

    /// Run the frame clock until every card rests
    #[arg(long)]
    settle: bool,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    format: String,
}

/// A scripted session: the deck items and the timed inputs.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplayScript {
    #[serde(default)]
    session_id: u64,
    items: Vec<String>,
    inputs: Vec<TimestampedInput>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "swipe_deck=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new(path),
        None => ConfigLoader::from_env(),
    };
    let config = loader.load()?;
    let options = config.swiper_options()?;

    let content = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read {}", cli.script.display()))?;
    let script: ReplayScript = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", cli.script.display()))?;

    let mut log = GestureLog::new(script.session_id, config.viewport);
    for entry in script.inputs {
        log.record(entry.tick, entry.input);
    }
    info!(
        session = log.session_id,
        inputs = log.len(),
        cards = script.items.len(),
        "replaying session"
    );

    let mut deck = match cli.until {
        Some(tick) => log.replay_to(script.items, options, tick),
        None => log.replay(script.items, options),
    }
    .context("Replay failed")?;

    if cli.settle {
        let dt = config.frame_interval().as_secs_f64();
        let frames = deck.settle(dt, 60 * 60 * 10);
        info!(frames, "frame clock settled");
    }

    let events = deck.drain_events();
    let snapshot = deck.snapshot();

    match cli.format.as_str() {
        "json" => {
            let output = serde_json::json!({
                "session_id": log.session_id,
                "events": events,
                "snapshot": snapshot,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("=== Notifications ===");
            for event in &events {
                println!("{}", describe(event));
            }

            println!();
            println!("=== Deck ===");
            println!("Active index:     {}", snapshot.active_index);
            println!("Last z-index:     {}", snapshot.last_z_index);
            println!("Animating:        {}", snapshot.animating);

            println!();
            println!("=== Cards (draw order) ===");
            let labels = OverlayLabels::new()
                .left(|opacity| format!("nope {opacity:.2}"))
                .right(|opacity| format!("like {opacity:.2}"))
                .top(|opacity| format!("super {opacity:.2}"));
            for card in deck.render(|item, _| item.clone(), &labels) {
                let overlays: Vec<&str> = card.overlays.iter().map(|(_, label)| label.as_str()).collect();
                println!(
                    "  [{}] {:<12} z={:<4} x={:>9.2} rot={:>7.4}  {}",
                    card.frame.index,
                    card.content,
                    card.frame.z_index,
                    card.frame.translate_x,
                    card.frame.rotation,
                    overlays.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn describe(event: &DeckEvent) -> String {
    match event {
        DeckEvent::Swiped { index, .. } => format!("{} index={}", event.name(), index),
        DeckEvent::IndexChanged { index } => format!("{} index={}", event.name(), index),
        _ => event.name().to_string(),
    }
}
