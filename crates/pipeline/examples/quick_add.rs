//! Drive the quick-add pipeline against the live catalog API.
//!
//! Usage: `cargo run --example quick_add -- "sol ring"`
//!
//! Types the query into the pipeline, waits out the debounce, prints the
//! resolved suggestion list, commits the first suggestion, and shows the
//! resulting deck statistics. Set `RUST_LOG=decksmith=debug` to watch
//! the cycle transitions.

use std::sync::Arc;
use std::time::Duration;

use decksmith_catalog::{CatalogClient, CatalogConfig};
use decksmith_pipeline::{DeckSession, Key, Phase, SessionEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "sol ring".to_string());

    let catalog = Arc::new(CatalogClient::new(CatalogConfig::default())?);
    let mut session = DeckSession::new(catalog);

    session.input(&query).await;

    // Wait out the debounce plus resolution; poll until the pipeline
    // settles.
    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;
        match session.quick_add().phase().await {
            Phase::Debouncing | Phase::Resolving => continue,
            Phase::Idle | Phase::Displaying => break,
        }
    }

    let suggestions = session.quick_add().suggestions().await;
    if suggestions.is_empty() {
        println!("No suggestions for {query:?}");
        return Ok(());
    }

    println!("Suggestions for {query:?}:");
    for (i, s) in suggestions.iter().enumerate() {
        let legality = if s.is_legal { "legal" } else { "ILLEGAL" };
        let notable = if s.is_notable { ", notable" } else { "" };
        println!("  {i}: {} ({legality}{notable})", s.name);
    }

    match session.handle_key(Key::Enter).await {
        SessionEvent::CardAdded { name } => println!("\nAdded {name} to the deck"),
        SessionEvent::AddRejected(e) => println!("\nAdd rejected: {e}"),
        SessionEvent::None => println!("\nNothing committed"),
    }

    let stats = session.stats();
    println!(
        "Deck: {} cards, avg cmc {:.2}, curve {:?}",
        stats.total_cards, stats.avg_cmc, stats.mana_curve
    );
    Ok(())
}
