//! Product table walkthrough
//!
//! Fetches the product list from the configured API and replays a few user
//! actions, printing every frame as plain text.
//!
//! ```text
//! cargo run --example product_table [config.yaml]
//! RUST_LOG=product_table=debug cargo run --example product_table
//! PRODUCT_TABLE_SORT=title cargo run --example product_table
//! ```

use std::sync::Arc;
use std::time::Duration;

use product_table::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => TableConfig::from_yaml_file(&path)?,
        None => TableConfig::default(),
    };
    let debounce = config.debounce();
    let sort_key: SortKey = std::env::var("PRODUCT_TABLE_SORT")
        .unwrap_or_else(|_| "price".to_string())
        .parse()
        .map_err(anyhow::Error::msg)?;

    let bus = EventBus::default();
    let source = Arc::new(HttpProductSource::from_config(&config)?);

    let frames = bus.subscribe();
    let renderer = tokio::spawn(async move {
        let mut renderer = TextRenderer::new(std::io::stdout());
        run_renderer(&mut renderer, frames).await;
    });

    let (table, actor) = TableHandle::spawn(TableController::new(config, bus));
    if let Err(e) = table.load(source).await {
        eprintln!("Failed to load data: {}", e);
    } else {
        println!("\n--- sort by {} ---", sort_key);
        table.toggle_sort(sort_key).await?;

        println!("\n--- next page ---");
        table.next_page().await?;

        println!("\n--- search \"shirt\" (typed one key at a time) ---");
        let mut typed = String::new();
        for c in "shirt".chars() {
            typed.push(c);
            table.search(typed.clone()).await?;
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(debounce * 2).await;
    }

    // Dropping the last handle stops the actor, which drops the bus
    drop(table);
    actor.await?;
    renderer.await?;

    Ok(())
}
