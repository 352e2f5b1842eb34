use std::io;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use fitstock_admin::{AdminConfig, Cli, Console, InventoryScreen, NotificationQueue};
use fitstock_core::SystemClock;
use fitstock_inventory::{FailingLoader, InventoryStore, JsonFileLoader, MockLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AdminConfig::resolve(&cli, |key| std::env::var(key).ok())
        .context("failed to read configuration")?;

    fitstock_observability::init(config.log_format);
    tracing::info!(?config, "starting inventory console");

    let store = InventoryStore::new(Arc::new(SystemClock));
    let mut screen = InventoryScreen::new(store, NotificationQueue::new());

    println!("Loading inventory...");
    if config.fail_load {
        screen
            .load(&FailingLoader::new("simulated backend failure"))
            .await;
    } else if let Some(path) = &config.seed_file {
        let loader = JsonFileLoader::new(path);
        tracing::info!(path = %loader.path().display(), "loading seed file");
        screen.load(&loader).await;
    } else {
        screen.load(&MockLoader::seeded(config.load_delay)).await;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(screen, stdin.lock(), stdout.lock());
    console.run().context("console I/O failed")?;

    Ok(())
}
