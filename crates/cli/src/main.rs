use std::io;

use anyhow::Context;
use clap::Parser;

use stockroom_cli::{Config, Session};
use stockroom_inventory::Inventory;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    stockroom_observability::init(config.log_format);

    let mut inventory = Inventory::new();
    if config.load {
        let report = inventory
            .load_from_file(&config.file)
            .with_context(|| format!("failed to load {}", config.file.display()))?;
        if report.skipped() > 0 {
            tracing::warn!(
                skipped = report.skipped(),
                "some records in {} could not be loaded",
                config.file.display()
            );
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(inventory, stdin.lock(), stdout.lock(), config.file);
    session.run().context("terminal I/O failed")?;
    Ok(())
}
