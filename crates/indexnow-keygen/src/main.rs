use std::{io, path::Path};

use anyhow::Context;
use indexnow_keygen::{
    batch::{self, KeyOutcome},
    config::KeyConfig,
    keygen::OsKeySource,
    prompt, store,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logging goes to stderr so it never mixes with the key listing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let dir = Path::new(store::OUTPUT_DIR);
    store::ensure_output_dir(dir).context("failed to create output directory")?;

    let count = prompt::prompt_for_count(io::stdin().lock(), io::stdout())
        .context("failed to get key count")?;
    debug!(count = count.get(), "generating keys");

    let config = KeyConfig::default();
    let report = batch::run_batch(count, &config, &mut OsKeySource, dir, |outcome| {
        if let KeyOutcome::Saved { .. } = outcome {
            println!("{outcome}");
        }
    });

    report
        .write_summary(io::stdout().lock())
        .context("failed to write summary")?;
    report.into_result()?;
    Ok(())
}
