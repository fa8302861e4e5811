// src/main.rs
use anyhow::Context as _;
use clap::Parser;

use fontbridge::cli::{describe, Cli};

fn main() -> anyhow::Result<()> {
    // tracing events reach env_logger through tracing's `log` feature
    env_logger::init();

    let cli = Cli::parse();
    let ctx = fontbridge::cairo::font_context(cli.config()).context("Failed to set up cairo engine")?;
    let report = describe(&ctx, &cli).with_context(|| format!("Failed to describe {}", cli.family))?;
    println!("{report}");
    Ok(())
}
