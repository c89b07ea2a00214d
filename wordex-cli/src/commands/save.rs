use anyhow::{Context, Result};
use wordex::IndexConfig;

use crate::cli::SaveCommand;
use crate::context;
use crate::output::OutputFormat;

/// Build the index and write the flat export.
pub fn run(cmd: SaveCommand, config: IndexConfig, format: OutputFormat) -> Result<()> {
    let engine = context::build_engine(config, &cmd.source.files, format)?;
    let written = engine
        .save(&cmd.output)
        .with_context(|| format!("Failed to save to {}", cmd.output.display()))?;
    println!("Saved {written} words to {}.", cmd.output.display());
    Ok(())
}
