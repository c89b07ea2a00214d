use anyhow::Result;
use wordex::{IndexConfig, MatchPolicy};

use crate::cli::SearchCommand;
use crate::context;
use crate::output::{self, OutputFormat};

/// Execute a search command.
pub fn run(cmd: SearchCommand, config: IndexConfig, format: OutputFormat) -> Result<()> {
    let engine = context::build_engine(config, &cmd.source.files, format)?;

    let policy = if cmd.prefix {
        MatchPolicy::Prefix
    } else {
        engine.config().match_policy
    };

    let hits: Vec<_> = engine.search_with(&cmd.word, policy).collect();
    output::print_search_results(&cmd.word, &hits, format)
}
