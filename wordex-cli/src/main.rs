mod cli;
mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::commands::{repl, save, search};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let format = cli.format;
    let config = context::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Display(args) => {
            let engine = context::build_engine(config, &args.files, format)?;
            output::print_index(&engine, format)
        }
        Command::Search(cmd) => search::run(cmd, config, format),
        Command::Save(cmd) => save::run(cmd, config, format),
        Command::Repl(args) => repl::run(&args.files, config, format),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
