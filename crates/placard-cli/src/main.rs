//! Placard CLI - composite cards from the command line

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match &cli.command {
        Commands::Text(args) => commands::text::run(args, cli.quiet),
        Commands::Image(args) => commands::image::run(args, cli.quiet),
        Commands::Base(args) => commands::base::run(args, cli.quiet),
        Commands::Bases(args) => commands::base::run_all(args, cli.quiet),
        Commands::Info(args) => commands::info::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
