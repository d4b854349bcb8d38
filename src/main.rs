mod cli;
mod commands;
mod config;
mod paths;
mod ui;

use clap::{CommandFactory, Parser};
use cli::Cli;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if cli.resolve.is_empty() {
        let _ = Cli::command().print_help();
        return;
    }

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    if let Err(err) = commands::resolve::run(&ctx, cli.resolve) {
        report_error(&err);
        std::process::exit(1);
    }
}

/// Print a fatal error, with advice when it comes from azops.
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<azops::Error>() {
        Some(azops_err) => {
            let category = azops_err.category();
            log::debug!("Failure category: {}", category.description());

            ui::error(&azops_err.to_string());
            if let azops::Error::CommandFailed { stderr, .. } = azops_err
                && !stderr.is_empty()
            {
                ui::dim(stderr);
            }
            ui::dim(category.advice());
        }
        None => ui::error(&format!("{err:#}")),
    }
}
