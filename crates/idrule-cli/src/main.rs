//! `idrule`: validate resident identity numbers and unified social credit
//! codes, and redact phone numbers and identity numbers for display.
mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod logging;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = dispatch(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}

/// Routes the parsed command to its implementation.
fn dispatch(cli: &Cli) -> Result<(), CliError> {
    let config = FormatterConfig::from_flags(cli.format, cli.no_color, cli.quiet);

    match &cli.command {
        Command::Person { inputs, today } => {
            let values = io::collect_values(inputs, cli.max_file_size)?;
            cmd::person::run(&values, *today, &config)
        }
        Command::Org { inputs } => {
            let values = io::collect_values(inputs, cli.max_file_size)?;
            cmd::org::run(&values, &config)
        }
        Command::Redact { kind, inputs } => {
            let values = io::collect_values(inputs, cli.max_file_size)?;
            cmd::redact::run((*kind).into(), &values, &config)
        }
        Command::Verify { fingerprint, value } => cmd::verify::run(fingerprint, value, &config),
    }
}
