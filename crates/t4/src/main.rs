mod args;
mod cli;
mod commands;
mod exit;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let global = &cli.args.global;
    logging::init_tracing(global.verbose, global.quiet);

    match cli.run() {
        Ok(exit) => exit.report(global.quiet),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
