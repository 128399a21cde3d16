use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::T4Command;
use crate::exit::Exit;

/// Analyze text templates.
#[derive(Parser)]
#[command(name = "t4")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: T4Command,

    #[command(flatten)]
    pub args: Args,
}

impl Cli {
    pub fn run(&self) -> Result<Exit> {
        self.command.execute(&self.args)
    }
}
