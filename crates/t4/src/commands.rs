mod check;

use anyhow::Result;
use clap::Subcommand;

use crate::args::Args;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<Exit>;
}

#[derive(Debug, Subcommand)]
pub enum T4Command {
    /// Report syntax and directive errors in templates
    Check(self::check::Check),
}

impl Command for T4Command {
    fn execute(&self, args: &Args) -> Result<Exit> {
        match self {
            T4Command::Check(check) => check.execute(args),
        }
    }
}
