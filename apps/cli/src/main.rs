//! utilreport CLI: render the workforce utilisation report.
//!
//! Loads a personnel export, keeps the active people, and prints one row of
//! utilisation and net-earnings figures per person.

mod commands;
mod table;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
