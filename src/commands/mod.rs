//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a `cmd`
//! entry point. [`Cli::menu`] parses the arguments and dispatches.

pub mod add;
pub mod amend;
pub mod backup;
pub mod breaks;
pub mod hello;
pub mod init;
pub mod migrations;
pub mod nuke;
pub mod report;
pub mod show;
pub mod stretch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start the day")]
    Hello(hello::HelloArgs),
    #[command(about = "Log a finished activity as project+task[+task...]")]
    Add(add::AddArgs),
    #[command(about = "Log the time since the last entry as a break")]
    Break(breaks::BreakArgs),
    #[command(about = "Change the last entry, or one of today's")]
    Amend(amend::AmendArgs),
    #[command(about = "Move the last entry's time forward to now")]
    Stretch(stretch::StretchArgs),
    #[command(about = "Show time reports")]
    Report(report::ReportArgs),
    #[command(about = "Show favorites, statistics or unpushed entries")]
    Show(show::ShowArgs),
    #[command(about = "Copy the database file next to itself")]
    Backup,
    #[command(about = "Delete entries, optionally archiving them first", arg_required_else_help = true)]
    Nuke(nuke::NukeArgs),
    #[command(about = "Database schema version and history")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Hello(args) => hello::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::Break(args) => breaks::cmd(args),
            Commands::Amend(args) => amend::cmd(args),
            Commands::Stretch(args) => stretch::cmd(args),
            Commands::Report(args) => report::cmd(args).await,
            Commands::Show(args) => show::cmd(args),
            Commands::Backup => backup::cmd(),
            Commands::Nuke(args) => nuke::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
