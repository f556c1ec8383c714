use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use mapman::cli::{Cli, Commands};
use mapman::output::{self, Verbosity};
use mapman::{MapmanContext, Overrides, commands, telemetry};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init();
    output::set_verbosity(Verbosity::from_flags(cli.global.quiet, cli.global.verbose));

    match cli.command {
        Some(Commands::Completion { shell }) => {
            print_completions(shell, &mut Cli::command());
        }
        Some(Commands::Update { dry_run }) => {
            let ctx = MapmanContext::from_overrides(&Overrides::from(&cli.global))?;
            commands::update::execute(&ctx, dry_run)?;
        }
        None => {
            let ctx = MapmanContext::from_overrides(&Overrides::from(&cli.global))?;
            commands::update::execute(&ctx, false)?;
        }
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
