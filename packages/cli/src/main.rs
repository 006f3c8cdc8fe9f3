mod clipboard;
mod commands;
mod config;
mod fixture;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, extract, init, ExportArgs, ExtractArgs, InitArgs};

/// copyedit - inspect and export in-page copy edits
#[derive(Parser, Debug)]
#[command(name = "copyedit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default copyedit.config.json
    Init(InitArgs),

    /// Print the plain text of a content tree
    Extract(ExtractArgs),

    /// Mount a page fixture, apply edits and export its copy report
    Export(ExportArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Extract(args) => extract(args, &cwd),
        Command::Export(args) => export(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
