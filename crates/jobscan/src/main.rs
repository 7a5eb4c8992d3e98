use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod pager;
mod search;
mod tui;
mod view;

#[derive(Parser)]
#[command(name = "jobscan")]
#[command(about = "Search remote job listings from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings and print one page of results
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Browse listings interactively
    #[command(alias = "b")]
    Browse(tui::BrowseArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, overridden by RUST_LOG
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Search(args) => search::execute(args),
        Commands::Browse(args) => tui::execute(args),
    }
}
