//! Hyperforge - compile hyper-key sub-layer chords into
//! Karabiner-Elements configuration.

use clap::{Parser, Subcommand};
use hyperforge::cli;

/// Compile declarative hyper-key sub-layer chords into Karabiner-Elements configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a layer document and write karabiner.json
    Build(cli::BuildArgs),
    /// Validate a layer document without writing anything
    Validate(cli::ValidateArgs),
    /// Show the chords a layer document compiles to
    Inspect(cli::InspectArgs),
    /// Create a commented starter layer document
    Init(cli::InitArgs),
    /// Show or change the app configuration
    Config(cli::ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::Init(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("✗ {error}");
        std::process::exit(error.exit_code());
    }
}
