// crates/charpress-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "charpress-cli")]
#[command(about = "Charset pre-compression optimizer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite a pattern/color table pair for better compressibility
    Optimize(cmd::optimize::OptimizeArgs),

    /// Analyze table bytes (histogram, entropy, zstd scoreboard)
    Analyze(cmd::analyze::AnalyzeArgs),

    /// Check that an optimized pair renders identically to the original
    Verify(cmd::verify::VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Optimize(args) => cmd::optimize::run(args),
        Commands::Analyze(args) => cmd::analyze::run(args),
        Commands::Verify(args) => cmd::verify::run(args),
    }
}
