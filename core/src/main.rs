//! Upload Guard CLI - manage the page configuration of the guard
//!
//! ```bash
//! upload-guard defaults                     # Print the default configuration
//! upload-guard check guard.json             # Validate a configuration file
//! upload-guard embed guard.json -o tag.html # Render the <script> tag for the page
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use upload_guard::{GuardConfig, GuardResult};

#[derive(Parser)]
#[command(name = "upload-guard")]
#[command(about = "Manage the upload guard page configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration as JSON
    Defaults {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file and list the selectors it waits for
    Check {
        /// Configuration JSON file
        input: PathBuf,
    },

    /// Render the <script> tag embedding a configuration into the page
    Embed {
        /// Configuration JSON file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Defaults { output } => cmd_defaults(output.as_deref()),
        Commands::Check { input } => cmd_check(&input),
        Commands::Embed { input, output } => cmd_embed(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_defaults(output: Option<&Path>) -> GuardResult<()> {
    let json = GuardConfig::default().to_json_pretty()?;
    write_output(&json, output)
}

fn cmd_check(input: &Path) -> GuardResult<()> {
    eprintln!("📄 Checking: {}", input.display());

    let config = GuardConfig::from_file(input)?;

    eprintln!("   Controls: {}", config.controls.len());
    eprintln!("   Upload zones: {}", config.upload_zones.len());
    eprintln!("   Poll interval: {} ms", config.poll_interval_ms);
    match config.max_poll_attempts {
        Some(max) => eprintln!("   Max attempts: {}", max),
        None => eprintln!("   Max attempts: unbounded"),
    }

    eprintln!("\n⏳ Waits for:");
    for selector in config.required_selectors() {
        println!("{}", selector);
    }

    eprintln!("\n👀 Observes:");
    for selector in config.upload_list_selectors() {
        println!("{}", selector);
    }

    eprintln!("\n✅ Configuration is valid");
    Ok(())
}

fn cmd_embed(input: &Path, output: Option<&Path>) -> GuardResult<()> {
    let config = GuardConfig::from_file(input)?;
    write_output(&config.embed_tag()?, output)
}

fn write_output(content: &str, path: Option<&Path>) -> GuardResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
