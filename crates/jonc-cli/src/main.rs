//! `jonc` CLI — format, compact, and convert JONC documents.
//!
//! ## Usage
//!
//! ```sh
//! # Pretty-print a document (stdin → stdout), keeping comments
//! echo "{ // port\n port: 8080 }" | jonc fmt
//!
//! # Format from file to file
//! jonc fmt -i config.jonc -o config.jonc
//!
//! # Single-line form; --comments keeps comments inline
//! jonc compact -i config.jonc --comments
//!
//! # Convert to plain JSON (comments stripped)
//! jonc json -i config.jonc -o config.json
//!
//! # Show rendering sizes
//! jonc stats -i config.jonc
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jonc_core::{Style, Value};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "jonc", version, about = "JONC (JSON with comments) CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pretty-print a document, preserving comments
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Render a document on a single line
    Compact {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Keep comments inline
        #[arg(long)]
        comments: bool,
    },
    /// Convert a document to plain JSON (comments stripped)
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show rendering size statistics
    Stats {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { input, output } => {
            let value = load(input.as_deref())?;
            write_output(output.as_deref(), &jonc_core::encode_pretty(&value))?;
        }
        Commands::Compact {
            input,
            output,
            comments,
        } => {
            let value = load(input.as_deref())?;
            let style = Style {
                comments,
                newlines: false,
            };
            write_output(output.as_deref(), &jonc_core::encode(&value, &style))?;
        }
        Commands::Json { input, output } => {
            let value = load(input.as_deref())?;
            let pretty =
                serde_json::to_string_pretty(&value).context("Failed to render plain JSON")?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let value = load(input.as_deref())?;
            let pretty = jonc_core::encode_pretty(&value);
            let compact = jonc_core::encode_compact(&value);
            let json = serde_json::to_string(&value).context("Failed to render plain JSON")?;
            println!("Pretty:      {} bytes", pretty.len());
            println!("Compact:     {} bytes", compact.len());
            println!("Plain JSON:  {} bytes", json.len());
        }
    }

    Ok(())
}

fn load(path: Option<&str>) -> Result<Value> {
    let text = read_input(path)?;
    jonc_core::parse(&text).with_context(|| match path {
        Some(path) => format!("Failed to parse {}", path),
        None => "Failed to parse stdin".to_string(),
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
