use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::Path;

use tis_disasm::{build_report, load_raw_bin, parse_word, render_text};
use tis_rs::disassemble;

#[derive(Parser, Debug)]
#[command(author, version, about = "TIS node disassembler CLI", long_about=None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble words given on the command line (hex or dec)
    Words {
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,
    },
    /// Disassemble a raw little-endian node image slot by slot
    Listing {
        /// Input binary path
        #[arg(value_name = "BINFILE")]
        input: String,
        /// Skip N bytes at start of file before loading
        #[arg(long, default_value_t = 0usize)]
        skip: usize,
        /// Limit bytes loaded (default: to EOF after --skip)
        #[arg(long)]
        len: Option<usize>,
        /// Show instruction bytes (text format only)
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Words { words } => {
            // A bad word is reported in place; the rest are still decoded.
            for w in &words {
                let word = parse_word(w)?;
                match disassemble(word) {
                    Ok(text) => println!("{word:#06x}: {text}"),
                    Err(e) => println!("{word:#06x}: <invalid> ({e})"),
                }
            }
        }
        Command::Listing { input, skip, len, show_bytes, format, out } => {
            let img = load_raw_bin(Path::new(&input), skip, len)?;
            tracing::debug!(slots = img.len(), config = img.config_word(), "loaded image");
            let report = build_report(&img);
            let buf = match format {
                OutputFormat::Text => render_text(&report, show_bytes),
                OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
            };
            if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
        }
    }

    Ok(())
}
