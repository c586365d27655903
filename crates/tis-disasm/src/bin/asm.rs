use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tis_rs::{AsmConfig, Assembler, NodeImage, Program};

#[derive(Parser, Debug)]
#[command(author, version, about = "TIS node assembler")]
struct Opts {
    /// Input assembly file (one instruction per line, at most 16)
    #[arg(short, long)]
    input: PathBuf,
    /// Output file
    #[arg(short, long)]
    output: PathBuf,
    /// Output format: raw little-endian words, one hex word per line, or JSON
    #[arg(long, value_enum, default_value_t = Format::Bin)]
    format: Format,
    /// Longest accepted source line, comments included
    #[arg(long, default_value_t = AsmConfig::default().max_line_len)]
    max_line_len: usize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format { Bin, Hex, Json }

fn render(program: &Program, format: Format) -> Result<Vec<u8>> {
    Ok(match format {
        Format::Bin => NodeImage::new(program.words.clone())?.to_le_bytes(),
        Format::Hex => program
            .words
            .iter()
            .map(|w| format!("{w:#06x}\n"))
            .collect::<String>()
            .into_bytes(),
        Format::Json => (serde_json::to_string_pretty(program)? + "\n").into_bytes(),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let asm = Assembler::new(AsmConfig { max_line_len: opts.max_line_len });
    let program = asm
        .assemble_program(&text)
        .with_context(|| format!("assembling {}", opts.input.display()))?;
    tracing::info!(count = program.len(), "assembled");
    fs::write(&opts.output, render(&program, opts.format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn program() -> Program {
        Assembler::default()
            .assemble_program("L: MOV UP, ACC\nADD ACC\nMOV ACC, DOWN\nJMP L")
            .unwrap()
    }

    #[test]
    fn hex_output() {
        let out = render(&program(), Format::Hex).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0xc802\n0x0801\n0xd801\n0x7000\n");
    }

    #[test]
    fn bin_output() {
        let out = render(&program(), Format::Bin).unwrap();
        assert_eq!(out, vec![0x02, 0xC8, 0x01, 0x08, 0x01, 0xD8, 0x00, 0x70]);
    }

    #[test]
    fn bin_output_rejects_empty_program() {
        assert!(render(&Program::default(), Format::Bin).is_err());
    }

    #[test]
    fn json_output_has_labels() {
        let out = render(&program(), Format::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["labels"]["L"], 0);
        assert_eq!(v["words"][3], 0x7000);
    }
}
