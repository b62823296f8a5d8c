use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use simt16::disasm::disassemble;
use simt16_tools::{
    analyze_dump, layout_image, load_program, load_values, render_dump, render_layout,
    ProgramFormat,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "SIMT16 host tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Disassemble a program image into a re-assemblable listing
    Disasm {
        /// Program image path
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Image format
        #[arg(long, value_enum, default_value_t = ProgramFormat::Bin)]
        format: ProgramFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Lay out logical data across memory channels before a run
    Layout {
        /// Data values (JSON array or whitespace/comma separated)
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Number of memory channels
        #[arg(long, default_value_t = 4usize)]
        channels: usize,
        /// Zero-pad the image to this many addresses
        #[arg(long)]
        size: Option<usize>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Inspect a data memory dump read back after a run
    Analyze {
        /// Dump values (JSON array or whitespace/comma separated)
        #[arg(value_name = "FILE")]
        input: PathBuf,
        /// Number of memory channels
        #[arg(long, default_value_t = 4usize)]
        channels: usize,
        /// Values per line in the row view
        #[arg(long, default_value_t = 4usize)]
        row_width: usize,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn emit(text: String, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Disasm { input, format, out } => {
            let words = load_program(&input, format)?;
            info!(words = words.len(), "loaded program");
            emit(disassemble(&words), out)?;
        }
        Command::Layout {
            input,
            channels,
            size,
            format,
            out,
        } => {
            let data = load_values(&input)?;
            let report = layout_image(&data, channels, size)?;
            let text = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
                OutputFormat::Text => render_layout(&report),
            };
            emit(text, out)?;
        }
        Command::Analyze {
            input,
            channels,
            row_width,
            format,
            out,
        } => {
            let data = load_values(&input)?;
            let report = analyze_dump(&data, channels, row_width)?;
            let text = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report)? + "\n",
                OutputFormat::Text => render_dump(&report),
            };
            emit(text, out)?;
        }
    }
    Ok(())
}
