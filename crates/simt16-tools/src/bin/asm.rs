use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use simt16::assemble_program;
use simt16_tools::{render_program, ProgramFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "SIMT16 assembler")]
struct Opts {
    /// Input assembly file (one instruction or label per line)
    #[arg(short, long)]
    input: PathBuf,
    /// Output program image
    #[arg(short, long)]
    output: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = ProgramFormat::Bin)]
    format: ProgramFormat,
    /// Export the label table as JSON
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let text = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let asm = assemble_program(&text)
        .with_context(|| format!("assembling {}", opts.input.display()))?;

    let image = render_program(&asm.words, opts.format)?;
    fs::write(&opts.output, image)
        .with_context(|| format!("writing {}", opts.output.display()))?;
    if let Some(path) = &opts.labels_out {
        if asm.labels.is_empty() {
            warn!("no labels defined; {} will hold an empty table", path.display());
        }
        fs::write(path, serde_json::to_string_pretty(&asm.labels)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    info!(
        words = asm.words.len(),
        labels = asm.labels.len(),
        "wrote {}",
        opts.output.display()
    );
    Ok(())
}
