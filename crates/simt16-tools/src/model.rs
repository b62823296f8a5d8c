use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use std::fmt::Write as _;
use std::path::Path;

/// On-disk representation of a program image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgramFormat {
    /// Raw little-endian u16 words
    Bin,
    /// One hex word per line
    Hex,
    /// One 16-digit binary word per line
    Bits,
    /// JSON array of integers
    Json,
}

pub fn render_program(words: &[u16], format: ProgramFormat) -> Result<Vec<u8>> {
    let out: Vec<u8> = match format {
        ProgramFormat::Bin => words.iter().flat_map(|w| w.to_le_bytes()).collect(),
        ProgramFormat::Hex => lines(words, |s, w| writeln!(s, "{w:04x}")).into_bytes(),
        ProgramFormat::Bits => lines(words, |s, w| writeln!(s, "{w:016b}")).into_bytes(),
        ProgramFormat::Json => serde_json::to_vec_pretty(words)?,
    };
    Ok(out)
}

fn lines(words: &[u16], f: impl Fn(&mut String, u16) -> std::fmt::Result) -> String {
    let mut s = String::new();
    for &w in words {
        let _ = f(&mut s, w);
    }
    s
}

pub fn parse_program(bytes: &[u8], format: ProgramFormat) -> Result<Vec<u16>> {
    match format {
        ProgramFormat::Bin => {
            anyhow::ensure!(bytes.len() % 2 == 0, "odd byte count {} in binary image", bytes.len());
            Ok(bytes
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]]))
                .collect())
        }
        ProgramFormat::Hex | ProgramFormat::Bits => {
            let text = std::str::from_utf8(bytes).context("program text is not UTF-8")?;
            let radix = if format == ProgramFormat::Hex { 16 } else { 2 };
            tokens(text)
                .map(|t| {
                    let prefix = if radix == 16 { "0x" } else { "0b" };
                    let digits = t.strip_prefix(prefix).unwrap_or(t);
                    u16::from_str_radix(digits, radix).map_err(|e| anyhow!("bad word `{t}`: {e}"))
                })
                .collect()
        }
        ProgramFormat::Json => Ok(serde_json::from_slice(bytes)?),
    }
}

/// Whitespace/comma separated tokens, `#` and `;` start a comment.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|l| l.split(['#', ';']).next().unwrap_or(""))
        .flat_map(|l| l.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|t| !t.is_empty())
}

pub fn parse_num(s: &str) -> Result<i64> {
    let t = s.trim();
    let (neg, t) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t),
    };
    let v = if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)?
    } else {
        t.parse::<i64>()?
    };
    Ok(if neg { -v } else { v })
}

/// Memory values as a JSON array or as loose numbers (decimal or 0x hex).
pub fn parse_values(text: &str) -> Result<Vec<i64>> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }
    tokens(text)
        .map(|t| parse_num(t).with_context(|| format!("bad value `{t}`")))
        .collect()
}

pub fn load_program(path: &Path, format: ProgramFormat) -> Result<Vec<u16>> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_program(&bytes, format)
}

pub fn load_values(path: &Path) -> Result<Vec<i64>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_values(&text)
}
