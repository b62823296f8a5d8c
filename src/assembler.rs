//! Two-pass assembler.
//!
//! Pass 1 binds every `NAME:` line to the number of instructions seen before
//! it. Pass 2 encodes the remaining lines in order, so a branch may name a
//! label that is defined further down. Any error aborts the whole build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::encoder::{EncodeError, Instruction};
use crate::isa::simt16::is_read_only;

/// Label name to absolute program address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    map: BTreeMap<String, u16>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`. Returns `false` (and keeps the first
    /// binding) when the name is already taken.
    pub fn define(&mut self, name: &str, address: u16) -> bool {
        if self.map.contains_key(name) {
            return false;
        }
        self.map.insert(name.to_string(), address);
        true
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("label `{0}` is already defined")]
    DuplicateLabel(String),
    #[error("malformed line: {0}")]
    MalformedLine(String),
}

/// An assembly failure, pinned to a 1-based line of the original source.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind} (`{text}`)")]
pub struct AsmError {
    pub line: usize,
    pub text: String,
    pub kind: AsmErrorKind,
}

impl AsmError {
    fn new(src: &SourceLine<'_>, kind: impl Into<AsmErrorKind>) -> Self {
        Self {
            line: src.number,
            text: src.raw.to_string(),
            kind: kind.into(),
        }
    }

    /// The encoder error behind this failure, if it came from pass 2.
    pub fn encode_error(&self) -> Option<&EncodeError> {
        match &self.kind {
            AsmErrorKind::Encode(e) => Some(e),
            _ => None,
        }
    }
}

/// Output of a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub words: Vec<u16>,
    pub labels: LabelTable,
}

#[derive(Debug, Clone, Copy)]
struct SourceLine<'a> {
    number: usize,
    raw: &'a str,
    code: &'a str,
}

impl<'a> SourceLine<'a> {
    fn label(&self) -> Option<&'a str> {
        self.code.strip_suffix(':')
    }
}

/// Strip `;` comments and surrounding whitespace, drop blank lines.
fn preprocess(text: &str) -> Vec<SourceLine<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let code = raw.split(';').next().unwrap_or("").trim();
            (!code.is_empty()).then_some(SourceLine {
                number: i + 1,
                raw,
                code,
            })
        })
        .collect()
}

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Any name a branch operand can spell: non-empty, no separators.
fn is_label_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(is_separator)
}

fn tokenize(code: &str) -> Vec<&str> {
    code.split(is_separator).filter(|t| !t.is_empty()).collect()
}

fn collect_labels(lines: &[SourceLine<'_>]) -> Result<LabelTable, AsmError> {
    let mut labels = LabelTable::new();
    let mut count: u16 = 0;
    for src in lines {
        let Some(name) = src.label() else {
            count = count.checked_add(1).ok_or_else(|| {
                AsmError::new(src, AsmErrorKind::MalformedLine("program too long".into()))
            })?;
            continue;
        };
        let name = name.trim_end();
        if !is_label_name(name) {
            return Err(AsmError::new(
                src,
                AsmErrorKind::MalformedLine(format!("bad label name `{name}`")),
            ));
        }
        if !labels.define(name, count) {
            return Err(AsmError::new(src, AsmErrorKind::DuplicateLabel(name.into())));
        }
        debug!(label = name, address = count, "label bound");
    }
    Ok(labels)
}

/// Assemble `text` and return the words together with the label table.
pub fn assemble_program(text: &str) -> Result<Assembly, AsmError> {
    let lines = preprocess(text);
    let labels = collect_labels(&lines)?;

    let mut words = Vec::with_capacity(lines.len());
    for src in lines.iter().filter(|l| l.label().is_none()) {
        let pc = words.len();
        let mut tokens = tokenize(src.code);
        if tokens.is_empty() {
            return Err(AsmError::new(
                src,
                AsmErrorKind::MalformedLine("no opcode".into()),
            ));
        }
        let operands = tokens.split_off(1);
        let instr = Instruction::new(tokens[0], operands).map_err(|e| AsmError::new(src, e))?;
        let word = instr.encode(&labels).map_err(|e| AsmError::new(src, e))?;
        if let Some(rd) = instr.dest_register().filter(|r| is_read_only(*r)) {
            warn!(line = src.number, "R{rd} is read-only; the write will be ignored");
        }
        trace!("{pc:03x}: {word:04x}  {}", src.code);
        words.push(word);
    }
    debug!(words = words.len(), labels = labels.len(), "assembled");
    Ok(Assembly { words, labels })
}

/// Assemble `text` into program words; index is the program counter.
pub fn assemble(text: &str) -> Result<Vec<u16>, AsmError> {
    assemble_program(text).map(|a| a.words)
}
