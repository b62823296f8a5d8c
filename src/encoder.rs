//! Single-instruction encoder.
//!
//! Every opcode goes through [`Instruction::encode`], which walks the
//! operand fields of the opcode's row in [`crate::instructions::TABLE`].
//! The encoder never touches the program counter; branch targets are
//! absolute addresses taken from the label table.

use crate::assembler::LabelTable;
use crate::instructions::{self, InstrDesc, Slot};
use crate::isa::simt16::{MAX_TARGET, NUM_REGS};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),
    #[error("invalid register `{0}` (expected R0..R15)")]
    InvalidRegister(String),
    #[error("immediate `{0}` does not fit in 8 unsigned bits")]
    ImmediateOutOfRange(String),
    #[error("undefined label `{0}`")]
    UndefinedLabel(String),
    #[error("invalid operand `{0}`")]
    InvalidOperand(String),
    #[error("{mnemonic} takes {expected} operand(s), found {found}")]
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("label `{label}` is at {address:#x}, past the 9-bit branch field")]
    BranchTargetOutOfRange { label: String, address: u16 },
}

/// One parsed source instruction: an opcode row plus its raw operand tokens.
#[derive(Debug, Clone)]
pub struct Instruction<'a> {
    pub desc: &'static InstrDesc,
    pub operands: Vec<&'a str>,
}

impl<'a> Instruction<'a> {
    pub fn new(mnemonic: &str, operands: Vec<&'a str>) -> Result<Self, EncodeError> {
        let desc = instructions::by_mnemonic(mnemonic)
            .ok_or_else(|| EncodeError::UnknownOpcode(mnemonic.to_string()))?;
        Ok(Self { desc, operands })
    }

    /// Register written by this instruction, if its operand parses.
    pub fn dest_register(&self) -> Option<u8> {
        let pos = self.desc.fields.iter().position(|f| f.slot == Slot::Rd)?;
        parse_register(self.operands.get(pos)?).ok()
    }

    pub fn encode(&self, labels: &LabelTable) -> Result<u16, EncodeError> {
        let desc = self.desc;
        if self.operands.len() != desc.arity() {
            return Err(EncodeError::ArityMismatch {
                mnemonic: desc.mnemonic,
                expected: desc.arity(),
                found: self.operands.len(),
            });
        }
        desc.fields
            .iter()
            .zip(&self.operands)
            .try_fold(desc.base, |word, (field, tok)| -> Result<u16, EncodeError> {
                let value = match field.slot {
                    Slot::Rd | Slot::Rs | Slot::Rt => u16::from(parse_register(tok)?),
                    Slot::Imm8 => u16::from(parse_immediate(tok)?),
                    Slot::Target => resolve_target(tok, labels)?,
                };
                Ok(field.insert(word, value))
            })
    }
}

/// Encode one instruction given as a mnemonic and operand tokens.
///
/// `_pc` is accepted for call-site symmetry with the assembler; branch
/// targets are absolute and do not depend on it.
pub fn encode(
    mnemonic: &str,
    operands: &[&str],
    labels: &LabelTable,
    _pc: u16,
) -> Result<u16, EncodeError> {
    Instruction::new(mnemonic, operands.to_vec())?.encode(labels)
}

/// `R<index>`, index in 0..=15. A signed index is a register number out
/// of range, not a malformed operand.
pub fn parse_register(tok: &str) -> Result<u8, EncodeError> {
    let body = tok
        .strip_prefix('R')
        .ok_or_else(|| EncodeError::InvalidOperand(tok.to_string()))?;
    let (negative, digits) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    if !is_decimal(digits) {
        return Err(EncodeError::InvalidOperand(tok.to_string()));
    }
    match digits.parse::<u32>() {
        Ok(n) if !negative && n < u32::from(NUM_REGS) => Ok(n as u8),
        _ => Err(EncodeError::InvalidRegister(tok.to_string())),
    }
}

/// `#<uint>` or `#0x<hex>`, value in 0..=255.
pub fn parse_immediate(tok: &str) -> Result<u8, EncodeError> {
    let invalid = || EncodeError::InvalidOperand(tok.to_string());
    let out_of_range = || EncodeError::ImmediateOutOfRange(tok.to_string());

    let body = tok.strip_prefix('#').ok_or_else(invalid)?;
    let (negative, magnitude) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };
    let value = if let Some(hex) = magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u64::from_str_radix(hex, 16).ok()
    } else {
        if !is_decimal(magnitude) {
            return Err(invalid());
        }
        magnitude.parse::<u64>().ok()
    };
    // Syntactically a number from here on; anything unrepresentable is a range error.
    match value {
        Some(0) => Ok(0),
        Some(v) if !negative => u8::try_from(v).map_err(|_| out_of_range()),
        _ => Err(out_of_range()),
    }
}

fn resolve_target(label: &str, labels: &LabelTable) -> Result<u16, EncodeError> {
    let address = labels
        .get(label)
        .ok_or_else(|| EncodeError::UndefinedLabel(label.to_string()))?;
    if address > MAX_TARGET {
        return Err(EncodeError::BranchTargetOutOfRange {
            label: label.to_string(),
            address,
        });
    }
    Ok(address)
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
