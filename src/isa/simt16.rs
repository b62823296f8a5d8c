use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::decoder::{Decoded, Decoder};
use crate::instructions::{self, Slot};

/// SIMT16 decoder.
/// Words are 16 bits wide with the opcode in bits [15:12]. Matching is
/// driven by [`instructions::TABLE`], the same table the encoder uses, so
/// the two directions cannot drift apart.
pub struct Simt16Decoder;

impl Simt16Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Simt16Decoder {
    fn default() -> Self {
        Self::new()
    }
}

pub const OPCODE_SHIFT: u32 = 12;

// Opcode nibbles, bits [15:12]
pub const OP_BRANCH: u16 = 0b0001;
pub const OP_CMP: u16 = 0b0010;
pub const OP_ADD: u16 = 0b0011;
pub const OP_SUB: u16 = 0b0100;
pub const OP_MUL: u16 = 0b0101;
pub const OP_DIV: u16 = 0b0110;
pub const OP_LDR: u16 = 0b0111;
pub const OP_STR: u16 = 0b1000;
pub const OP_CONST: u16 = 0b1001;
pub const OP_RET: u16 = 0b1111;

pub const COND_SHIFT: u32 = 9;
/// Width of the absolute branch target field, bits [8:0].
pub const TARGET_BITS: u32 = 9;
pub const MAX_TARGET: u16 = (1 << TARGET_BITS) - 1;

pub const NUM_REGS: u8 = 16;
/// Read-only, supplied per thread by the core.
pub const REG_BLOCK_IDX: u8 = 13;
pub const REG_BLOCK_DIM: u8 = 14;
pub const REG_THREAD_IDX: u8 = 15;

bitflags! {
/// Condition mask of the branch opcode, bits [11:9]. CMP leaves exactly
/// one of these set; a branch is taken when its mask intersects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cond: u16 {
const N = 1 << 2; // rs - rt < 0
const Z = 1 << 1; // rs - rt == 0
const P = 1 << 0; // rs - rt > 0
}
}

/// Fixed opcode bits for an opcode nibble with an all-zero body.
pub const fn opcode_bits(op: u16) -> u16 {
    op << OPCODE_SHIFT
}

/// Fixed prefix of a conditional branch taking `cond`.
pub const fn branch_bits(cond: Cond) -> u16 {
    opcode_bits(OP_BRANCH) | (cond.bits() << COND_SHIFT)
}

pub fn is_read_only(reg: u8) -> bool {
    (REG_BLOCK_IDX..NUM_REGS).contains(&reg)
}

impl Decoder for Simt16Decoder {
    fn decode(&self, raw: u16) -> Option<Decoded> {
        let desc = instructions::TABLE
            .iter()
            .find(|d| raw & d.prefix_mask == d.base)?;
        // Reserved bits must be zero
        if raw & !desc.used_bits() != 0 {
            return None;
        }
        let mut d = Decoded::new(desc.op);
        for f in desc.fields {
            let v = f.extract(raw);
            match f.slot {
                Slot::Rd => d.rd = v as u8,
                Slot::Rs => d.rs = v as u8,
                Slot::Rt => d.rt = v as u8,
                Slot::Imm8 => d.imm = v as u8,
                Slot::Target => d.target = v,
            }
        }
        Some(d)
    }
}
