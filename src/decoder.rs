use serde::{Deserialize, Serialize};

use crate::instructions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Const,
    Add,
    Sub,
    Mul,
    Div,
    Ldr,
    Str,
    Cmp,
    Brn,
    Ret,
}

impl Op {
    pub fn mnemonic(self) -> &'static str {
        instructions::by_op(self).map_or("???", |d| d.mnemonic)
    }
}

/// A machine word split back into its fields. Fields the opcode does not
/// use are left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub rd: u8,
    pub rs: u8,
    pub rt: u8,
    pub imm: u8,
    pub target: u16, // absolute program address (BRn)
}

impl Decoded {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            rd: 0,
            rs: 0,
            rt: 0,
            imm: 0,
            target: 0,
        }
    }
}

pub trait Decoder {
    fn decode(&self, raw: u16) -> Option<Decoded>;
}
