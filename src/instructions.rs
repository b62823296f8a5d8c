use crate::decoder::Op;
use crate::isa::simt16::{
    branch_bits, opcode_bits, Cond, OP_ADD, OP_CMP, OP_CONST, OP_DIV, OP_LDR, OP_MUL, OP_RET,
    OP_STR, OP_SUB, TARGET_BITS,
};

/// What an operand slot holds, and where it lands in [`crate::decoder::Decoded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Rd,
    Rs,
    Rt,
    Imm8,
    Target,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub slot: Slot,
    pub shift: u8,
    pub width: u8,
}

impl Field {
    const fn new(slot: Slot, shift: u8, width: u8) -> Self {
        Self { slot, shift, width }
    }

    pub const fn max(&self) -> u16 {
        ((1u32 << self.width) - 1) as u16
    }

    pub const fn mask(&self) -> u16 {
        self.max() << self.shift
    }

    pub fn insert(&self, word: u16, value: u16) -> u16 {
        word | ((value & self.max()) << self.shift)
    }

    pub fn extract(&self, word: u16) -> u16 {
        (word >> self.shift) & self.max()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    /// Fixed opcode bits
    pub base: u16,
    pub prefix_mask: u16,
    /// Operand fields in source order.
    pub fields: &'static [Field],
}

impl InstrDesc {
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Bits owned by the prefix or an operand; everything else is reserved
    /// and always encodes as zero.
    pub fn used_bits(&self) -> u16 {
        self.fields.iter().fold(self.prefix_mask, |m, f| m | f.mask())
    }
}

const OPCODE_MASK: u16 = 0xF000;
const BRANCH_MASK: u16 = 0xFE00;

const RD: Field = Field::new(Slot::Rd, 8, 4);
const RS: Field = Field::new(Slot::Rs, 4, 4);
const RT: Field = Field::new(Slot::Rt, 0, 4);
const IMM8: Field = Field::new(Slot::Imm8, 0, 8);
const TARGET: Field = Field::new(Slot::Target, 0, TARGET_BITS as u8);

const ALU_FIELDS: &[Field] = &[RD, RS, RT];

const fn alu(op: Op, mnemonic: &'static str, opcode: u16) -> InstrDesc {
    InstrDesc {
        op,
        mnemonic,
        base: opcode_bits(opcode),
        prefix_mask: OPCODE_MASK,
        fields: ALU_FIELDS,
    }
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Op::Const,
        mnemonic: "CONST",
        base: opcode_bits(OP_CONST),
        prefix_mask: OPCODE_MASK,
        fields: &[RD, IMM8],
    },
    alu(Op::Add, "ADD", OP_ADD),
    alu(Op::Sub, "SUB", OP_SUB),
    alu(Op::Mul, "MUL", OP_MUL),
    alu(Op::Div, "DIV", OP_DIV),
    InstrDesc {
        op: Op::Ldr,
        mnemonic: "LDR",
        base: opcode_bits(OP_LDR),
        prefix_mask: OPCODE_MASK,
        fields: &[RD, RS],
    },
    // STR Raddr, Rval
    InstrDesc {
        op: Op::Str,
        mnemonic: "STR",
        base: opcode_bits(OP_STR),
        prefix_mask: OPCODE_MASK,
        fields: &[RS, RT],
    },
    InstrDesc {
        op: Op::Cmp,
        mnemonic: "CMP",
        base: opcode_bits(OP_CMP),
        prefix_mask: OPCODE_MASK,
        fields: &[RS, RT],
    },
    InstrDesc {
        op: Op::Brn,
        mnemonic: "BRn",
        base: branch_bits(Cond::N),
        prefix_mask: BRANCH_MASK,
        fields: &[TARGET],
    },
    InstrDesc {
        op: Op::Ret,
        mnemonic: "RET",
        base: opcode_bits(OP_RET),
        prefix_mask: OPCODE_MASK,
        fields: &[],
    },
];

pub fn by_mnemonic(mnemonic: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic == mnemonic)
}

pub fn by_op(op: Op) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.op == op)
}
