pub mod assembler;
pub mod channels;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod instructions;

pub mod isa {
    pub mod simt16; // 16-bit SIMT GPU instruction set
}

pub use assembler::{assemble, assemble_program, AsmError, AsmErrorKind, Assembly, LabelTable};
pub use channels::{flatten, locate, pad_to, to_logical, to_physical, ChannelAddr, ChannelError};
pub use encoder::{encode, EncodeError};
