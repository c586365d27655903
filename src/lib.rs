pub mod asm;
pub mod decoder;
pub mod disasm;
pub mod imm;
pub mod instructions;
pub mod node;
pub mod registers;

pub mod isa {
    pub mod tis; // 16-bit execution node word
}

pub use asm::{assemble, AsmConfig, AsmError, Assembler, Program};
pub use decoder::{DecodeError, Decoded, Decoder, Op, Operand};
pub use disasm::{disassemble, fmt_decoded};
pub use node::{NodeError, NodeImage};
pub use registers::Register;
