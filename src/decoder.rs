use serde::{Deserialize, Serialize};

use crate::registers::Register;

/// The thirteen node opcodes. Discriminants index `instructions::TABLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Op {
    Nop,
    Mov,
    Add,
    Sub,
    Swp,
    Sav,
    Neg,
    Jmp,
    Jez,
    Jnz,
    Jgz,
    Jlz,
    Jro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Reg(Register),
    Imm(i16),
    /// Absolute jump target; label names do not survive encoding.
    Slot(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub src: Option<Operand>,
    pub dst: Option<Register>,
}

impl Decoded {
    pub fn bare(op: Op) -> Self {
        Self { op, src: None, dst: None }
    }

    pub fn unary(op: Op, src: Operand) -> Self {
        Self { op, src: Some(src), dst: None }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid opcode bits in word {word:#06x}")]
    InvalidOpcodeBits { word: u16 },
}

pub trait Decoder {
    fn decode(&self, word: u16) -> Result<Decoded, DecodeError>;
}
