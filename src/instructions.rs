use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::decoder::Op;

bitflags! {
/// Format-selecting bits of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bits: u16 {
const MOV = 1 << 15;
const HIGH = 1 << 14;     // MOV: register source; otherwise SWP/SAV/NEG/jumps
const BRANCH = 1 << 13;
const ABSOLUTE = 1 << 12; // absolute-target jump (not JRO)
const REG = 1 << 11;      // ADD/SUB register operand; NEG selector
const SIGN = 1 << 10;     // immediate sign, doubles as the SUB selector
}
}

pub const SLOT_MASK: u16 = 0x003F;
pub const DST_SHIFT: u16 = 11;

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    /// Number of operand tokens the assembler consumes.
    pub arity: u8,
    /// Identifying bits with all operand fields zero.
    pub base: u16,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Op::Nop,
        mnemonic: "NOP",
        arity: 0,
        base: 0x0000,
    },
    InstrDesc {
        op: Op::Mov,
        mnemonic: "MOV",
        arity: 2,
        base: 0x8000,
    },
    InstrDesc {
        op: Op::Add,
        mnemonic: "ADD",
        arity: 1,
        base: 0x0000,
    },
    InstrDesc {
        op: Op::Sub,
        mnemonic: "SUB",
        arity: 1,
        base: 0x0400,
    },
    InstrDesc {
        op: Op::Swp,
        mnemonic: "SWP",
        arity: 0,
        base: 0x5000,
    },
    InstrDesc {
        op: Op::Sav,
        mnemonic: "SAV",
        arity: 0,
        base: 0x4000,
    },
    InstrDesc {
        op: Op::Neg,
        mnemonic: "NEG",
        arity: 0,
        base: 0x4800,
    },
    InstrDesc {
        op: Op::Jmp,
        mnemonic: "JMP",
        arity: 1,
        base: 0x7000,
    },
    InstrDesc {
        op: Op::Jez,
        mnemonic: "JEZ",
        arity: 1,
        base: 0x7040,
    },
    InstrDesc {
        op: Op::Jnz,
        mnemonic: "JNZ",
        arity: 1,
        base: 0x70C0,
    },
    InstrDesc {
        op: Op::Jgz,
        mnemonic: "JGZ",
        arity: 1,
        base: 0x7100,
    },
    InstrDesc {
        op: Op::Jlz,
        mnemonic: "JLZ",
        arity: 1,
        base: 0x7080,
    },
    InstrDesc {
        op: Op::Jro,
        mnemonic: "JRO",
        arity: 1,
        base: 0x6000,
    },
];

const LABEL_JUMPS: [Op; 5] = [Op::Jmp, Op::Jez, Op::Jnz, Op::Jgz, Op::Jlz];

impl Op {
    pub fn desc(self) -> &'static InstrDesc {
        &TABLE[self as usize]
    }

    /// Exact, case-sensitive match against the three-letter mnemonics.
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        if s.len() != 3 {
            return None;
        }
        TABLE.iter().find(|d| d.mnemonic == s).map(|d| d.op)
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn arity(self) -> u8 {
        self.desc().arity
    }

    pub fn base_bits(self) -> u16 {
        self.desc().base
    }

    /// Jumps whose operand is a label resolved to an absolute slot.
    pub fn is_label_jump(self) -> bool {
        LABEL_JUMPS.contains(&self)
    }

    /// Inverse of `base_bits` over the absolute jumps, for a word with its
    /// slot field cleared.
    pub fn from_jump_bits(bits: u16) -> Option<Self> {
        LABEL_JUMPS.iter().copied().find(|op| op.base_bits() == bits)
    }
}
