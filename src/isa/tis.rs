use crate::decoder::{Decoded, DecodeError, Decoder, Op, Operand};
use crate::imm::{decode_imm10, decode_imm11};
use crate::instructions::{Bits, DST_SHIFT, SLOT_MASK};
use crate::registers::Register;

/// Decoder for the 16-bit execution node word.
///
/// Formats are told apart by the top four bits, checked in a fixed order:
/// register MOV, immediate MOV, absolute jumps, JRO, the fixed-word group
/// (NEG/SWP/SAV), NOP, and finally ADD/SUB.
#[derive(Debug, Default, Clone, Copy)]
pub struct TisDecoder;

impl TisDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for TisDecoder {
    fn decode(&self, word: u16) -> Result<Decoded, DecodeError> {
        let bits = Bits::from_bits_truncate(word);
        let invalid = DecodeError::InvalidOpcodeBits { word };
        let dst = Register::from_code(word >> DST_SHIFT);
        let src = Register::from_code(word);

        if bits.contains(Bits::MOV | Bits::HIGH) {
            // MOV <SRC>, <DST>
            return Ok(Decoded {
                op: Op::Mov,
                src: Some(Operand::Reg(src)),
                dst: Some(dst),
            });
        }
        if bits.contains(Bits::MOV) {
            // MOV <imm11>, <DST>
            return Ok(Decoded {
                op: Op::Mov,
                src: Some(Operand::Imm(decode_imm11(word))),
                dst: Some(dst),
            });
        }
        if bits.contains(Bits::HIGH | Bits::BRANCH | Bits::ABSOLUTE) {
            // JMP, JEZ, JNZ, JGZ, JLZ; the slot is all that remains of the label
            let op = Op::from_jump_bits(word & !SLOT_MASK).ok_or(invalid)?;
            let slot = (word & SLOT_MASK) as u8;
            return Ok(Decoded::unary(op, Operand::Slot(slot)));
        }
        if bits.contains(Bits::HIGH | Bits::BRANCH) {
            return Ok(Decoded::unary(Op::Jro, Operand::Reg(src)));
        }
        if bits.contains(Bits::HIGH) {
            return [Op::Neg, Op::Swp, Op::Sav]
                .into_iter()
                .find(|op| op.base_bits() == word)
                .map(Decoded::bare)
                .ok_or(invalid);
        }
        if word == 0 {
            return Ok(Decoded::bare(Op::Nop));
        }

        let op = if bits.contains(Bits::SIGN) { Op::Sub } else { Op::Add };
        let operand = if bits.contains(Bits::REG) {
            Operand::Reg(src)
        } else {
            Operand::Imm(decode_imm10(word) as i16)
        };
        Ok(Decoded::unary(op, operand))
    }
}
