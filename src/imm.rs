//! Sign-magnitude immediates.
//!
//! MOV carries an 11-bit field: sign at bit 10, magnitude in bits 9..0.
//! ADD/SUB carry a 10-bit magnitude with the sign in the dedicated bit just
//! above it, which is also the bit that tells SUB from ADD. Values beyond the
//! node's range saturate rather than fail.

use crate::instructions::Bits;

/// Largest magnitude the node accepts.
pub const IMM_LIMIT: i64 = 999;
pub const IMM10_MASK: u16 = 0x03FF;
pub const IMM11_MASK: u16 = 0x07FF;

fn sign_magnitude(value: i64) -> u16 {
    let v = value.clamp(-IMM_LIMIT, IMM_LIMIT);
    let magnitude = v.unsigned_abs() as u16;
    if v < 0 {
        magnitude | Bits::SIGN.bits()
    } else {
        magnitude
    }
}

/// MOV immediate, bits 10..0.
pub fn encode_imm11(value: i64) -> u16 {
    sign_magnitude(value) & IMM11_MASK
}

/// ADD/SUB immediate: magnitude in bits 9..0, sign in bit 10.
pub fn encode_imm10(value: i64) -> u16 {
    sign_magnitude(value)
}

/// Operand field of `ADD value` or `SUB value`.
///
/// Bit 10 doubles as the SUB selector, so SUB flips the sign of the packed
/// literal: `SUB 5` and `ADD -5` share a word, and `SUB 0` keeps the bit set.
/// Callers pass the literal as written.
pub fn encode_arith(value: i64, subtract: bool) -> u16 {
    let field = encode_imm10(value);
    if subtract {
        field ^ Bits::SIGN.bits()
    } else {
        field
    }
}

pub fn decode_imm11(word: u16) -> i16 {
    let magnitude = (word & IMM10_MASK) as i16;
    if Bits::from_bits_truncate(word).contains(Bits::SIGN) {
        -magnitude
    } else {
        magnitude
    }
}

/// Magnitude only; the sign bit selects SUB and is read by the decoder.
pub fn decode_imm10(word: u16) -> u16 {
    word & IMM10_MASK
}
