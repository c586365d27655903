use crate::decoder::{Decoded, DecodeError, Decoder, Operand};
use crate::isa::tis::TisDecoder;

/// Canonical text: mnemonic, then operands separated by `", "`.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = d.op.mnemonic();
    match (d.src, d.dst) {
        (None, _) => mn.to_string(),
        (Some(src), None) => format!("{} {}", mn, operand(src)),
        (Some(src), Some(dst)) => format!("{} {}, {}", mn, operand(src), dst),
    }
}

fn operand(o: Operand) -> String {
    match o {
        Operand::Reg(r) => r.to_string(),
        Operand::Imm(v) => v.to_string(),
        Operand::Slot(s) => s.to_string(),
    }
}

/// Decodes one word into canonical mnemonic text.
pub fn disassemble(word: u16) -> Result<String, DecodeError> {
    TisDecoder::new().decode(word).map(|d| fmt_decoded(&d))
}
