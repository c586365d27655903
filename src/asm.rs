//! Two-pass assembler for node programs.
//!
//! The first pass walks the source line by line, encoding every instruction
//! into its slot and recording label bindings and the jumps that reference
//! them. The second pass patches each jump's slot field once every label in
//! the program is known, so forward references need no special handling.

use std::collections::{BTreeMap, HashMap};
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::Op;
use crate::imm::{encode_arith, encode_imm11};
use crate::instructions::{Bits, DST_SHIFT, SLOT_MASK};
use crate::registers::Register;

/// Instruction memory of one node.
pub const MAX_SLOTS: usize = 16;
/// Console line limit of the node's host.
pub const MAX_LINE_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsmConfig {
    /// Longest accepted source line, comment included.
    pub max_line_len: usize,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
        }
    }
}

/// Every variant carries the 1-based source line it was raised on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("line {line}: {len} characters exceeds the limit of {max}")]
    LineTooLong { line: usize, len: usize, max: usize },
    #[error("line {line}: unknown opcode `{token}`")]
    UnknownOpcode { line: usize, token: String },
    #[error("line {line}: `{token}` is not a register")]
    UnknownRegister { line: usize, token: String },
    #[error("line {line}: cannot parse operand `{token}`")]
    UnparsableOperand { line: usize, token: String },
    #[error("line {line}: {op} expects {expected} operand(s)")]
    MissingOperand {
        line: usize,
        op: &'static str,
        expected: u8,
    },
    #[error("line {line}: duplicate label `{label}`")]
    DuplicateLabel { line: usize, label: String },
    #[error("line {line}: program exceeds {max} instructions")]
    TooManyInstructions { line: usize, max: usize },
    #[error("line {line}: jump to undefined label `{label}`")]
    UndefinedLabelReference { line: usize, label: String },
}

impl AsmError {
    pub fn line(&self) -> usize {
        match self {
            AsmError::LineTooLong { line, .. }
            | AsmError::UnknownOpcode { line, .. }
            | AsmError::UnknownRegister { line, .. }
            | AsmError::UnparsableOperand { line, .. }
            | AsmError::MissingOperand { line, .. }
            | AsmError::DuplicateLabel { line, .. }
            | AsmError::TooManyInstructions { line, .. }
            | AsmError::UndefinedLabelReference { line, .. } => *line,
        }
    }
}

/// Assembled words together with the label table they were linked against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub words: Vec<u16>,
    pub labels: BTreeMap<String, u8>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A jump waiting for its label to be resolved.
#[derive(Debug)]
struct Reference<'a> {
    slot: usize,
    label: &'a str,
    line: usize,
}

/// Per-call scratch state; dropped when `assemble_program` returns.
#[derive(Debug, Default)]
struct Pass<'a> {
    words: Vec<u16>,
    labels: HashMap<&'a str, u8>,
    last_labelled: Option<usize>,
    refs: Vec<Reference<'a>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Assembler {
    cfg: AsmConfig,
}

impl Assembler {
    pub fn new(cfg: AsmConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &AsmConfig {
        &self.cfg
    }

    pub fn assemble(&self, text: &str) -> Result<Vec<u16>, AsmError> {
        self.assemble_program(text).map(|p| p.words)
    }

    pub fn assemble_program(&self, text: &str) -> Result<Program, AsmError> {
        let mut pass = Pass::default();
        for (idx, raw) in text.split('\n').enumerate() {
            self.consume_line(&mut pass, idx + 1, raw)?;
        }
        link(&mut pass)?;

        debug!(
            count = pass.words.len(),
            labels = pass.labels.len(),
            "assembled program"
        );
        Ok(Program {
            words: pass.words,
            labels: pass
                .labels
                .into_iter()
                .map(|(name, slot)| (name.to_string(), slot))
                .collect(),
        })
    }

    fn consume_line<'a>(&self, pass: &mut Pass<'a>, line: usize, raw: &'a str) -> Result<(), AsmError> {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let len = raw.chars().count();
        if len > self.cfg.max_line_len {
            return Err(AsmError::LineTooLong {
                line,
                len,
                max: self.cfg.max_line_len,
            });
        }

        let code = raw.find('#').map_or(raw, |p| &raw[..p]);
        let mut tokens = code
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty());

        let Some(mut token) = tokens.next() else {
            return Ok(());
        };
        if let Some(label) = token.strip_suffix(':') {
            bind_label(pass, line, label)?;
            match tokens.next() {
                Some(next) => token = next,
                None => return Ok(()),
            }
        }

        let op = Op::from_mnemonic(token).ok_or_else(|| AsmError::UnknownOpcode {
            line,
            token: token.to_string(),
        })?;
        let slot = pass.words.len();
        if slot >= MAX_SLOTS {
            return Err(AsmError::TooManyInstructions {
                line,
                max: MAX_SLOTS,
            });
        }

        // Tokens past the operand count are ignored.
        let operands: Vec<&'a str> = tokens.take(op.arity() as usize).collect();
        let word = encode(op, &operands, line, slot, &mut pass.refs)?;
        trace!(line, pc = slot, word = format_args!("{word:#06x}"), "encoded");
        pass.words.push(word);
        Ok(())
    }
}

/// Assembles `text` with the default configuration.
pub fn assemble(text: &str) -> Result<Vec<u16>, AsmError> {
    Assembler::default().assemble(text)
}

fn bind_label<'a>(pass: &mut Pass<'a>, line: usize, label: &'a str) -> Result<(), AsmError> {
    let slot = pass.words.len();
    if slot >= MAX_SLOTS {
        return Err(AsmError::TooManyInstructions {
            line,
            max: MAX_SLOTS,
        });
    }
    if pass.last_labelled == Some(slot) || pass.labels.contains_key(label) {
        return Err(AsmError::DuplicateLabel {
            line,
            label: label.to_string(),
        });
    }
    debug!(label, slot, "label bound");
    pass.labels.insert(label, slot as u8);
    pass.last_labelled = Some(slot);
    Ok(())
}

fn encode<'a>(
    op: Op,
    operands: &[&'a str],
    line: usize,
    slot: usize,
    refs: &mut Vec<Reference<'a>>,
) -> Result<u16, AsmError> {
    let arity = op.arity() as usize;
    if operands.len() < arity {
        return Err(AsmError::MissingOperand {
            line,
            op: op.mnemonic(),
            expected: op.arity(),
        });
    }

    let base = op.base_bits();
    let word = match op {
        Op::Nop | Op::Swp | Op::Sav | Op::Neg => base,
        Op::Jmp | Op::Jez | Op::Jnz | Op::Jgz | Op::Jlz => {
            refs.push(Reference {
                slot,
                label: operands[0],
                line,
            });
            base
        }
        Op::Jro => {
            // No immediate field: a literal is a register the word cannot name.
            let token = operands[0];
            let src = Register::from_name(token).ok_or_else(|| match parse_int(token) {
                Some(_) => AsmError::UnknownRegister { line, token: token.to_string() },
                None => AsmError::UnparsableOperand { line, token: token.to_string() },
            })?;
            base | src.code()
        }
        Op::Add | Op::Sub => match source(operands[0], line)? {
            Source::Reg(r) => base | Bits::REG.bits() | r.code(),
            Source::Imm(v) => encode_arith(v, op == Op::Sub),
        },
        Op::Mov => {
            let src = match source(operands[0], line)? {
                Source::Reg(r) => Bits::HIGH.bits() | r.code(),
                Source::Imm(v) => encode_imm11(v),
            };
            let dst = Register::from_name(operands[1]).ok_or_else(|| AsmError::UnparsableOperand {
                line,
                token: operands[1].to_string(),
            })?;
            base | src | (dst.code() << DST_SHIFT)
        }
    };
    Ok(word)
}

enum Source {
    Reg(Register),
    Imm(i64),
}

fn source(token: &str, line: usize) -> Result<Source, AsmError> {
    if let Some(r) = Register::from_name(token) {
        return Ok(Source::Reg(r));
    }
    parse_int(token)
        .map(Source::Imm)
        .ok_or_else(|| AsmError::UnparsableOperand {
            line,
            token: token.to_string(),
        })
}

/// Base-10 with optional sign. Out-of-range literals saturate; the codec
/// clamps them further to the node's range.
fn parse_int(token: &str) -> Option<i64> {
    match token.parse::<i64>() {
        Ok(v) => Some(v),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn link(pass: &mut Pass<'_>) -> Result<(), AsmError> {
    for r in &pass.refs {
        let slot = pass
            .labels
            .get(r.label)
            .copied()
            .ok_or_else(|| AsmError::UndefinedLabelReference {
                line: r.line,
                label: r.label.to_string(),
            })?;
        pass.words[r.slot] |= u16::from(slot) & SLOT_MASK;
        debug!(label = r.label, from = r.slot, to = slot, "linked jump");
    }
    Ok(())
}
