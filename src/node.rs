use serde::{Deserialize, Serialize};

use crate::asm::MAX_SLOTS;
use crate::decoder::DecodeError;
use crate::disasm::disassemble;

/// Instruction count as held by the node's config register (count - 1).
pub const CONFIG_COUNT_MASK: u16 = 0xF;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("a node needs at least one instruction")]
    Empty,
    #[error("{count} instructions do not fit in {} slots", MAX_SLOTS)]
    TooLarge { count: usize },
    #[error("image has an odd byte count ({len})")]
    OddLength { len: usize },
}

/// Contents of one node's instruction memory, ready to be copied into the
/// instruction registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawImage")]
pub struct NodeImage {
    words: Vec<u16>,
}

#[derive(Deserialize)]
struct RawImage {
    words: Vec<u16>,
}

impl TryFrom<RawImage> for NodeImage {
    type Error = NodeError;

    fn try_from(raw: RawImage) -> Result<Self, NodeError> {
        Self::new(raw.words)
    }
}

/// One line of a listing. A bad word only affects its own entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub slot: usize,
    pub word: u16,
    pub text: Result<String, DecodeError>,
}

impl NodeImage {
    pub fn new(words: Vec<u16>) -> Result<Self, NodeError> {
        if words.is_empty() {
            return Err(NodeError::Empty);
        }
        if words.len() > MAX_SLOTS {
            return Err(NodeError::TooLarge { count: words.len() });
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; an image holds at least one word.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Value for the config register: 0 selects one instruction, 15 sixteen.
    pub fn config_word(&self) -> u16 {
        (self.words.len() as u16 - 1) & CONFIG_COUNT_MASK
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, NodeError> {
        if bytes.len() % 2 != 0 {
            return Err(NodeError::OddLength { len: bytes.len() });
        }
        let words = bytes
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect();
        Self::new(words)
    }

    pub fn listing(&self) -> Vec<Line> {
        self.words
            .iter()
            .enumerate()
            .map(|(slot, &word)| Line {
                slot,
                word,
                text: disassemble(word),
            })
            .collect()
    }
}
