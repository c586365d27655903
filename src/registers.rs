use std::fmt;

use serde::{Deserialize, Serialize};

/// Node register or port, addressed by a 3-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Register {
    Nil = 0b000,
    Acc = 0b001,
    Up = 0b010,
    Down = 0b011,
    Left = 0b100,
    Right = 0b101,
    Any = 0b110,
    Last = 0b111,
}

pub const REGISTER_MASK: u16 = 0b111;

impl Register {
    pub const ALL: [Register; 8] = [
        Register::Nil,
        Register::Acc,
        Register::Up,
        Register::Down,
        Register::Left,
        Register::Right,
        Register::Any,
        Register::Last,
    ];

    /// Exact, case-sensitive lookup. `None` means "unknown register"; the
    /// caller decides whether that is an error.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.name() == name)
    }

    /// Only the low three bits of `code` are used.
    pub fn from_code(code: u16) -> Self {
        Self::ALL[(code & REGISTER_MASK) as usize]
    }

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Nil => "NIL",
            Register::Acc => "ACC",
            Register::Up => "UP",
            Register::Down => "DOWN",
            Register::Left => "LEFT",
            Register::Right => "RIGHT",
            Register::Any => "ANY",
            Register::Last => "LAST",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_codes_agree() {
        for (code, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.code(), code as u16);
            assert_eq!(Register::from_code(code as u16), *reg);
            assert_eq!(Register::from_name(reg.name()), Some(*reg));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Register::from_name("acc"), None);
        assert_eq!(Register::from_name("UPX"), None);
        assert_eq!(Register::from_name("U"), None);
        assert_eq!(Register::from_name(""), None);
    }

    #[test]
    fn code_is_masked() {
        assert_eq!(Register::from_code(0xFFF9), Register::Acc);
    }
}
