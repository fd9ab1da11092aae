use std::fmt;

pub const BYTE_REGISTERS: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];
pub const WORD_REGISTERS: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];
pub const SEGMENT_REGISTERS: [&str; 4] = ["es", "cs", "ss", "ds"];

/// Effective-address bases indexed by R/M.
pub const EQUATIONS: [&str; 8] = [
    "bx + si", "bx + di", "bp + si", "bp + di", "si", "di", "bp", "bx",
];

/// R/M value that means a direct 16-bit address under MOD=00.
pub const DIRECT_ADDRESS: u8 = 0b110;

pub fn register(field: u8, wide: bool) -> &'static str {
    let table = if wide { &WORD_REGISTERS } else { &BYTE_REGISTERS };
    table[usize::from(field & 0b111)]
}

pub fn segment_register(field: u8) -> &'static str {
    SEGMENT_REGISTERS[usize::from(field & 0b11)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Memory,
    Memory8,
    Memory16,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModRm {
    pub mode: Mode,
    pub reg: u8,
    pub rm: u8,
}

impl ModRm {
    pub fn parse(byte: u8) -> Self {
        let mode = match byte >> 6 {
            0b00 => Mode::Memory,
            0b01 => Mode::Memory8,
            0b10 => Mode::Memory16,
            _ => Mode::Register,
        };
        Self { mode, reg: (byte >> 3) & 0b111, rm: byte & 0b111 }
    }

    pub fn is_register(&self) -> bool {
        self.mode == Mode::Register
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Displacement {
    None,
    Byte(i8),
    Word(i16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    Direct(u16),
    Equation(&'static str, Displacement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveAddress {
    pub base: Base,
    pub segment: Option<&'static str>,
}

impl fmt::Display for EffectiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(segment) = self.segment {
            write!(f, "{segment}:")?;
        }
        let (equation, displacement) = match self.base {
            Base::Direct(address) => return write!(f, "[{address}]"),
            Base::Equation(equation, Displacement::None) => return write!(f, "[{equation}]"),
            Base::Equation(equation, Displacement::Byte(d)) => (equation, i16::from(d)),
            Base::Equation(equation, Displacement::Word(d)) => (equation, d),
        };
        if displacement < 0 {
            write!(f, "[{equation} - {}]", displacement.unsigned_abs())
        } else {
            write!(f, "[{equation} + {displacement}]")
        }
    }
}

/// A register or memory operand resolved from a ModRM byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Register(&'static str),
    Memory(EffectiveAddress),
}

impl Operand {
    pub fn is_memory(&self) -> bool {
        matches!(self, Operand::Memory(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(name) => f.write_str(name),
            Operand::Memory(ea) => write!(f, "{ea}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Immediate {
    /// Raw value widened to 16 bits.
    pub value: u16,
    pub wide: bool,
}

impl Immediate {
    pub fn new(value: u16, wide: bool) -> Self {
        Self { value, wide }
    }

    /// One data byte sign-extended into a word operand.
    pub fn sign_extended(byte: u8) -> Self {
        Self { value: byte as i8 as i16 as u16, wide: true }
    }

    /// Value reinterpreted as signed in its own width.
    pub fn signed(&self) -> i16 {
        if self.wide {
            self.value as i16
        } else {
            i16::from(self.value as u8 as i8)
        }
    }
}
