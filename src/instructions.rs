use std::fmt;

use crate::cursor::ByteStream;
use crate::decoder::Decoder;
use crate::error::{DecodeError, PatternError};
use crate::pattern::{BitPattern, Flags};
use crate::prefix::Prefixes;

/// Consumes the operand bytes of one matched instruction and returns its
/// text. The opcode byte has already been read.
pub type Builder = fn(&mut Decoder<'_>, Opcode) -> Result<String, DecodeError>;

#[derive(Clone, Copy)]
pub struct InstrDef {
    pub pattern: &'static str,
    pub mnemonic: &'static str,
    /// Alternate mnemonic appended as a comment, e.g. `jz` for `je`.
    pub alias: Option<&'static str>,
    pub name: &'static str,
    pub build: Builder,
}

impl InstrDef {
    pub const fn new(
        pattern: &'static str,
        mnemonic: &'static str,
        name: &'static str,
        build: Builder,
    ) -> Self {
        Self { pattern, mnemonic, alias: None, name, build }
    }

    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }
}

impl fmt::Debug for InstrDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrDef")
            .field("pattern", &self.pattern)
            .field("mnemonic", &self.mnemonic)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The opcode byte as seen through the pattern that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub alias: Option<&'static str>,
    pub name: &'static str,
    pub flags: Flags,
    pub reg: u8,
    pub extension: Option<u8>,
}

impl Opcode {
    pub fn wide(&self) -> bool {
        self.flags.contains(Flags::W)
    }

    pub fn reg_is_destination(&self) -> bool {
        self.flags.contains(Flags::D)
    }

    pub fn sign_extended(&self) -> bool {
        self.flags.contains(Flags::S)
    }

    pub fn count_in_cl(&self) -> bool {
        self.flags.contains(Flags::V)
    }
}

#[derive(Clone)]
pub struct Entry {
    pub name: &'static str,
    pub mnemonic: &'static str,
    pub alias: Option<&'static str>,
    pub pattern: BitPattern,
    pub(crate) build: Builder,
}

impl Entry {
    pub fn opcode(&self, byte: u8) -> Opcode {
        Opcode {
            mnemonic: self.mnemonic,
            alias: self.alias,
            name: self.name,
            flags: self.pattern.flags(byte),
            reg: self.pattern.register(byte),
            extension: self.pattern.extension(),
        }
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Parsed instruction definitions, searched in declaration order.
#[derive(Debug, Clone)]
pub struct InstructionTable {
    entries: Vec<Entry>,
    prefixes: Prefixes,
}

impl InstructionTable {
    pub fn new(defs: &[InstrDef]) -> Result<Self, PatternError> {
        let entries = defs
            .iter()
            .map(|def| {
                Ok(Entry {
                    name: def.name,
                    mnemonic: def.mnemonic,
                    alias: def.alias,
                    pattern: BitPattern::parse(def.pattern)?,
                    build: def.build,
                })
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self { entries, prefixes: Prefixes::new()? })
    }

    /// First entry whose pattern accepts `opcode` and the bytes after it.
    pub fn lookup(&self, opcode: u8, stream: &ByteStream<'_>) -> Option<&Entry> {
        self.entries.iter().find(|e| e.pattern.matches(opcode, stream))
    }

    pub fn prefixes(&self) -> &Prefixes {
        &self.prefixes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}
