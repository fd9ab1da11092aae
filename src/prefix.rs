use crate::cursor::ByteStream;
use crate::error::PatternError;
use crate::operand::segment_register;
use crate::pattern::{BitPattern, Flags};

const LOCK: &str = "0b11110000";
const REPEAT: &str = "0b1111001z";
const SEGMENT: &str = "0b001rr110";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFamily {
    Move,
    Compare,
    Scan,
    Load,
    Store,
}

const STRING_FAMILIES: [(StringFamily, &str); 5] = [
    (StringFamily::Move, "0b1010010w"),
    (StringFamily::Compare, "0b1010011w"),
    (StringFamily::Scan, "0b1010111w"),
    (StringFamily::Load, "0b1010110w"),
    (StringFamily::Store, "0b1010101w"),
];

/// Instruction prefixes recognised ahead of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Segment(&'static str),
    Lock,
    Repeat(&'static str),
}

impl Prefix {
    pub fn text(&self) -> &'static str {
        match self {
            Prefix::Segment(name) => *name,
            Prefix::Lock => "lock",
            Prefix::Repeat(text) => *text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prefixes {
    lock: BitPattern,
    repeat: BitPattern,
    segment: BitPattern,
    strings: Vec<(StringFamily, BitPattern)>,
}

impl Prefixes {
    pub fn new() -> Result<Self, PatternError> {
        let strings = STRING_FAMILIES
            .iter()
            .map(|(family, src)| Ok((*family, BitPattern::parse(src)?)))
            .collect::<Result<Vec<_>, PatternError>>()?;
        Ok(Self {
            lock: BitPattern::parse(LOCK)?,
            repeat: BitPattern::parse(REPEAT)?,
            segment: BitPattern::parse(SEGMENT)?,
            strings,
        })
    }

    pub fn segment(&self, byte: u8) -> Option<Prefix> {
        self.segment
            .matches_byte(byte)
            .then(|| Prefix::Segment(segment_register(self.segment.register(byte))))
    }

    /// LOCK, or a REP variant chosen by the string instruction that follows.
    /// Compare and scan honour the Z bit; every other case is plain `rep`.
    pub fn lock_or_repeat(&self, byte: u8, stream: &ByteStream<'_>) -> Option<Prefix> {
        if self.lock.matches_byte(byte) {
            return Some(Prefix::Lock);
        }
        if !self.repeat.matches_byte(byte) {
            return None;
        }
        let zero = self.repeat.flags(byte).contains(Flags::Z);
        let text = match stream.peek(1).and_then(|next| self.string_family(next)) {
            Some(StringFamily::Compare | StringFamily::Scan) if zero => "repz",
            Some(StringFamily::Compare | StringFamily::Scan) => "repnz",
            _ => "rep",
        };
        Some(Prefix::Repeat(text))
    }

    pub fn string_family(&self, byte: u8) -> Option<StringFamily> {
        self.strings
            .iter()
            .find(|(_, p)| p.matches_byte(byte))
            .map(|(family, _)| *family)
    }
}
