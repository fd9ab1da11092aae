/// Malformed bit-pattern strings. Raised while the instruction table is
/// built, so a bad table is rejected before any byte is decoded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Empty bit pattern")]
    Empty,
    #[error("Template `{template}` is missing the `0b` byte-boundary prefix")]
    MissingPrefix { template: String },
    #[error("Template `{template}` has {len} symbols, expected 8")]
    Length { template: String, len: usize },
    #[error("Template `{template}` contains illegal symbol `{symbol}`")]
    Symbol { template: String, symbol: char },
    #[error("Register field in `{template}` is not contiguous")]
    SplitField { template: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended while a field of an instruction was still owed.
    #[error("Expected {field} for the '{instruction}' instruction at offset {offset}")]
    Truncated {
        instruction: &'static str,
        field: &'static str,
        offset: usize,
    },
    #[error("Unknown opcode {opcode:#010b} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },
    /// An opcode-extension field disagrees with the template that matched.
    #[error("'{instruction}' expects extension {expected:#05b} but found {found:#05b} at offset {offset}")]
    Invariant {
        instruction: &'static str,
        expected: u8,
        found: u8,
        offset: usize,
    },
}

impl DecodeError {
    /// Byte offset the failing field or opcode was expected at.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::Truncated { offset, .. }
            | DecodeError::UnknownOpcode { offset, .. }
            | DecodeError::Invariant { offset, .. } => *offset,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
