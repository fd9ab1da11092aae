//! Opcode bit patterns.
//!
//! A pattern is one or more byte templates joined by `|`. Every template is
//! `0b` followed by exactly eight symbols, most significant bit first:
//!
//! * `0` / `1` fixed bits that must match,
//! * `d` `w` `s` `v` `z` named single-bit flags,
//! * `r` a register field, packed and right-aligned on extraction,
//! * `m` `o` `x` `.` don't-care bits.
//!
//! Flags and register fields are only meaningful in the first template; in
//! later templates they behave as don't-care bits. Later templates are
//! checked by peeking, so the caller still owns those bytes.

use bitflags::bitflags;

use crate::cursor::ByteStream;
use crate::error::PatternError;

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags: u8 {
const D = 1 << 0; // reg field is the destination
const W = 1 << 1; // word operation
const S = 1 << 2; // sign-extend 8-bit immediate
const V = 1 << 3; // shift count in cl
const Z = 1 << 4; // repeat while zero
}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Template {
    mask: u8,
    expected: u8,
}

impl Template {
    fn accepts(&self, byte: u8) -> bool {
        byte & self.mask == self.expected
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPattern {
    templates: Vec<Template>,
    flags: Vec<(Flags, u8)>,
    register_mask: u8,
    extension: Option<u8>,
}

impl BitPattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        if source.trim().is_empty() {
            return Err(PatternError::Empty);
        }
        let mut templates = Vec::new();
        let mut flags = Vec::new();
        let mut register_mask = 0u8;

        for (index, raw) in source.split('|').enumerate() {
            let raw = raw.trim();
            let body = raw
                .strip_prefix("0b")
                .ok_or_else(|| PatternError::MissingPrefix { template: raw.to_string() })?;
            let len = body.chars().count();
            if len != 8 {
                return Err(PatternError::Length { template: raw.to_string(), len });
            }
            let mut template = Template::default();
            for (i, symbol) in body.chars().enumerate() {
                let bit = 7 - i as u8;
                match symbol {
                    '0' => template.mask |= 1 << bit,
                    '1' => {
                        template.mask |= 1 << bit;
                        template.expected |= 1 << bit;
                    }
                    'd' | 'w' | 's' | 'v' | 'z' => {
                        if index == 0 {
                            flags.push((flag_for(symbol), bit));
                        }
                    }
                    'r' => {
                        if index == 0 {
                            register_mask |= 1 << bit;
                        }
                    }
                    'm' | 'o' | 'x' | '.' => {}
                    other => {
                        return Err(PatternError::Symbol { template: raw.to_string(), symbol: other })
                    }
                }
            }
            templates.push(template);
        }

        if register_mask != 0 {
            let field = u16::from(register_mask >> register_mask.trailing_zeros());
            if field & (field + 1) != 0 {
                return Err(PatternError::SplitField { template: source.trim().to_string() });
            }
        }

        // A fully fixed REG field in the second byte is an opcode extension.
        let extension = templates
            .get(1)
            .filter(|t| t.mask & 0b0011_1000 == 0b0011_1000)
            .map(|t| (t.expected >> 3) & 0b111);

        Ok(Self { templates, flags, register_mask, extension })
    }

    /// Number of bytes the pattern spans.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Tests only the first template.
    pub fn matches_byte(&self, byte: u8) -> bool {
        self.templates.first().is_some_and(|t| t.accepts(byte))
    }

    /// Tests `first` against the first template and every later template
    /// against the bytes after it. Fails closed when the stream runs out.
    pub fn matches(&self, first: u8, stream: &ByteStream<'_>) -> bool {
        if !self.matches_byte(first) {
            return false;
        }
        self.templates
            .iter()
            .skip(1)
            .enumerate()
            .all(|(i, t)| stream.peek(i + 1).is_some_and(|b| t.accepts(b)))
    }

    pub fn flags(&self, byte: u8) -> Flags {
        self.flags
            .iter()
            .filter(|(_, bit)| byte & (1 << bit) != 0)
            .fold(Flags::empty(), |acc, (flag, _)| acc | *flag)
    }

    /// Value of the `r` field, or 0 when the pattern declares none.
    pub fn register(&self, byte: u8) -> u8 {
        if self.register_mask == 0 {
            return 0;
        }
        (byte & self.register_mask) >> self.register_mask.trailing_zeros()
    }

    pub fn extension(&self) -> Option<u8> {
        self.extension
    }
}

fn flag_for(symbol: char) -> Flags {
    match symbol {
        'd' => Flags::D,
        'w' => Flags::W,
        's' => Flags::S,
        'v' => Flags::V,
        _ => Flags::Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bits_and_flags() {
        let p = BitPattern::parse("0b100010dw").unwrap();
        assert_eq!(p.len(), 1);
        assert!(p.matches_byte(0x89));
        assert!(p.matches_byte(0x8B));
        assert!(!p.matches_byte(0x8C));
        assert_eq!(p.flags(0x89), Flags::W);
        assert_eq!(p.flags(0x8B), Flags::D | Flags::W);
        assert_eq!(p.flags(0x88), Flags::empty());
        assert_eq!(p.extension(), None);
    }

    #[test]
    fn register_field_is_right_aligned() {
        let p = BitPattern::parse("0b1011wrrr").unwrap();
        assert_eq!(p.register(0xB9), 0b001);
        assert_eq!(p.flags(0xB9), Flags::W);
        let seg = BitPattern::parse("0b001rr110").unwrap();
        assert_eq!(seg.register(0x26), 0);
        assert_eq!(seg.register(0x3E), 3);
    }

    #[test]
    fn later_templates_peek_and_fail_closed() {
        let p = BitPattern::parse("0b11010100|0b00001010").unwrap();
        let mut s = ByteStream::new(&[0xD4, 0x0A]);
        let first = s.next().unwrap();
        assert!(p.matches(first, &s));
        assert_eq!(s.position(), 1);

        let mut wrong = ByteStream::new(&[0xD4, 0x0B]);
        let first = wrong.next().unwrap();
        assert!(!p.matches(first, &wrong));

        let mut short = ByteStream::new(&[0xD4]);
        let first = short.next().unwrap();
        assert!(!p.matches(first, &short));
    }

    #[test]
    fn fixed_reg_field_is_an_extension() {
        let p = BitPattern::parse("0b100000sw|0bmm101xxx").unwrap();
        assert_eq!(p.extension(), Some(0b101));
        let partial = BitPattern::parse("0b10001110|0bmm0xxxxx").unwrap();
        assert_eq!(partial.extension(), None);
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        assert_eq!(BitPattern::parse("  "), Err(PatternError::Empty));
        assert!(matches!(BitPattern::parse("100010dw"), Err(PatternError::MissingPrefix { .. })));
        assert!(matches!(
            BitPattern::parse("0b10001"),
            Err(PatternError::Length { len: 5, .. })
        ));
        assert!(matches!(
            BitPattern::parse("0b1000100q"),
            Err(PatternError::Symbol { symbol: 'q', .. })
        ));
        assert!(matches!(
            BitPattern::parse("0b10001000|0bmm00xx"),
            Err(PatternError::Length { .. })
        ));
        assert!(matches!(BitPattern::parse("0b0r0r0000"), Err(PatternError::SplitField { .. })));
    }
}
