pub mod cursor;
pub mod decoder;
pub mod disasm;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod operand;
pub mod pattern;
pub mod prefix;

pub mod isa {
    pub mod i8086; // Intel 8086 / 8088 base instruction set
}

pub use decoder::{DecodedInstruction, Decoder};
pub use disasm::{disassemble, RenderConfig};
pub use error::{DecodeError, Error, PatternError};
pub use instructions::{InstrDef, InstructionTable, Opcode};
pub use labels::{Label, Labels};
