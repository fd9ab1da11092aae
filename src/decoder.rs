use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::cursor::ByteStream;
use crate::disasm::{RenderConfig, Renderer};
use crate::error::DecodeError;
use crate::instructions::{InstructionTable, Opcode};
use crate::labels::{branch_target, Labels};
use crate::operand::{
    register, Base, Displacement, EffectiveAddress, Mode, ModRm, Operand, DIRECT_ADDRESS, EQUATIONS,
};
use crate::prefix::Prefix;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedInstruction {
    /// Offset of the first byte, prefixes included.
    pub position: usize,
    pub len: usize,
    pub text: String,
}

/// One decoding session over one input buffer.
///
/// Instructions and labels accumulate as the stream is walked; whatever was
/// decoded before an error stays available for rendering. The first error
/// ends the session: later calls report it again without reading on.
#[derive(Debug)]
pub struct Decoder<'a> {
    stream: ByteStream<'a>,
    table: &'a InstructionTable,
    segment: Option<&'static str>,
    segment_used: bool,
    labels: Labels,
    instructions: Vec<DecodedInstruction>,
    renderer: Renderer,
    config: RenderConfig,
    failed: Option<DecodeError>,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8], table: &'a InstructionTable) -> Self {
        Self {
            stream: ByteStream::new(bytes),
            table,
            segment: None,
            segment_used: false,
            labels: Labels::new(),
            instructions: Vec::new(),
            renderer: Renderer::default(),
            config: RenderConfig::default(),
            failed: None,
        }
    }

    /// Decodes one instruction. `Ok(None)` once the stream is exhausted.
    pub fn step(&mut self) -> Result<Option<&DecodedInstruction>, DecodeError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        let start = self.stream.position();
        self.segment = None;
        self.segment_used = false;
        let Some(first) = self.stream.next() else {
            return Ok(None);
        };
        match self.decode_at(start, first) {
            Ok(instruction) => {
                debug!(position = start, len = instruction.len, text = %instruction.text, "decoded");
                self.instructions.push(instruction);
                Ok(self.instructions.last())
            }
            Err(err) => {
                warn!(position = start, error = %err, "decoding stopped");
                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Decodes until the stream is exhausted or an error occurs.
    pub fn decode(&mut self) -> Result<(), DecodeError> {
        while self.step()?.is_some() {}
        Ok(())
    }

    fn decode_at(&mut self, start: usize, first: u8) -> Result<DecodedInstruction, DecodeError> {
        let table = self.table;
        let prefixes = table.prefixes();
        let mut byte = first;
        let mut leading: Vec<Prefix> = Vec::new();
        let mut lock_or_repeat = false;

        loop {
            if self.segment.is_none() {
                if let Some(prefix @ Prefix::Segment(name)) = prefixes.segment(byte) {
                    self.segment = Some(name);
                    leading.push(prefix);
                    byte = self.prefixed_opcode()?;
                    continue;
                }
            }
            if !lock_or_repeat {
                if let Some(prefix) = prefixes.lock_or_repeat(byte, &self.stream) {
                    lock_or_repeat = true;
                    leading.push(prefix);
                    byte = self.prefixed_opcode()?;
                    continue;
                }
            }
            break;
        }

        let offset = self.stream.position() - 1;
        let entry = table
            .lookup(byte, &self.stream)
            .ok_or(DecodeError::UnknownOpcode { opcode: byte, offset })?;
        trace!(offset, opcode = byte, entry = entry.name, "matched");
        let body = (entry.build)(self, entry.opcode(byte))?;

        let mut text = String::new();
        for prefix in leading {
            // An override already shown inside a memory operand is not repeated.
            if matches!(prefix, Prefix::Segment(_)) && self.segment_used {
                continue;
            }
            text.push_str(prefix.text());
            text.push(' ');
        }
        text.push_str(&body);

        Ok(DecodedInstruction { position: start, len: self.stream.position() - start, text })
    }

    fn prefixed_opcode(&mut self) -> Result<u8, DecodeError> {
        let offset = self.stream.position();
        self.stream
            .next()
            .ok_or(DecodeError::Truncated { instruction: "prefix", field: "opcode", offset })
    }

    fn read(&mut self, op: &Opcode, field: &'static str) -> Result<u8, DecodeError> {
        let offset = self.stream.position();
        self.stream
            .next()
            .ok_or(DecodeError::Truncated { instruction: op.name, field, offset })
    }

    fn read_u16(&mut self, op: &Opcode, low: &'static str, high: &'static str) -> Result<u16, DecodeError> {
        let lo = self.read(op, low)?;
        let hi = self.read(op, high)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Reads the ModRM byte, checking any opcode extension the matched
    /// pattern fixes.
    pub fn modrm(&mut self, op: &Opcode) -> Result<ModRm, DecodeError> {
        let offset = self.stream.position();
        let modrm = ModRm::parse(self.read(op, "operand")?);
        if let Some(expected) = op.extension {
            if modrm.reg != expected {
                return Err(DecodeError::Invariant {
                    instruction: op.name,
                    expected,
                    found: modrm.reg,
                    offset,
                });
            }
        }
        Ok(modrm)
    }

    /// Consumes the displacement or direct address a memory ModRM calls for.
    pub fn effective_address(&mut self, op: &Opcode, modrm: ModRm) -> Result<EffectiveAddress, DecodeError> {
        let equation = EQUATIONS[usize::from(modrm.rm)];
        let base = match modrm.mode {
            Mode::Memory if modrm.rm == DIRECT_ADDRESS => {
                Base::Direct(self.read_u16(op, "direct address (low)", "direct address (high)")?)
            }
            Mode::Memory | Mode::Register => Base::Equation(equation, Displacement::None),
            Mode::Memory8 => {
                Base::Equation(equation, Displacement::Byte(self.read(op, "displacement")? as i8))
            }
            Mode::Memory16 => {
                let d = self.read_u16(op, "displacement (low)", "displacement (high)")?;
                Base::Equation(equation, Displacement::Word(d as i16))
            }
        };
        Ok(EffectiveAddress { base, segment: self.take_segment() })
    }

    /// The R/M side of a ModRM byte: a register when MOD=11, memory otherwise.
    pub fn operand(&mut self, op: &Opcode, modrm: ModRm, wide: bool) -> Result<Operand, DecodeError> {
        if modrm.is_register() {
            return Ok(Operand::Register(register(modrm.rm, wide)));
        }
        Ok(Operand::Memory(self.effective_address(op, modrm)?))
    }

    /// Single-operand form of [`Decoder::operand`], rendered.
    pub fn reg_or_mem(&mut self, op: &Opcode, modrm: ModRm, wide: bool) -> Result<String, DecodeError> {
        Ok(self.operand(op, modrm, wide)?.to_string())
    }

    /// Both operands of a REG + R/M instruction as `(destination, source)`.
    pub fn resolve(
        &mut self,
        op: &Opcode,
        modrm: ModRm,
        wide: bool,
        reg_is_destination: bool,
    ) -> Result<(String, String), DecodeError> {
        self.resolve_with(op, modrm, register(modrm.reg, wide), wide, reg_is_destination)
    }

    /// Like [`Decoder::resolve`] with the REG side named by the caller.
    pub fn resolve_with(
        &mut self,
        op: &Opcode,
        modrm: ModRm,
        reg: &str,
        wide: bool,
        reg_is_destination: bool,
    ) -> Result<(String, String), DecodeError> {
        let rm = self.reg_or_mem(op, modrm, wide)?;
        if reg_is_destination {
            Ok((reg.to_string(), rm))
        } else {
            Ok((rm, reg.to_string()))
        }
    }

    /// Immediate data, one byte or a little-endian word.
    pub fn immediate(&mut self, op: &Opcode, wide: bool) -> Result<u16, DecodeError> {
        if wide {
            self.read_u16(op, "immediate (low)", "immediate (high)")
        } else {
            Ok(u16::from(self.read(op, "immediate")?))
        }
    }

    /// A memory address field, honouring any pending segment override.
    pub fn direct_address(&mut self, op: &Opcode) -> Result<EffectiveAddress, DecodeError> {
        let address = self.read_u16(op, "address (low)", "address (high)")?;
        Ok(EffectiveAddress { base: Base::Direct(address), segment: self.take_segment() })
    }

    /// One data byte such as a port number or interrupt type.
    pub fn byte(&mut self, op: &Opcode, field: &'static str) -> Result<u8, DecodeError> {
        self.read(op, field)
    }

    /// Reads a relative displacement, records the target label and returns
    /// its name.
    pub fn branch(&mut self, op: &Opcode, wide: bool) -> Result<String, DecodeError> {
        let displacement = if wide {
            self.read_u16(op, "displacement (low)", "displacement (high)")? as i16
        } else {
            i16::from(self.read(op, "displacement")? as i8)
        };
        let target = branch_target(self.stream.position(), displacement);
        let name = self.labels.record(target).to_string();
        debug!(target, name = %name, "label recorded");
        Ok(name)
    }

    fn take_segment(&mut self) -> Option<&'static str> {
        if self.segment.is_some() {
            self.segment_used = true;
        }
        self.segment
    }

    pub fn instructions(&self) -> &[DecodedInstruction] {
        &self.instructions
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn position(&self) -> usize {
        self.stream.position()
    }

    pub fn is_exhausted(&self) -> bool {
        self.stream.is_exhausted()
    }

    /// The error that ended the session, if any.
    pub fn failure(&self) -> Option<&DecodeError> {
        self.failed.as_ref()
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }

    /// Listing of everything decoded so far. Cached until an instruction,
    /// a label or the render settings change.
    pub fn render(&mut self) -> &str {
        self.renderer
            .render(&self.instructions, &self.labels, self.stream.bytes(), self.config)
    }

    pub fn render_with(&mut self, config: RenderConfig) -> &str {
        self.config = config;
        self.render()
    }

    /// Full listing walks performed so far.
    pub fn render_passes(&self) -> usize {
        self.renderer.passes()
    }
}
