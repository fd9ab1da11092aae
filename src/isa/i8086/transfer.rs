use super::common::{accumulator, size};
use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::instructions::Opcode;
use crate::operand::{register, segment_register, Immediate};

fn with_negative_hint(mut text: String, imm: Immediate) -> String {
    let signed = imm.signed();
    if signed < 0 {
        text.push_str(&format!(" ; or {signed}"));
    }
    text
}

/// `mov r/m, imm`: the size keyword rides on the immediate for memory.
pub fn mov_immediate_to_reg_mem(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let wide = op.wide();
    let modrm = d.modrm(&op)?;
    let dst = d.operand(&op, modrm, wide)?;
    let imm = Immediate::new(d.immediate(&op, wide)?, wide);
    let text = if dst.is_memory() {
        format!("mov {dst}, {} {}", size(wide), imm.value)
    } else {
        format!("mov {dst}, {}", imm.value)
    };
    Ok(with_negative_hint(text, imm))
}

/// `[1011wrrr] [data] [data]`
pub fn mov_immediate_to_reg(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let wide = op.wide();
    let imm = Immediate::new(d.immediate(&op, wide)?, wide);
    let text = format!("mov {}, {}", register(op.reg, wide), imm.value);
    Ok(with_negative_hint(text, imm))
}

pub fn mov_memory_to_accumulator(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let address = d.direct_address(&op)?;
    Ok(format!("mov {}, {address}", accumulator(op.wide())))
}

pub fn mov_accumulator_to_memory(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let address = d.direct_address(&op)?;
    Ok(format!("mov {address}, {}", accumulator(op.wide())))
}

fn mov_segment(d: &mut Decoder<'_>, op: Opcode, to_segment: bool) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let seg = segment_register(modrm.reg);
    let (dst, src) = d.resolve_with(&op, modrm, seg, true, to_segment)?;
    Ok(format!("mov {dst}, {src}"))
}

/// `[10001110] [mod 0sr r/m]`
pub fn mov_to_segment(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    mov_segment(d, op, true)
}

/// `[10001100] [mod 0sr r/m]`
pub fn mov_from_segment(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    mov_segment(d, op, false)
}

/// `push`/`pop` through a ModRM operand, always a word.
pub fn stack_reg_mem(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let target = d.operand(&op, modrm, true)?;
    if target.is_memory() {
        Ok(format!("{} word {target}", op.mnemonic))
    } else {
        Ok(format!("{} {target}", op.mnemonic))
    }
}

/// `[10010rrr]`
pub fn xchg_accumulator(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(format!("xchg ax, {}", register(op.reg, true)))
}

/// `lea`, `lds`, `les`: word register destination, memory source.
pub fn load_pointer(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let (dst, src) = d.resolve(&op, modrm, true, true)?;
    Ok(format!("{} {dst}, {src}", op.mnemonic))
}

pub fn in_fixed(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let port = d.byte(&op, "port")?;
    Ok(format!("in {}, {port}", accumulator(op.wide())))
}

pub fn in_variable(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(format!("in {}, dx", accumulator(op.wide())))
}

pub fn out_fixed(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let port = d.byte(&op, "port")?;
    Ok(format!("out {port}, {}", accumulator(op.wide())))
}

pub fn out_variable(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(format!("out dx, {}", accumulator(op.wide())))
}
