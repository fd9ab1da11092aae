//! Builders shared by instructions that differ only in mnemonic.

use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::instructions::Opcode;
use crate::operand::{register, segment_register, Immediate};

pub(super) fn size(wide: bool) -> &'static str {
    if wide { "word" } else { "byte" }
}

pub(super) fn accumulator(wide: bool) -> &'static str {
    if wide { "ax" } else { "al" }
}

/// `[oooooodw] [mod reg r/m] [disp]`
pub fn reg_mem_with_reg(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let (dst, src) = d.resolve(&op, modrm, op.wide(), op.reg_is_destination())?;
    Ok(format!("{} {dst}, {src}", op.mnemonic))
}

/// `[oooooosw] [mod ext r/m] [disp] [data] [data]`
///
/// With S=1 and W=1 a single data byte is sign-extended and shown signed.
/// A memory destination carries the size keyword.
pub fn immediate_to_reg_mem(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let wide = op.wide();
    let signed = op.sign_extended();
    let modrm = d.modrm(&op)?;
    let dst = d.operand(&op, modrm, wide)?;
    let raw = d.immediate(&op, wide && !signed)?;
    let imm = if wide && signed {
        Immediate::sign_extended(raw as u8)
    } else {
        Immediate::new(raw, wide)
    };

    let value = if signed { imm.signed().to_string() } else { imm.value.to_string() };
    if dst.is_memory() {
        Ok(format!("{} {} {dst}, {value}", op.mnemonic, size(wide)))
    } else {
        Ok(format!("{} {dst}, {value}", op.mnemonic))
    }
}

/// `[oooooo0w] [data] [data]`
pub fn immediate_to_accumulator(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let value = d.immediate(&op, op.wide())?;
    Ok(format!("{} {}, {value}", op.mnemonic, accumulator(op.wide())))
}

/// `[ooooooow] [mod ext r/m] [disp]`
pub fn unary(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let target = d.operand(&op, modrm, op.wide())?;
    if target.is_memory() {
        Ok(format!("{} {} {target}", op.mnemonic, size(op.wide())))
    } else {
        Ok(format!("{} {target}", op.mnemonic))
    }
}

/// `[oooooovw] [mod ext r/m] [disp]`
pub fn shift(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let count = if op.count_in_cl() { "cl" } else { "1" };
    let modrm = d.modrm(&op)?;
    let target = d.operand(&op, modrm, op.wide())?;
    if target.is_memory() {
        Ok(format!("{} {} {target}, {count}", op.mnemonic, size(op.wide())))
    } else {
        Ok(format!("{} {target}, {count}", op.mnemonic))
    }
}

/// `[ooooorrr]`
pub fn word_register(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(format!("{} {}", op.mnemonic, register(op.reg, true)))
}

/// `[ooorrooo]`
pub fn segment(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(format!("{} {}", op.mnemonic, segment_register(op.reg)))
}

pub fn bare(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    Ok(op.mnemonic.to_string())
}

/// Two-byte opcodes whose second byte is fixed, e.g. `aam` (`D4 0A`).
pub fn bare_with_suffix(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    d.byte(&op, "second opcode byte")?;
    Ok(op.mnemonic.to_string())
}

/// `[ooooooow]` with the width spelled as a `b`/`w` suffix.
pub fn string(_: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let suffix = if op.wide() { 'w' } else { 'b' };
    Ok(format!("{}{suffix}", op.mnemonic))
}
