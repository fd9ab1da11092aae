use crate::decoder::Decoder;
use crate::error::DecodeError;
use crate::instructions::Opcode;

/// Conditional jumps and loops: 8-bit displacement, optional alias comment.
pub fn jump_short(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let label = d.branch(&op, false)?;
    match op.alias {
        Some(alias) => Ok(format!("{} {label} ; {alias}", op.mnemonic)),
        None => Ok(format!("{} {label}", op.mnemonic)),
    }
}

/// `jmp short`, `[11101011] [disp]`
pub fn jmp_short(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let label = d.branch(&op, false)?;
    Ok(format!("jmp short {label}"))
}

/// `jmp near`, `[11101001] [disp-lo] [disp-hi]`
pub fn jmp_near(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let label = d.branch(&op, true)?;
    Ok(format!("jmp near {label}"))
}

pub fn call_near(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let label = d.branch(&op, true)?;
    Ok(format!("call {label}"))
}

/// Indirect within segment, `[11111111] [mod ext r/m]`.
pub fn indirect_near(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let target = d.operand(&op, modrm, true)?;
    if target.is_memory() {
        Ok(format!("{} word {target}", op.mnemonic))
    } else {
        Ok(format!("{} {target}", op.mnemonic))
    }
}

/// Indirect intersegment; the operand is a 32-bit pointer in memory.
pub fn indirect_far(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let modrm = d.modrm(&op)?;
    let target = d.reg_or_mem(&op, modrm, true)?;
    Ok(format!("{} far {target}", op.mnemonic))
}

/// Direct intersegment, `[op] [off-lo] [off-hi] [seg-lo] [seg-hi]`.
pub fn far_direct(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let offset = d.immediate(&op, true)?;
    let segment = d.immediate(&op, true)?;
    Ok(format!("{} {segment}:{offset}", op.mnemonic))
}

/// `ret`/`retf` adding a word to SP.
pub fn return_with_pop(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let bytes = d.immediate(&op, true)?;
    Ok(format!("{} {bytes}", op.mnemonic))
}

pub fn interrupt(d: &mut Decoder<'_>, op: Opcode) -> Result<String, DecodeError> {
    let kind = d.byte(&op, "interrupt type")?;
    Ok(format!("int {kind}"))
}
