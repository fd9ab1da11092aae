//! Intel 8086 instruction set, in the order of the 8086 family user's
//! manual encoding tables. ESC (`11011xxx`) is left out; NASM has no
//! mnemonic for it.

pub mod common;
pub mod control;
pub mod transfer;

use crate::error::PatternError;
use crate::instructions::{InstrDef as I, InstructionTable};

use common::{
    bare, bare_with_suffix, immediate_to_accumulator, immediate_to_reg_mem, reg_mem_with_reg, segment, shift,
    string, unary, word_register,
};
use control::{
    call_near, far_direct, indirect_far, indirect_near, interrupt, jmp_near, jmp_short, jump_short,
    return_with_pop,
};
use transfer::{
    in_fixed, in_variable, load_pointer, mov_accumulator_to_memory, mov_from_segment, mov_immediate_to_reg,
    mov_immediate_to_reg_mem, mov_memory_to_accumulator, mov_to_segment, out_fixed, out_variable, stack_reg_mem,
    xchg_accumulator,
};

pub const TABLE: &[I] = &[
    // Data transfer
    I::new("0b100010dw", "mov", "MOV: register/memory to/from register", reg_mem_with_reg),
    I::new("0b1100011w|0bmm000xxx", "mov", "MOV: immediate to register/memory", mov_immediate_to_reg_mem),
    I::new("0b1011wrrr", "mov", "MOV: immediate to register", mov_immediate_to_reg),
    I::new("0b1010000w", "mov", "MOV: memory to accumulator", mov_memory_to_accumulator),
    I::new("0b1010001w", "mov", "MOV: accumulator to memory", mov_accumulator_to_memory),
    I::new("0b10001110|0bmm0xxxxx", "mov", "MOV: register/memory to segment register", mov_to_segment),
    I::new("0b10001100|0bmm0xxxxx", "mov", "MOV: segment register to register/memory", mov_from_segment),
    I::new("0b11111111|0bmm110xxx", "push", "PUSH: register/memory", stack_reg_mem),
    I::new("0b01010rrr", "push", "PUSH: register", word_register),
    I::new("0b000rr110", "push", "PUSH: segment register", segment),
    I::new("0b10001111|0bmm000xxx", "pop", "POP: register/memory", stack_reg_mem),
    I::new("0b01011rrr", "pop", "POP: register", word_register),
    I::new("0b000rr111", "pop", "POP: segment register", segment),
    I::new("0b1000011w", "xchg", "XCHG: register/memory with register", reg_mem_with_reg),
    I::new("0b10010000", "nop", "NOP", bare),
    I::new("0b10010rrr", "xchg", "XCHG: register with accumulator", xchg_accumulator),
    I::new("0b1110010w", "in", "IN: fixed port", in_fixed),
    I::new("0b1110110w", "in", "IN: variable port", in_variable),
    I::new("0b1110011w", "out", "OUT: fixed port", out_fixed),
    I::new("0b1110111w", "out", "OUT: variable port", out_variable),
    I::new("0b11010111", "xlat", "XLAT", bare),
    I::new("0b10001101", "lea", "LEA", load_pointer),
    I::new("0b11000101", "lds", "LDS", load_pointer),
    I::new("0b11000100", "les", "LES", load_pointer),
    I::new("0b10011111", "lahf", "LAHF", bare),
    I::new("0b10011110", "sahf", "SAHF", bare),
    I::new("0b10011100", "pushf", "PUSHF", bare),
    I::new("0b10011101", "popf", "POPF", bare),
    // Arithmetic
    I::new("0b000000dw", "add", "ADD: register/memory with register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm000xxx", "add", "ADD: immediate to register/memory", immediate_to_reg_mem),
    I::new("0b0000010w", "add", "ADD: immediate to accumulator", immediate_to_accumulator),
    I::new("0b000100dw", "adc", "ADC: register/memory with register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm010xxx", "adc", "ADC: immediate to register/memory", immediate_to_reg_mem),
    I::new("0b0001010w", "adc", "ADC: immediate to accumulator", immediate_to_accumulator),
    I::new("0b1111111w|0bmm000xxx", "inc", "INC: register/memory", unary),
    I::new("0b01000rrr", "inc", "INC: register", word_register),
    I::new("0b00110111", "aaa", "AAA", bare),
    I::new("0b00100111", "daa", "DAA", bare),
    I::new("0b001010dw", "sub", "SUB: register/memory and register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm101xxx", "sub", "SUB: immediate from register/memory", immediate_to_reg_mem),
    I::new("0b0010110w", "sub", "SUB: immediate from accumulator", immediate_to_accumulator),
    I::new("0b000110dw", "sbb", "SBB: register/memory and register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm011xxx", "sbb", "SBB: immediate from register/memory", immediate_to_reg_mem),
    I::new("0b0001110w", "sbb", "SBB: immediate from accumulator", immediate_to_accumulator),
    I::new("0b1111111w|0bmm001xxx", "dec", "DEC: register/memory", unary),
    I::new("0b01001rrr", "dec", "DEC: register", word_register),
    I::new("0b1111011w|0bmm011xxx", "neg", "NEG", unary),
    I::new("0b001110dw", "cmp", "CMP: register/memory and register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm111xxx", "cmp", "CMP: immediate with register/memory", immediate_to_reg_mem),
    I::new("0b0011110w", "cmp", "CMP: immediate with accumulator", immediate_to_accumulator),
    I::new("0b00111111", "aas", "AAS", bare),
    I::new("0b00101111", "das", "DAS", bare),
    I::new("0b1111011w|0bmm100xxx", "mul", "MUL", unary),
    I::new("0b1111011w|0bmm101xxx", "imul", "IMUL", unary),
    I::new("0b11010100|0b00001010", "aam", "AAM", bare_with_suffix),
    I::new("0b1111011w|0bmm110xxx", "div", "DIV", unary),
    I::new("0b1111011w|0bmm111xxx", "idiv", "IDIV", unary),
    I::new("0b11010101|0b00001010", "aad", "AAD", bare_with_suffix),
    I::new("0b10011000", "cbw", "CBW", bare),
    I::new("0b10011001", "cwd", "CWD", bare),
    // Logic
    I::new("0b1111011w|0bmm010xxx", "not", "NOT", unary),
    I::new("0b110100vw|0bmm100xxx", "shl", "SHL/SAL", shift),
    I::new("0b110100vw|0bmm101xxx", "shr", "SHR", shift),
    I::new("0b110100vw|0bmm111xxx", "sar", "SAR", shift),
    I::new("0b110100vw|0bmm000xxx", "rol", "ROL", shift),
    I::new("0b110100vw|0bmm001xxx", "ror", "ROR", shift),
    I::new("0b110100vw|0bmm010xxx", "rcl", "RCL", shift),
    I::new("0b110100vw|0bmm011xxx", "rcr", "RCR", shift),
    I::new("0b001000dw", "and", "AND: register/memory with register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm100xxx", "and", "AND: immediate to register/memory", immediate_to_reg_mem),
    I::new("0b0010010w", "and", "AND: immediate to accumulator", immediate_to_accumulator),
    I::new("0b1000010w", "test", "TEST: register/memory and register", reg_mem_with_reg),
    I::new("0b1111011w|0bmm000xxx", "test", "TEST: immediate and register/memory", immediate_to_reg_mem),
    I::new("0b1010100w", "test", "TEST: immediate and accumulator", immediate_to_accumulator),
    I::new("0b000010dw", "or", "OR: register/memory with register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm001xxx", "or", "OR: immediate to register/memory", immediate_to_reg_mem),
    I::new("0b0000110w", "or", "OR: immediate to accumulator", immediate_to_accumulator),
    I::new("0b001100dw", "xor", "XOR: register/memory with register", reg_mem_with_reg),
    I::new("0b100000sw|0bmm110xxx", "xor", "XOR: immediate to register/memory", immediate_to_reg_mem),
    I::new("0b0011010w", "xor", "XOR: immediate to accumulator", immediate_to_accumulator),
    // String manipulation; REP is handled as a prefix
    I::new("0b1010010w", "movs", "MOVS", string),
    I::new("0b1010011w", "cmps", "CMPS", string),
    I::new("0b1010111w", "scas", "SCAS", string),
    I::new("0b1010110w", "lods", "LODS", string),
    I::new("0b1010101w", "stos", "STOS", string),
    // Control transfer
    I::new("0b11101000", "call", "CALL: direct within segment", call_near),
    I::new("0b11111111|0bmm010xxx", "call", "CALL: indirect within segment", indirect_near),
    I::new("0b10011010", "call", "CALL: direct intersegment", far_direct),
    I::new("0b11111111|0bmm011xxx", "call", "CALL: indirect intersegment", indirect_far),
    I::new("0b11101001", "jmp", "JMP: direct within segment", jmp_near),
    I::new("0b11101011", "jmp", "JMP: direct within segment-short", jmp_short),
    I::new("0b11111111|0bmm100xxx", "jmp", "JMP: indirect within segment", indirect_near),
    I::new("0b11101010", "jmp", "JMP: direct intersegment", far_direct),
    I::new("0b11111111|0bmm101xxx", "jmp", "JMP: indirect intersegment", indirect_far),
    I::new("0b11000011", "ret", "RET: within segment", bare),
    I::new("0b11000010", "ret", "RET: within segment adding immediate to SP", return_with_pop),
    I::new("0b11001011", "retf", "RET: intersegment", bare),
    I::new("0b11001010", "retf", "RET: intersegment adding immediate to SP", return_with_pop),
    I::new("0b01110100", "je", "JE/JZ", jump_short).alias("jz"),
    I::new("0b01111100", "jl", "JL/JNGE", jump_short).alias("jnge"),
    I::new("0b01111110", "jle", "JLE/JNG", jump_short).alias("jng"),
    I::new("0b01110010", "jb", "JB/JNAE", jump_short).alias("jnae"),
    I::new("0b01110110", "jbe", "JBE/JNA", jump_short).alias("jna"),
    I::new("0b01111010", "jp", "JP/JPE", jump_short).alias("jpe"),
    I::new("0b01110000", "jo", "JO", jump_short),
    I::new("0b01111000", "js", "JS", jump_short),
    I::new("0b01110101", "jne", "JNE/JNZ", jump_short).alias("jnz"),
    I::new("0b01111101", "jnl", "JNL/JGE", jump_short).alias("jge"),
    I::new("0b01111111", "jnle", "JNLE/JG", jump_short).alias("jg"),
    I::new("0b01110011", "jnb", "JNB/JAE", jump_short).alias("jae"),
    I::new("0b01110111", "jnbe", "JNBE/JA", jump_short).alias("ja"),
    I::new("0b01111011", "jnp", "JNP/JPO", jump_short).alias("jpo"),
    I::new("0b01110001", "jno", "JNO", jump_short),
    I::new("0b01111001", "jns", "JNS", jump_short),
    I::new("0b11100010", "loop", "LOOP", jump_short),
    I::new("0b11100001", "loopz", "LOOPZ/LOOPE", jump_short).alias("loope"),
    I::new("0b11100000", "loopnz", "LOOPNZ/LOOPNE", jump_short).alias("loopne"),
    I::new("0b11100011", "jcxz", "JCXZ", jump_short),
    I::new("0b11001101", "int", "INT: type specified", interrupt),
    I::new("0b11001100", "int3", "INT: type 3", bare),
    I::new("0b11001110", "into", "INTO", bare),
    I::new("0b11001111", "iret", "IRET", bare),
    // Processor control
    I::new("0b11111000", "clc", "CLC", bare),
    I::new("0b11110101", "cmc", "CMC", bare),
    I::new("0b11111001", "stc", "STC", bare),
    I::new("0b11111100", "cld", "CLD", bare),
    I::new("0b11111101", "std", "STD", bare),
    I::new("0b11111010", "cli", "CLI", bare),
    I::new("0b11111011", "sti", "STI", bare),
    I::new("0b11110100", "hlt", "HLT", bare),
    I::new("0b10011011", "wait", "WAIT", bare),
];

pub fn table() -> Result<InstructionTable, PatternError> {
    InstructionTable::new(TABLE)
}
