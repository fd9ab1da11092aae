use pretty_assertions::assert_eq;
use sim8086::isa::i8086;
use sim8086::{disassemble, Decoder};

#[test]
fn register_to_register_mov() {
    assert_eq!(disassemble(&[0x89, 0xD8]).unwrap(), "mov ax, bx\n");
    assert_eq!(disassemble(&[0x8B, 0xC3]).unwrap(), "mov ax, bx\n");
    assert_eq!(disassemble(&[0x88, 0xE5]).unwrap(), "mov ch, ah\n");
}

#[test]
fn immediate_to_accumulator() {
    assert_eq!(disassemble(&[0x04, 0x05]).unwrap(), "add al, 5\n");
    assert_eq!(disassemble(&[0x05, 0xE8, 0x03]).unwrap(), "add ax, 1000\n");
    assert_eq!(disassemble(&[0x3C, 0xE2]).unwrap(), "cmp al, 226\n");
}

#[test]
fn branch_before_the_buffer_is_declared_up_front() {
    assert_eq!(
        disassemble(&[0x74, 0xF0]).unwrap(),
        "label_neg_14 equ $$ - 14\nje label_neg_14 ; jz\n"
    );
}

#[test]
fn repeat_prefix_spelling() {
    assert_eq!(disassemble(&[0xF2, 0xA6]).unwrap(), "repnz cmpsb\n");
    assert_eq!(disassemble(&[0xF3, 0xA6]).unwrap(), "repz cmpsb\n");
    assert_eq!(disassemble(&[0xF3, 0xA5]).unwrap(), "rep movsw\n");
    assert_eq!(disassemble(&[0xF3, 0xAB]).unwrap(), "rep stosw\n");
    assert_eq!(disassemble(&[0xF2, 0xAC]).unwrap(), "rep lodsb\n");
    assert_eq!(disassemble(&[0xF2, 0xAF]).unwrap(), "repnz scasw\n");
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(disassemble(&[]).unwrap(), "");
}

#[test]
fn positions_and_lengths_cover_the_buffer() {
    let bytes = [0x26, 0x8B, 0x07, 0x04, 0x05, 0xC3];
    let table = i8086::table().unwrap();
    let mut d = Decoder::new(&bytes, &table);
    d.decode().unwrap();
    let spans: Vec<_> = d.instructions().iter().map(|i| (i.position, i.len)).collect();
    assert_eq!(spans, vec![(0, 3), (3, 2), (5, 1)]);
    assert!(d.is_exhausted());
    assert_eq!(d.position(), bytes.len());
}

#[test]
fn decoding_is_deterministic() {
    let bytes = [0x41, 0x75, 0xFD, 0xE8, 0x00, 0x00, 0x74, 0x80];
    let first = disassemble(&bytes).unwrap();
    let second = disassemble(&bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn step_reports_each_instruction() {
    let table = i8086::table().unwrap();
    let bytes = [0x90, 0xF4];
    let mut d = Decoder::new(&bytes, &table);
    assert_eq!(d.step().unwrap().map(|i| i.text.clone()), Some("nop".to_string()));
    assert_eq!(d.step().unwrap().map(|i| i.text.clone()), Some("hlt".to_string()));
    assert_eq!(d.step().unwrap(), None);
    assert_eq!(d.step().unwrap(), None);
}

#[test]
fn decoded_instructions_serialize() {
    let table = i8086::table().unwrap();
    let bytes = [0x89, 0xD8];
    let mut d = Decoder::new(&bytes, &table);
    d.decode().unwrap();
    let json = serde_json::to_string(&d.instructions()[0]).unwrap();
    assert_eq!(json, r#"{"position":0,"len":2,"text":"mov ax, bx"}"#);
}
