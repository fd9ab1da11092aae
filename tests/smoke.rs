use pretty_assertions::assert_eq;
use sim8086::isa::i8086;
use sim8086::{Decoder, RenderConfig};

// A short countdown loop that stores through es:di.
const PROGRAM: &[u8] = &[
    0xB9, 0x03, 0x00, // mov cx, 3
    0xBB, 0xE8, 0x03, // mov bx, 1000
    0x26, 0x89, 0x1D, // mov es:[di], bx
    0x83, 0xC3, 0x0A, // add bx, 10
    0x83, 0xC7, 0x02, // add di, 2
    0xE2, 0xF5, // loop -11
    0xC3, // ret
];

#[test]
fn listing_of_a_small_program() {
    let table = i8086::table().unwrap();
    let mut d = Decoder::new(PROGRAM, &table);
    d.decode().unwrap();
    assert_eq!(
        d.render(),
        "mov cx, 3\n\
         mov bx, 1000\n\
         label_6:\n\
         mov es:[di], bx\n\
         add bx, 10\n\
         add di, 2\n\
         loop label_6\n\
         ret\n"
    );
}

#[test]
fn listing_with_bytes() {
    let table = i8086::table().unwrap();
    let mut d = Decoder::new(&PROGRAM[..9], &table);
    d.decode().unwrap();
    assert_eq!(
        d.render_with(RenderConfig { show_bytes: true }),
        "; 0000: b9 03 00\nmov cx, 3\n; 0003: bb e8 03\nmov bx, 1000\n; 0006: 26 89 1d\nmov es:[di], bx\n"
    );
    assert!(d.config().show_bytes);
}

#[test]
fn labels_export() {
    let table = i8086::table().unwrap();
    let mut d = Decoder::new(PROGRAM, &table);
    d.decode().unwrap();
    let json = serde_json::to_string(&d.labels().to_vec()).unwrap();
    assert_eq!(json, r#"[{"position":6,"name":"label_6"}]"#);
}
