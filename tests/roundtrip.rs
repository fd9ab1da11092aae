//! Listings that nasm must turn back into the same bytes. The text of each
//! case is checked directly; reassembly runs only when nasm is on PATH.

use std::path::PathBuf;
use std::process::Command;

use pretty_assertions::assert_eq;
use sim8086::disassemble;

struct Case {
    name: &'static str,
    bytes: &'static [u8],
    listing: &'static str,
}

const CASES: &[Case] = &[
    Case {
        name: "moves",
        bytes: &[
            0x89, 0xD9, 0x88, 0xE5, 0x8B, 0x1E, 0x34, 0x12, 0xB1, 0x0C, 0xB9, 0xF4, 0xFF,
            0x8B, 0x46, 0xFF, 0x8B, 0x81, 0x00, 0x10, 0xA1, 0xFB, 0x09,
            0xC6, 0x03, 0x07, 0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01,
        ],
        listing: "mov cx, bx\n\
                  mov ch, ah\n\
                  mov bx, [4660]\n\
                  mov cl, 12\n\
                  mov cx, 65524 ; or -12\n\
                  mov ax, [bp - 1]\n\
                  mov ax, [bx + di + 4096]\n\
                  mov ax, [2555]\n\
                  mov [bp + di], byte 7\n\
                  mov [di + 901], word 347\n",
    },
    Case {
        name: "arith",
        bytes: &[
            0x04, 0x05, 0x83, 0xC3, 0xFE, 0x81, 0xC3, 0xE8, 0x03, 0x80, 0x3F, 0x05,
            0xF7, 0x16, 0x34, 0x12, 0xD1, 0xE0, 0xD2, 0x0F, 0xFE, 0xC0, 0x40,
        ],
        listing: "add al, 5\n\
                  add bx, -2\n\
                  add bx, 1000\n\
                  cmp byte [bx], 5\n\
                  not word [4660]\n\
                  shl ax, 1\n\
                  ror byte [bx], cl\n\
                  inc al\n\
                  inc ax\n",
    },
    Case {
        name: "sized_immediates",
        bytes: &[
            0x83, 0x06, 0x34, 0x12, 0xFE, 0x83, 0x7E, 0xFC, 0x80, 0x80, 0x37, 0x01,
            0xF7, 0x07, 0x10, 0x00, 0xF6, 0x46, 0xD9, 0xEF,
        ],
        listing: "add word [4660], -2\n\
                  cmp word [bp - 4], -128\n\
                  xor byte [bx], 1\n\
                  test word [bx], 16\n\
                  test byte [bp - 39], 239\n",
    },
    Case {
        name: "prefixes",
        bytes: &[0xF3, 0xA6, 0xF2, 0xAE, 0xF3, 0xA4, 0xF0, 0xF6, 0x96, 0xB1, 0x26],
        listing: "repz cmpsb\n\
                  repnz scasb\n\
                  rep movsb\n\
                  lock not byte [bp + 9905]\n",
    },
    Case {
        name: "control",
        bytes: &[
            0x41, 0x75, 0xFD, 0xE2, 0xFB, 0xE8, 0xF8, 0xFF, 0xFF, 0x56, 0x9C, 0xCD, 0x21,
            0xC2, 0x98, 0x44, 0xC3,
        ],
        listing: "label_0:\n\
                  inc cx\n\
                  jne label_0 ; jnz\n\
                  loop label_0\n\
                  call label_0\n\
                  call word [bp - 100]\n\
                  int 33\n\
                  ret 17560\n\
                  ret\n",
    },
    Case {
        name: "pinned_jumps",
        bytes: &[0xEB, 0x04, 0xE9, 0x01, 0x00, 0x90, 0x40],
        listing: "jmp short label_6\n\
                  jmp near label_6\n\
                  nop\n\
                  label_6:\n\
                  inc ax\n",
    },
];

#[test]
fn listings_have_the_expected_text() {
    for case in CASES {
        assert_eq!(disassemble(case.bytes).unwrap(), case.listing, "{}", case.name);
    }
}

#[test]
fn segment_overrides_with_sized_operands() {
    let bytes = [
        0x2E, 0xF6, 0x46, 0xD9, 0xEF, 0x26, 0x83, 0x06, 0x34, 0x12, 0xFE, 0x2E, 0xF0,
        0xF6, 0x96, 0xB1, 0x26, 0x3E, 0xC6, 0x07, 0x01,
    ];
    assert_eq!(
        disassemble(&bytes).unwrap(),
        "test byte cs:[bp - 39], 239\n\
         add word es:[4660], -2\n\
         lock not byte cs:[bp + 9905]\n\
         mov ds:[bx], byte 1\n"
    );
}

fn nasm_available() -> bool {
    Command::new("nasm").arg("-v").output().is_ok_and(|o| o.status.success())
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sim8086-{}-{name}", std::process::id()))
}

fn reassemble(listing: &str, name: &str) -> Vec<u8> {
    let src = scratch(&format!("{name}.asm"));
    let out = scratch(&format!("{name}.bin"));
    std::fs::write(&src, format!("bits 16\n\n{listing}")).unwrap();
    let status = Command::new("nasm")
        .arg("-f")
        .arg("bin")
        .arg("-o")
        .arg(&out)
        .arg(&src)
        .status()
        .unwrap();
    assert!(status.success(), "nasm rejected:\n{listing}");
    let bytes = std::fs::read(&out).unwrap();
    let _ = std::fs::remove_file(&src);
    let _ = std::fs::remove_file(&out);
    bytes
}

#[test]
fn nasm_reassembles_the_listing() {
    if !nasm_available() {
        eprintln!("nasm not found; skipping round trip");
        return;
    }
    for case in CASES {
        let listing = disassemble(case.bytes).unwrap();
        assert_eq!(reassemble(&listing, case.name), case.bytes, "listing:\n{listing}");
    }
}
