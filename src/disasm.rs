use serde::{Deserialize, Serialize};

use crate::decoder::{DecodedInstruction, Decoder};
use crate::error::Error;
use crate::isa::i8086;
use crate::labels::Labels;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Precede each instruction with a `; offset: bytes` comment.
    pub show_bytes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Signature {
    instructions: usize,
    labels: usize,
    config: RenderConfig,
}

/// Memoised listing. Any change in instruction count, label count or
/// settings forces a full re-walk.
#[derive(Debug, Default)]
pub struct Renderer {
    output: String,
    signature: Option<Signature>,
    passes: usize,
}

impl Renderer {
    pub fn render(
        &mut self,
        instructions: &[DecodedInstruction],
        labels: &Labels,
        bytes: &[u8],
        config: RenderConfig,
    ) -> &str {
        let signature = Signature { instructions: instructions.len(), labels: labels.len(), config };
        if self.signature != Some(signature) {
            self.output = listing(instructions, labels, bytes, config);
            self.signature = Some(signature);
            self.passes += 1;
        }
        &self.output
    }

    pub fn passes(&self) -> usize {
        self.passes
    }
}

fn listing(instructions: &[DecodedInstruction], labels: &Labels, bytes: &[u8], config: RenderConfig) -> String {
    let mut out = String::new();
    let starts_instruction = |position: i64| {
        usize::try_from(position)
            .is_ok_and(|p| instructions.binary_search_by_key(&p, |i| i.position).is_ok())
    };

    // Targets outside the buffer or inside an instruction are pinned
    // relative to the section start.
    for (position, name) in labels.iter().filter(|(p, _)| !starts_instruction(*p)) {
        let sign = if position < 0 { '-' } else { '+' };
        out.push_str(&format!("{name} equ $$ {sign} {}\n", position.unsigned_abs()));
    }

    for ins in instructions {
        if let Some(name) = i64::try_from(ins.position).ok().and_then(|p| labels.get(p)) {
            out.push_str(&format!("{name}:\n"));
        }
        if config.show_bytes {
            let raw = bytes.get(ins.position..ins.position + ins.len).unwrap_or(&[]);
            let hex: String = raw.iter().map(|b| format!(" {b:02x}")).collect();
            out.push_str(&format!("; {:04x}:{hex}\n", ins.position));
        }
        out.push_str(&ins.text);
        out.push('\n');
    }
    out
}

/// Decodes `bytes` with the built-in 8086 table and renders the listing.
pub fn disassemble(bytes: &[u8]) -> Result<String, Error> {
    let table = i8086::table()?;
    let mut decoder = Decoder::new(bytes, &table);
    decoder.decode()?;
    Ok(decoder.render().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_is_cached_until_something_changes() {
        let table = i8086::table().unwrap();
        let bytes = [0x89, 0xD8, 0x04, 0x05];
        let mut d = Decoder::new(&bytes, &table);
        d.step().unwrap();
        assert_eq!(d.render(), "mov ax, bx\n");
        assert_eq!(d.render(), "mov ax, bx\n");
        assert_eq!(d.render_passes(), 1);

        d.step().unwrap();
        assert_eq!(d.render(), "mov ax, bx\nadd al, 5\n");
        assert_eq!(d.render_passes(), 2);

        let shown = d.render_with(RenderConfig { show_bytes: true }).to_string();
        assert_eq!(shown, "; 0000: 89 d8\nmov ax, bx\n; 0002: 04 05\nadd al, 5\n");
        assert_eq!(d.render_passes(), 3);
    }

    #[test]
    fn labels_are_placed_before_their_instruction() {
        let table = i8086::table().unwrap();
        let bytes = [0x41, 0x75, 0xFD];
        let mut d = Decoder::new(&bytes, &table);
        d.decode().unwrap();
        assert_eq!(d.render(), "label_0:\ninc cx\njne label_0 ; jnz\n");

        let shown = d.render_with(RenderConfig { show_bytes: true });
        assert_eq!(shown, "label_0:\n; 0000: 41\ninc cx\n; 0001: 75 fd\njne label_0 ; jnz\n");
    }

    #[test]
    fn disassemble_whole_buffer() {
        assert_eq!(disassemble(&[0x89, 0xD8]).unwrap(), "mov ax, bx\n");
        assert_eq!(disassemble(&[]).unwrap(), "");
    }
}
