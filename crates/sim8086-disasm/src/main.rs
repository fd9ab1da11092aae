use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::Write;
use std::path::Path;

use sim8086::isa::i8086;
use sim8086::{DecodedInstruction, Decoder, Label, RenderConfig};
use sim8086_disasm::load_input;

#[derive(Parser, Debug)]
#[command(author, version, about = "8086 disassembler producing NASM-compatible listings", long_about=None)]
struct Cli {
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Skip N bytes at start of file before decoding
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes decoded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Precede each instruction with its offset and bytes
    #[arg(long)]
    show_bytes: bool,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Omit the `bits 16` header from text output
    #[arg(long)]
    no_header: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Clone, serde::Serialize)]
struct Report<'a> {
    instructions: &'a [DecodedInstruction],
    labels: Vec<Label>,
}

fn header(input: &str) -> String {
    let name = Path::new(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.to_string());
    format!("; {name}\nbits 16\n\n")
}

fn render(cli: &Cli, decoder: &mut Decoder<'_>) -> Result<String> {
    match cli.format {
        OutputFormat::Text => {
            let listing = decoder.render_with(RenderConfig { show_bytes: cli.show_bytes });
            if cli.no_header {
                Ok(listing.to_string())
            } else {
                Ok(format!("{}{listing}", header(&cli.input)))
            }
        }
        OutputFormat::Json => {
            let report = Report { instructions: decoder.instructions(), labels: decoder.labels().to_vec() };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn emit(out: Option<&str>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)?,
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let input = load_input(Path::new(&cli.input), cli.skip, cli.len)?;
    info!(path = %input.path.display(), skip = input.skip, len = input.bytes.len(), "loaded");

    let table = i8086::table()?;
    let mut decoder = Decoder::new(&input.bytes, &table);
    if let Err(err) = decoder.decode() {
        // Show what was decoded so far, then fail.
        let partial = decoder.render_with(RenderConfig { show_bytes: cli.show_bytes });
        eprint!("{partial}");
        let offset = cli.skip + err.offset();
        return Err(anyhow::Error::new(err)
            .context(format!("decoding {} stopped at file offset {offset}", cli.input)));
    }

    let text = render(&cli, &mut decoder)?;
    emit(cli.out.as_deref(), &text)
}
