use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use nepali_unicode::{GlyphTable, LegacyFont};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Bincode,
}

/// Dump a legacy font's glyph table.
#[derive(Parser, Debug)]
struct Args {
    #[clap(long, default_value = "preeti")]
    font: LegacyFont,

    #[clap(long, value_enum, default_value = "json")]
    format: Format,

    #[clap(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = GlyphTable::for_font(args.font);
    let entries = table.entries();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
        None => Box::new(io::stdout()),
    };

    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &entries)?;
            writeln!(out)?;
        }
        Format::Bincode => {
            let bytes = bincode::serialize(&entries)?;
            out.write_all(&bytes)?;
        }
    }

    eprintln!("Font: {}", table.font());
    eprintln!("Entries: {}", entries.len());
    Ok(())
}
