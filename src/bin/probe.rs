use anyhow::{Context, Result};
use clap::Parser;
use html_to_console::strip_markup;
use std::fs;
use std::path::PathBuf;

/// Run the markup pipeline over a file and show the plain-text result.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file containing HTML-flavored markup.
    #[arg(long)]
    html_file: PathBuf,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.html_file)
        .with_context(|| format!("reading {}", args.html_file.display()))?;

    // The pipeline emits \r line breaks for the console renderer; map them to
    // \n here so the result is viewable in an ordinary terminal.
    let plain = strip_markup(&raw).replace('\r', "\n");

    match &args.out {
        Some(path) => {
            fs::write(path, &plain).with_context(|| format!("writing {}", path.display()))?
        }
        None => print!("{plain}"),
    }
    Ok(())
}
