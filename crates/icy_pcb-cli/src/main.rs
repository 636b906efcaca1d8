//! pcb2png - Render PCBoard art files to PNG
//!
//! A command-line front end for the `icy_pcb` decoder.

use clap::Parser;
use icy_pcb::{pcb_convert, sauce_strip, Bits, ConvertOptions, SauceRecord};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcb2png")]
#[command(version)]
#[command(about = "Render PCBoard art files to PNG", long_about = None)]
struct Cli {
    /// Input PCBoard file
    input: PathBuf,

    /// Output PNG file (default: input path with .png appended)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font to render with (80x25 or 80x50)
    #[arg(short, long, default_value = "80x25")]
    font: String,

    /// Glyph cell width; 9 renders the VGA 9th column
    #[arg(short, long, default_value = "8", value_parser = clap::value_parser!(u8).range(8..=9))]
    bits: u8,

    /// Number of text columns to wrap at
    #[arg(short, long, default_value = "80")]
    columns: usize,

    /// Additionally write a double-resolution @2x PNG
    #[arg(short, long)]
    retina: bool,

    /// Show the SAUCE record and exit without rendering
    #[arg(short, long)]
    sauce: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data = fs::read(&cli.input)
        .map_err(|e| format!("Failed to read '{}': {}", cli.input.display(), e))?;
    let (body, record) = sauce_strip(&data);

    if cli.sauce {
        match record {
            Some(record) => print_sauce(&record),
            None => eprintln!("File '{}' does not have a SAUCE record.", cli.input.display()),
        }
        return Ok(());
    }

    let output = cli
        .output
        .unwrap_or_else(|| append_suffix(&cli.input, ".png"));
    let retina_output = cli.retina.then(|| retina_path(&output));

    let options = ConvertOptions {
        font: cli.font.clone(),
        bits: Bits::try_from(cli.bits)?,
        columns: cli.columns,
    };

    pcb_convert(body, &options, &output, retina_output.as_deref())?;

    eprintln!("Input File: {}", cli.input.display());
    eprintln!("Output File: {}", output.display());
    if let Some(path) = &retina_output {
        eprintln!("Retina Output File: {}", path.display());
    }
    eprintln!("Font: {}", cli.font);
    eprintln!("Bits: {}", cli.bits);

    Ok(())
}

fn append_suffix(path: &PathBuf, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path);
    name.push(suffix);
    PathBuf::from(name)
}

/// `dir/art.png` -> `dir/art@2x.png`
fn retina_path(output: &PathBuf) -> PathBuf {
    match output.extension() {
        Some(ext) => {
            let mut name = OsString::from(output.with_extension(""));
            name.push("@2x.");
            name.push(ext);
            PathBuf::from(name)
        }
        None => append_suffix(output, "@2x.png"),
    }
}

fn print_sauce(record: &SauceRecord) {
    println!("Id: SAUCE v{}", record.version);
    println!("Title: {}", record.title);
    println!("Author: {}", record.author);
    println!("Group: {}", record.group);
    println!("Date: {}", record.date);
    println!("Datatype: {}", record.data_type);
    println!("Filetype: {}", record.file_type);
    if record.flags != 0 {
        println!("Flags: {}", record.flags);
    }
    for (tinfo, value) in [
        ("Tinfo1", record.tinfo1),
        ("Tinfo2", record.tinfo2),
        ("Tinfo3", record.tinfo3),
        ("Tinfo4", record.tinfo4),
    ] {
        if value != 0 {
            println!("{}: {}", tinfo, value);
        }
    }
    if !record.comments.is_empty() {
        println!("Comments:");
        for line in &record.comments {
            println!("  {}", line);
        }
    }
}
