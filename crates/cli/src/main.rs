//! CLI tool for extracting text from PowerPoint and PDF files.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use doctext_core::{aggregate, ReportFormatter, ScratchDir, DEFAULT_SCRATCH_DIR};
use doctext_pdf::PdfTextExtractor;
use doctext_pptx::extractor::{DEFAULT_MAX_ENTRIES, DEFAULT_MAX_ENTRY_BYTES};
use doctext_pptx::{ExtractOptions, PptxExtractor};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Extract plain text from presentations and PDF documents.
#[derive(Parser, Debug)]
#[command(name = "doctext-extract")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print slide titles, body text and speaker notes from a .pptx file
    Pptx(PptxArgs),
    /// Extract the text of a .pdf file
    Pdf(PdfArgs),
}

#[derive(Args, Debug)]
struct PptxArgs {
    /// Input PowerPoint file (.pptx)
    input: PathBuf,

    /// Print slides, notes and links as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Leave speaker notes out of the text report
    #[arg(long)]
    no_notes: bool,

    /// Scratch directory removed on exit, whether or not extraction succeeds
    #[arg(long, default_value = DEFAULT_SCRATCH_DIR)]
    temp_folder: PathBuf,

    /// Reject archives with more entries than this
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,

    /// Reject entries larger than this many bytes (uncompressed)
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRY_BYTES)]
    max_entry_bytes: u64,
}

#[derive(Args, Debug)]
struct PdfArgs {
    /// Input PDF file
    input: PathBuf,

    /// Output file (default: <input stem>_extracted.txt next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match run_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Run the selected subcommand.
///
/// For `pptx` the scratch directory is removed afterwards whether or not
/// extraction succeeded.
fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Pptx(args) => {
            let mut scratch = ScratchDir::new(&args.temp_folder);
            let outcome = run_pptx(args);
            if let Err(e) = scratch.cleanup() {
                log::warn!(
                    "Failed to remove temporary folder '{}': {}",
                    scratch.path().display(),
                    e
                );
            }
            outcome
        }
        Command::Pdf(args) => run_pdf(args),
    }
}

/// Extract a presentation and print the report (or JSON) to stdout.
fn run_pptx(args: &PptxArgs) -> Result<()> {
    log::debug!("Processing: {}", args.input.display());

    let options = ExtractOptions::default()
        .with_max_entries(args.max_entries)
        .with_max_entry_bytes(args.max_entry_bytes);
    let deck = PptxExtractor::with_options(options)
        .extract_path(&args.input)
        .with_context(|| format!("Failed to extract {}", args.input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &deck).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        let report = aggregate(&deck.slides, &deck.notes, &deck.links);
        ReportFormatter::new()
            .with_notes(!args.no_notes)
            .write_to(&mut out, &report)
            .context("Failed to write report")?;
    }

    Ok(())
}

/// Extract a PDF and write the text to a file or stdout.
fn run_pdf(args: &PdfArgs) -> Result<()> {
    let extractor = PdfTextExtractor::new(&args.input)?;
    let text = extractor.extract_text()?;

    if args.print {
        println!("{}", text);
        return Ok(());
    }

    let output_path = match &args.output {
        Some(path) => path.clone(),
        None => get_output_path(&args.input),
    };
    write_output(&output_path, &text)?;
    println!(
        "Text successfully extracted and saved to {}",
        output_path.display()
    );

    Ok(())
}

/// `<stem>_extracted.txt` next to the input file.
fn get_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}_extracted.txt", stem);

    match input_path.parent() {
        Some(parent) => parent.join(output_filename),
        None => PathBuf::from(output_filename),
    }
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
