//! tinflate CLI - raw DEFLATE decompression tool
//!
//! Inflates a raw DEFLATE stream (no zlib or gzip header) from a file or
//! stdin and writes the decompressed bytes to a file or stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tinflate::InflateOptions;

/// Smallest default output capacity.
const MIN_DEFAULT_CAPACITY: usize = 64 * 1024;

/// Default capacity as a multiple of the input size.
const DEFAULT_EXPANSION: usize = 64;

/// Decompress a raw DEFLATE stream.
#[derive(Parser, Debug)]
#[command(name = "tinflate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file holding a raw DEFLATE stream ("-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Maximum decompressed size in bytes
    #[arg(short, long, value_name = "BYTES")]
    capacity: Option<usize>,

    /// Fail unless the output is exactly CAPACITY bytes
    #[arg(long, requires = "capacity")]
    exact: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let source = read_input(&args.input)?;
    let capacity = args.capacity.unwrap_or_else(|| default_capacity(source.len()));
    let options = InflateOptions::new(capacity).exact_size(args.exact);

    let start = Instant::now();
    let inflated = tinflate::decompress_with(&source, &options)?;
    let elapsed = start.elapsed();

    match &args.output {
        Some(path) => fs::write(path, &inflated.data)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&inflated.data)?;
            stdout.flush()?;
        }
    }

    if args.verbose {
        eprintln!("Input: {:?}", args.input);
        eprintln!("  Capacity: {}", format_size(capacity as u64));
        eprintln!(
            "  Blocks: {} stored, {} fixed, {} dynamic",
            inflated.blocks.stored, inflated.blocks.fixed, inflated.blocks.dynamic
        );
        if inflated.consumed < source.len() {
            eprintln!("  Trailing bytes: {}", source.len() - inflated.consumed);
        }
        eprintln!("  Inflate time: {:.2?}", elapsed);
        eprintln!(
            "  Size: {} -> {}",
            format_size(inflated.consumed as u64),
            format_size(inflated.data.len() as u64)
        );
    }

    Ok(())
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

fn default_capacity(input_len: usize) -> usize {
    input_len
        .saturating_mul(DEFAULT_EXPANSION)
        .max(MIN_DEFAULT_CAPACITY)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
