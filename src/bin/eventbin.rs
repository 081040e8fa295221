//! eventbin CLI
//!
//! Converts between JSON-lines events and framed binary records.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eventbin::stream::{write_event, FrameReader};
use eventbin::{peek_header, DecodeLimits, Event, EventBinError};
use tracing_subscriber::{fmt, EnvFilter};

/// eventbin CLI
#[derive(Parser, Debug)]
#[command(name = "eventbin")]
#[command(about = "Binary codec for signed event records")]
#[command(version)]
struct Args {
    /// Max accepted frame size in KB
    #[arg(long, default_value = "1024", global = true)]
    max_record_kb: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode JSON-lines events into framed binary
    Encode {
        /// JSON-lines input file
        #[arg(short, long)]
        input: PathBuf,

        /// Binary output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode framed binary into JSON lines on stdout
    Decode {
        /// Binary input file
        #[arg(short, long)]
        input: PathBuf,

        /// Drop events whose id does not match their content
        #[arg(long)]
        verify_id: bool,
    },

    /// Print the fixed header of every frame
    Inspect {
        /// Binary input file
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Per-run record counts
#[derive(Debug, Default)]
struct Tally {
    ok: u64,
    skipped: u64,
}

fn main() {
    // Logs go to stderr so stdout stays clean for decoded output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,eventbin=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let limits = match record_limits(args.max_record_kb) {
        Ok(limits) => limits,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Encode { input, output } => encode_file(&input, &output),
        Commands::Decode { input, verify_id } => decode_file(&input, &limits, verify_id),
        Commands::Inspect { input } => inspect_file(&input, &limits),
    };

    match result {
        Ok(tally) => tracing::info!(ok = tally.ok, skipped = tally.skipped, "done"),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Limits for a `--max-record-kb` value
fn record_limits(max_record_kb: usize) -> Result<DecodeLimits, EventBinError> {
    let max_record_len = max_record_kb.checked_mul(1024).ok_or_else(|| {
        EventBinError::Config(format!("max record size {} KB is too large", max_record_kb))
    })?;
    DecodeLimits::builder().max_record_len(max_record_len).build()
}

fn encode_file(input: &Path, output: &Path) -> Result<Tally, EventBinError> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    let mut tally = Tally::default();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Event::from_json(&line) {
            Ok(event) => {
                write_event(&mut writer, &event)?;
                tally.ok += 1;
            }
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "skipping malformed event");
                tally.skipped += 1;
            }
        }
    }

    writer.flush()?;
    Ok(tally)
}

fn decode_file(input: &Path, limits: &DecodeLimits, verify_id: bool) -> Result<Tally, EventBinError> {
    let frames = FrameReader::new(BufReader::new(File::open(input)?), *limits);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut tally = Tally::default();

    for (index, item) in frames.enumerate() {
        let event = match item {
            Ok(event) => event,
            Err(EventBinError::Decode(e)) => {
                tracing::warn!(frame = index, error = %e, "skipping undecodable frame");
                tally.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if verify_id {
            if let Err(e) = event.verify_id() {
                tracing::warn!(frame = index, error = %e, "skipping event");
                tally.skipped += 1;
                continue;
            }
        }

        writeln!(out, "{}", event.to_json()?)?;
        tally.ok += 1;
    }

    out.flush()?;
    Ok(tally)
}

fn inspect_file(input: &Path, limits: &DecodeLimits) -> Result<Tally, EventBinError> {
    let mut frames = FrameReader::new(BufReader::new(File::open(input)?), *limits);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut tally = Tally::default();

    while let Some(frame) = frames.next_frame()? {
        match peek_header(&frame) {
            Ok(header) => {
                writeln!(
                    out,
                    "{} {} {} {} {}",
                    header.id, header.pubkey, header.created_at, header.kind, frame.len()
                )?;
                tally.ok += 1;
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame too short for a header");
                tally.skipped += 1;
            }
        }
    }

    out.flush()?;
    Ok(tally)
}
