use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use san2uci::chess::reader::CompressionMode;
use san2uci::chess::{self, BatchError, BatchOptions, Converter, ShakmatyRules};

#[derive(Parser, Debug)]
#[command(
    name = "san2uci",
    version,
    about = "Convert SAN chess games (one per line) to UCI moves",
    after_help = "Example: san2uci input_games.txt output_uci_games.txt"
)]
struct Args {
    /// Text file with one SAN game per line
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// File to write the UCI games to
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Input compression; `.zst` inputs are decompressed when omitted
    #[arg(long, value_name = "MODE")]
    compression: Option<String>,

    /// Drop PGN comments, variations and NAGs before converting
    #[arg(long, default_value_t = false)]
    strip_annotations: bool,

    /// Replay each converted game in UCI and report position mismatches
    #[arg(long, default_value_t = false)]
    verify: bool,
}

fn parse_args() -> Result<Args, ExitCode> {
    Args::try_parse().map_err(|e| {
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        }
    })
}

fn run(args: Args) -> Result<(), BatchError> {
    let compression = CompressionMode::resolve(args.compression.as_deref(), &args.input)?;
    if !args.input.exists() {
        return Err(BatchError::InputNotFound(args.input));
    }

    println!(
        "Starting conversion from '{}' to '{}'...",
        args.input.display(),
        args.output.display()
    );

    let options = BatchOptions {
        input: args.input,
        output: args.output,
        compression,
        strip_annotations: args.strip_annotations,
        verify: args.verify,
    };

    let summary = chess::batch::run(&Converter::new(ShakmatyRules), &options)?;

    println!(
        "\nConversion complete. Processed {} lines.",
        summary.lines_read
    );
    if summary.games_failed > 0 {
        println!("{} of {} games had errors.", summary.games_failed, summary.games_written);
    }
    if options.verify {
        println!("{} games failed UCI replay verification.", summary.verify_mismatches);
    }

    Ok(())
}

fn main() -> ExitCode {
    chess::log::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
