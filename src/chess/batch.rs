use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use super::converter::{Converter, Replay};
use super::engine::Rules;
use super::error::BatchError;
use super::filter::strip_annotations;
use super::reader::{CompressionMode, open_input};
use super::verify::{Verification, verify_replay};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub compression: CompressionMode,
    pub strip_annotations: bool,
    pub verify: bool,
}

impl BatchOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let compression =
            CompressionMode::resolve(None, &input).unwrap_or(CompressionMode::Plain);
        Self {
            input,
            output: output.into(),
            compression,
            strip_annotations: false,
            verify: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Raw lines read, blank ones included.
    pub lines_read: usize,
    pub games_written: usize,
    pub games_failed: usize,
    pub verify_mismatches: usize,
}

/// Converts every non-blank line of `input`, writing one result line per game
/// to `output`.
pub fn convert_stream<R, I, W>(
    converter: &Converter<R>,
    input: I,
    output: &mut W,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError>
where
    R: Rules,
    I: BufRead,
    W: Write,
{
    let mut summary = BatchSummary::default();

    for line in input.lines() {
        let line = line?;
        summary.lines_read += 1;

        let game_line = line.trim();
        if game_line.is_empty() {
            continue;
        }

        let stripped = options
            .strip_annotations
            .then(|| strip_annotations(game_line))
            .flatten();
        let movetext = stripped.as_deref().unwrap_or(game_line);

        let result = match converter.replay_movetext(movetext, game_line) {
            Ok(replay) => {
                if options.verify {
                    check_replay(converter, &replay, summary.lines_read, &mut summary);
                }
                replay.moves.join(" ")
            }
            Err(e) => {
                summary.games_failed += 1;
                warn!(
                    "Processed line {} with errors. See output file.",
                    summary.lines_read
                );
                e.diagnostic()
            }
        };

        writeln!(output, "{result}")?;
        summary.games_written += 1;
    }

    output.flush()?;
    Ok(summary)
}

fn check_replay<R: Rules>(
    converter: &Converter<R>,
    replay: &Replay<R::Board>,
    line_no: usize,
    summary: &mut BatchSummary,
) {
    match verify_replay(converter.rules(), replay) {
        Ok(Verification::Match) => debug!("Line {line_no} verified"),
        Ok(Verification::Mismatch { san, uci }) => {
            summary.verify_mismatches += 1;
            error!("Line {line_no} replays differently: SAN reached '{san}', UCI reached '{uci}'");
        }
        Err(e) => {
            summary.verify_mismatches += 1;
            error!("Line {line_no} UCI output does not replay: {e}");
        }
    }
}

/// Runs a whole file conversion. The output file is only created once the
/// input has been opened.
pub fn run<R: Rules>(
    converter: &Converter<R>,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    let input = open_input(&options.input, options.compression)?;
    let mut output = BufWriter::new(create_output(&options.output)?);

    convert_stream(converter, input, &mut output, options)
}

fn create_output(path: &Path) -> Result<File, BatchError> {
    Ok(File::create(path)?)
}
