use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use log::error;
use smallvec::SmallVec;

use super::engine::{Rules, ShakmatyRules};
use super::error::{LineError, MoveError};
use super::movetext::{Token, strip_result_marker, tokenize};

pub type UciMoves = SmallVec<[String; 128]>;

/// A fully replayed game line: its moves in coordinate notation and the
/// position they lead to.
pub struct Replay<B> {
    pub moves: UciMoves,
    pub board: B,
}

/// Converted game, rendered as space-separated UCI moves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UciGame {
    pub moves: UciMoves,
}

impl UciGame {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl fmt::Display for UciGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(m)?;
        }
        Ok(())
    }
}

/// Converts SAN game lines to UCI. Holds no per-line state; every line
/// starts from a fresh board.
#[derive(Debug, Default, Clone)]
pub struct Converter<R = ShakmatyRules> {
    rules: R,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "rules engine panicked".to_string()
    }
}

/// `e2e4`, `e7e8q`: two squares and an optional promotion letter.
fn is_uci_shaped(uci: &str) -> bool {
    let is_square = |file: u8, rank: u8| {
        (b'a'..=b'h').contains(&file) && (b'1'..=b'8').contains(&rank)
    };
    match *uci.as_bytes() {
        [f1, r1, f2, r2] => is_square(f1, r1) && is_square(f2, r2),
        [f1, r1, f2, r2, promotion] => {
            is_square(f1, r1) && is_square(f2, r2) && matches!(promotion, b'q' | b'r' | b'b' | b'n')
        }
        _ => false,
    }
}

impl<R: Rules> Converter<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Resolves and plays one token. Panics from the rules engine are turned
    /// into [`MoveError::Unexpected`]; a resolved move whose rendering is not
    /// coordinate notation is [`MoveError::Malformed`].
    fn step(&self, board: &mut R::Board, token: &str) -> Result<String, MoveError> {
        let rules = &self.rules;
        // The default panic hook stays installed, so a caught panic is still
        // echoed to stderr ahead of the logged diagnostic.
        panic::catch_unwind(AssertUnwindSafe(|| {
            let m = rules.parse_san(board, token)?;
            let uci = rules.render_uci(&m);
            if !is_uci_shaped(&uci) {
                return Err(MoveError::Malformed(format!(
                    "rules engine rendered '{uci}', which is not a coordinate move"
                )));
            }
            rules.apply(board, m);
            Ok(uci)
        }))
        .unwrap_or_else(|payload| Err(MoveError::Unexpected(panic_message(payload))))
    }

    /// Replays `line` from the initial position, keeping the final board.
    pub fn replay(&self, line: &str) -> Result<Replay<R::Board>, LineError> {
        self.replay_movetext(line, line)
    }

    /// Replays `movetext` (e.g. an annotation-stripped form of `line`),
    /// naming `line` in diagnostics.
    pub fn replay_movetext(
        &self,
        movetext: &str,
        line: &str,
    ) -> Result<Replay<R::Board>, LineError> {
        let original = line.trim();
        let movetext = strip_result_marker(movetext.trim());

        let mut board = self.rules.start();
        let mut moves = UciMoves::new();

        for token in tokenize(&movetext) {
            let Token::Move(san) = token else {
                continue;
            };

            match self.step(&mut board, san) {
                Ok(uci) => moves.push(uci),
                Err(source) => {
                    error!("Error parsing move '{san}' in line: '{original}'. Error: {source}");
                    return Err(LineError {
                        token: san.to_string(),
                        line: original.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(Replay { moves, board })
    }

    pub fn convert_line(&self, line: &str) -> Result<UciGame, LineError> {
        self.replay(line).map(|replay| UciGame {
            moves: replay.moves,
        })
    }

    /// UCI moves joined by spaces, or an `ERROR: ...` diagnostic.
    pub fn convert(&self, line: &str) -> String {
        match self.convert_line(line) {
            Ok(game) => game.to_string(),
            Err(e) => e.diagnostic(),
        }
    }
}

/// Converts one line with the default rules engine.
pub fn convert(line: &str) -> String {
    Converter::<ShakmatyRules>::default().convert(line)
}
