//! Chess rules capability used by the converter.
//!
//! The converter never looks inside a board or a move. Everything it needs
//! (starting position, SAN resolution, playing a move, coordinate rendering)
//! goes through [`Rules`], so another rules library can be dropped in.

use shakmaty::{
    CastlingMode, Chess, EnPassantMode, Move, Position, fen::Fen, san::SanPlus, uci::UciMove,
};

use std::borrow::Cow;

use super::error::MoveError;

pub trait Rules {
    type Board: Clone;
    type Move;

    /// Standard initial position.
    fn start(&self) -> Self::Board;

    /// Resolves a SAN token against `board`.
    fn parse_san(&self, board: &Self::Board, token: &str) -> Result<Self::Move, MoveError>;

    /// Plays a move previously resolved against `board`.
    fn apply(&self, board: &mut Self::Board, m: Self::Move);

    /// Coordinate notation, e.g. `e2e4`, `e1g1`, `e7e8q`.
    fn render_uci(&self, m: &Self::Move) -> String;

    /// Resolves a coordinate-notation token against `board`.
    fn parse_uci(&self, board: &Self::Board, token: &str) -> Result<Self::Move, MoveError>;

    /// Identity of a position, equal for equal positions.
    fn fingerprint(&self, board: &Self::Board) -> String;
}

/// [`Rules`] backed by `shakmaty`, standard chess only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShakmatyRules;

/// Rewrites spellings other SAN readers accept into the form `shakmaty`
/// parses: zero castling (`0-0`, `0-0-0`) and promotions without `=`
/// (`bxa8Q`, `e8q`). Anything else is returned untouched.
pub fn normalize_san(token: &str) -> Cow<'_, str> {
    let body = token.trim_end_matches(['+', '#']);
    let suffix = &token[body.len()..];

    match body {
        "0-0" => return Cow::Owned(format!("O-O{suffix}")),
        "0-0-0" => return Cow::Owned(format!("O-O-O{suffix}")),
        _ => {}
    }

    let bytes = body.as_bytes();
    if let [.., file, rank, piece] = bytes
        && (b'a'..=b'h').contains(file)
        && matches!(rank, b'1' | b'8')
        && matches!(piece.to_ascii_uppercase(), b'N' | b'B' | b'R' | b'Q' | b'K')
    {
        let square = &body[..body.len() - 1];
        let piece = char::from(piece.to_ascii_uppercase());
        return Cow::Owned(format!("{square}={piece}{suffix}"));
    }

    Cow::Borrowed(token)
}

impl Rules for ShakmatyRules {
    type Board = Chess;
    type Move = Move;

    fn start(&self) -> Chess {
        Chess::default()
    }

    fn parse_san(&self, board: &Chess, token: &str) -> Result<Move, MoveError> {
        let san = normalize_san(token)
            .parse::<SanPlus>()
            .map_err(|e| MoveError::Illegal(e.to_string()))?;

        san.san
            .to_move(board)
            .map_err(|e| MoveError::Illegal(e.to_string()))
    }

    fn apply(&self, board: &mut Chess, m: Move) {
        board.play_unchecked(m);
    }

    fn render_uci(&self, m: &Move) -> String {
        m.to_uci(CastlingMode::Standard).to_string()
    }

    fn parse_uci(&self, board: &Chess, token: &str) -> Result<Move, MoveError> {
        let uci = token
            .parse::<UciMove>()
            .map_err(|e| MoveError::Illegal(e.to_string()))?;

        uci.to_move(board)
            .map_err(|e| MoveError::Illegal(e.to_string()))
    }

    fn fingerprint(&self, board: &Chess) -> String {
        Fen::from_position(board, EnPassantMode::Legal).to_string()
    }
}
