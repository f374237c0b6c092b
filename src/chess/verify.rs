use super::converter::Replay;
use super::engine::Rules;
use super::error::MoveError;

/// Outcome of replaying a converted game through coordinate notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Match,
    Mismatch { san: String, uci: String },
}

/// Plays UCI moves from the initial position.
pub fn replay_uci<R, S>(rules: &R, moves: &[S]) -> Result<R::Board, MoveError>
where
    R: Rules,
    S: AsRef<str>,
{
    let mut board = rules.start();
    for uci in moves {
        let m = rules.parse_uci(&board, uci.as_ref())?;
        rules.apply(&mut board, m);
    }
    Ok(board)
}

/// Checks that the UCI moves of `replay` reach the same position the SAN
/// replay did.
pub fn verify_replay<R: Rules>(
    rules: &R,
    replay: &Replay<R::Board>,
) -> Result<Verification, MoveError> {
    let uci_board = replay_uci(rules, &replay.moves)?;

    let san = rules.fingerprint(&replay.board);
    let uci = rules.fingerprint(&uci_board);

    if san == uci {
        Ok(Verification::Match)
    } else {
        Ok(Verification::Mismatch { san, uci })
    }
}
