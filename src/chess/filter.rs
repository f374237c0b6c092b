use smallvec::SmallVec;
use std::io;
use std::ops::ControlFlow;

use pgn_reader::{Nag, Outcome, RawComment, Reader, SanPlus, Skip, Visitor};

use super::movetext::RESULT_MARKERS;

type SanList = SmallVec<[String; 128]>;

/// Strips comments `{}`, variations `()` and NAGs (`$n`, `!`, `?`, ...) from a
/// PGN-style game line, keeping the mainline SAN moves and the result marker.
///
/// Returns `None` when the PGN reader finds no mainline move at all; callers
/// fall back to the raw line so the converter reports the offending token.
pub fn strip_annotations(line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }

    let mut reader = Reader::new(io::Cursor::new(line.as_bytes()));
    let mut visitor = MainlineVisitor::default();

    match reader.read_game(&mut visitor) {
        Ok(Some(())) if !visitor.sans.is_empty() => Some(visitor.render()),
        Ok(_) | Err(_) => None,
    }
}

#[derive(Default)]
struct MainlineVisitor {
    sans: SanList,
    outcome: Option<String>,
}

impl MainlineVisitor {
    fn render(&self) -> String {
        let mut out = self.sans.join(" ");
        if let Some(outcome) = &self.outcome {
            out.push(' ');
            out.push_str(outcome);
        }
        out
    }
}

impl Visitor for MainlineVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.sans.clear();
        self.outcome = None;
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _tags: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn san(
        &mut self,
        _movetext: &mut Self::Movetext,
        san_plus: SanPlus,
    ) -> ControlFlow<Self::Output> {
        self.sans.push(san_plus.to_string());
        ControlFlow::Continue(())
    }

    fn nag(&mut self, _: &mut Self::Movetext, _: Nag) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn comment(&mut self, _: &mut Self::Movetext, _: RawComment<'_>) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn partial_comment(
        &mut self,
        _: &mut Self::Movetext,
        _: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn outcome(
        &mut self,
        _movetext: &mut Self::Movetext,
        outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        // "*" carries no result and would otherwise be read as a move.
        let marker = outcome.to_string();
        if RESULT_MARKERS.contains(&marker.as_str()) {
            self.outcome = Some(marker);
        }
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _movetext: Self::Movetext) -> Self::Output {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::convert;

    #[test]
    fn test_strip_comments_variations_and_nags() {
        let input = "1. e4! {Best by test} (1. d4 d5) e5?? $1 2. Nf3";
        assert_eq!(strip_annotations(input).as_deref(), Some("e4 e5 Nf3"));
    }

    #[test]
    fn test_strip_keeps_result_marker() {
        let input = "1. e4 e5 2. Qh5 Nc6 3. Qxf7# { checkmate } 1-0";
        assert_eq!(
            strip_annotations(input).as_deref(),
            Some("e4 e5 Qh5 Nc6 Qxf7# 1-0")
        );
    }

    #[test]
    fn test_strip_lichess_clock_comments() {
        let input = "1. d4 { [%eval 0.25] [%clk 1:30:43] } Nf6 { [%eval 0.22] [%clk 1:30:42] }";
        assert_eq!(strip_annotations(input).as_deref(), Some("d4 Nf6"));
    }

    #[test]
    fn test_stripped_line_converts() {
        let stripped = strip_annotations("1. e4 {pawn} e5 (1... c5) 2. Nf3 $1").unwrap();
        assert_eq!(convert(&stripped), "e2e4 e7e5 g1f3");
    }

    #[test]
    fn test_strip_empty_and_moveless_lines() {
        assert_eq!(strip_annotations(""), None);
        assert_eq!(strip_annotations("   "), None);
        assert_eq!(strip_annotations("{only a comment}"), None);
        assert_eq!(strip_annotations("this is not movetext"), None);
    }
}
