use std::borrow::Cow;
use std::sync::LazyLock;

/// Result markers in the order they are tried. Only the first one present is
/// removed from a line.
pub const RESULT_MARKERS: [&str; 3] = ["1-0", "0-1", "1/2-1/2"];

static MOVE_NUMBER_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\d+\.$").expect("valid move number regex"));

/// Removes the first occurrence of the highest-priority result marker found
/// in `line`, then trims. Lines without a marker are returned as-is.
pub fn strip_result_marker(line: &str) -> Cow<'_, str> {
    match RESULT_MARKERS.iter().find(|m| line.contains(**m)) {
        Some(marker) => Cow::Owned(line.replacen(*marker, "", 1).trim().to_string()),
        None => Cow::Borrowed(line),
    }
}

/// `"1."`, `"23."` and the like.
pub fn is_move_number(token: &str) -> bool {
    MOVE_NUMBER_RE.is_match(token)
}

/// A whitespace token of a game line, already classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    MoveNumber(&'a str),
    Move(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(raw: &'a str) -> Self {
        if is_move_number(raw) {
            Token::MoveNumber(raw)
        } else {
            Token::Move(raw)
        }
    }
}

/// Splits stripped movetext into classified tokens, left to right.
pub fn tokenize(movetext: &str) -> impl Iterator<Item = Token<'_>> {
    movetext.split_whitespace().map(Token::classify)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_each_marker() {
        assert_eq!(strip_result_marker("1. e4 e5 1-0"), "1. e4 e5");
        assert_eq!(strip_result_marker("1. e4 e5 0-1"), "1. e4 e5");
        assert_eq!(strip_result_marker("1. e4 d6 2. f4 c6 1/2-1/2"), "1. e4 d6 2. f4 c6");
    }

    #[test]
    fn test_strip_without_marker_borrows() {
        let line = "1. e4 e5";
        assert!(matches!(strip_result_marker(line), Cow::Borrowed("1. e4 e5")));
    }

    #[test]
    fn test_strip_priority_only_first_type_checked() {
        // "1-0" wins over "0-1"; the other marker survives.
        assert_eq!(strip_result_marker("0-1 e4 1-0"), "0-1 e4");
    }

    #[test]
    fn test_strip_removes_only_first_occurrence() {
        assert_eq!(strip_result_marker("1-0 e4 1-0"), "e4 1-0");
    }

    #[test]
    fn test_strip_draw_inside_longer_text() {
        // "1/2-1/2" does not contain "1-0" or "0-1" as substrings.
        assert_eq!(strip_result_marker("e4 1/2-1/2 "), "e4");
    }

    #[test]
    fn test_move_number_tokens() {
        assert!(is_move_number("1."));
        assert!(is_move_number("23."));
        assert!(is_move_number("100."));
    }

    #[test]
    fn test_non_move_number_tokens() {
        assert!(!is_move_number("."));
        assert!(!is_move_number("1..."));
        assert!(!is_move_number("1.e4"));
        assert!(!is_move_number("e4"));
        assert!(!is_move_number("12"));
    }

    #[test]
    fn test_tokenize_classifies_in_order() {
        let tokens: Vec<_> = tokenize("1. e4  e5\t2. Nf3").collect();
        assert_eq!(
            tokens,
            vec![
                Token::MoveNumber("1."),
                Token::Move("e4"),
                Token::Move("e5"),
                Token::MoveNumber("2."),
                Token::Move("Nf3"),
            ]
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("   ").count(), 0);
    }
}
