//! Line scanner: first token and continuation state per physical line.

use crate::lexer::{tokenize, LineIndex, Token, TokenKind};
use serde::{Deserialize, Serialize};

/// Lexical facts about one physical line of the live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInfo {
    /// Kind of the first significant token on the line
    pub first_token: TokenKind,
    /// Whether the line continues a statement begun on an earlier line
    pub continued: bool,
}

impl LineInfo {
    /// Create line info
    #[must_use]
    pub const fn new(first_token: TokenKind, continued: bool) -> Self {
        Self {
            first_token,
            continued,
        }
    }
}

/// Running statement state while walking the token stream.
#[derive(Debug, Default, Clone, Copy)]
struct ContinuationState {
    bracket_balance: i64,
    pending_continuation: bool,
}

impl ContinuationState {
    fn consume(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::GroupOpen => self.bracket_balance += 1,
            TokenKind::GroupClose => self.bracket_balance -= 1,
            _ => {}
        }
        if kind == TokenKind::ContinuationOperator {
            self.pending_continuation = true;
        } else if !kind.is_trivia() {
            self.pending_continuation = false;
        }
    }

    const fn continued(self) -> bool {
        self.pending_continuation || self.bracket_balance > 0
    }
}

/// Tokenize `text` and scan it.
#[must_use]
pub fn scan_text(text: &str) -> Vec<LineInfo> {
    let index = LineIndex::new(text);
    let tokens = tokenize(text);
    scan_lines(text, &index, &tokens)
}

/// Produce one [`LineInfo`] per line of `index`.
///
/// `tokens` must be in offset order. Continuation state is sampled where
/// each line's first token begins, so a token that spans several lines
/// (a triple-quoted string body) is seen by all of them in the same state.
#[must_use]
pub fn scan_lines(text: &str, index: &LineIndex, tokens: &[Token]) -> Vec<LineInfo> {
    let line_count = index.line_count();
    let mut lines: Vec<LineInfo> = Vec::with_capacity(line_count);
    let mut state = ContinuationState::default();
    let mut consumed = 0;

    for line in 0..line_count {
        let offset = index
            .first_significant(line, text)
            .unwrap_or(text.len());

        let Some(found) = token_at(tokens, offset) else {
            // Past the last token: nothing new can start here
            let continued = lines.last().is_some_and(|prev| prev.continued);
            lines.push(LineInfo::new(TokenKind::Whitespace, continued));
            continue;
        };

        let anchor = tokens[found].span.start;
        while consumed < tokens.len() && tokens[consumed].span.start < anchor {
            state.consume(tokens[consumed].kind);
            consumed += 1;
        }
        lines.push(LineInfo::new(tokens[found].kind, state.continued()));
    }

    lines
}

/// Index of the token covering or starting at `offset`.
fn token_at(tokens: &[Token], offset: usize) -> Option<usize> {
    let after = tokens.partition_point(|t| t.span.start <= offset);
    let candidate = after.checked_sub(1)?;
    tokens[candidate].span.touches(offset).then_some(candidate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use TokenKind::{
        Class, Comment, Def, GroupClose, Newline, Other, StringBegin, StringEnd, StringLiteral,
        Whitespace,
    };

    fn firsts(lines: &[LineInfo]) -> Vec<TokenKind> {
        lines.iter().map(|l| l.first_token).collect()
    }

    fn continued(lines: &[LineInfo]) -> Vec<bool> {
        lines.iter().map(|l| l.continued).collect()
    }

    #[test]
    fn test_line_count_matches_document() {
        assert_eq!(scan_text("").len(), 1);
        assert_eq!(scan_text("a\nb").len(), 2);
        assert_eq!(scan_text("a\nb\n").len(), 3);
    }

    #[test]
    fn test_simple_statements() {
        let lines = scan_text("x = 1\ny = 2\nz = 3");
        assert_eq!(firsts(&lines), vec![Other, Other, Other]);
        assert_eq!(continued(&lines), vec![false, false, false]);
    }

    #[test]
    fn test_bracket_continuation() {
        let lines = scan_text("x = (1 +\n     2 +\n     3)\ny = 4");
        assert_eq!(continued(&lines), vec![false, true, true, false]);
    }

    #[test]
    fn test_closing_bracket_line_is_continued() {
        let lines = scan_text("f(\n    a,\n)");
        assert_eq!(firsts(&lines)[2], GroupClose);
        assert_eq!(continued(&lines), vec![false, true, true]);
    }

    #[test]
    fn test_backslash_continuation() {
        let lines = scan_text("x = 1 + \\\n    2\ny = 3");
        assert_eq!(continued(&lines), vec![false, true, false]);
    }

    #[test]
    fn test_trailing_operator_continuation() {
        let lines = scan_text("x = a and\nb\nc");
        assert_eq!(continued(&lines), vec![false, true, false]);
    }

    #[test]
    fn test_star_import_does_not_continue() {
        let lines = scan_text("from os import *\nx = 1\ny = 2");
        assert_eq!(continued(&lines), vec![false, false, false]);
    }

    #[test]
    fn test_trailing_multiplication_still_continues() {
        let lines = scan_text("x = a *\nb");
        assert_eq!(continued(&lines), vec![false, true]);
    }

    #[test]
    fn test_comment_does_not_clear_pending_continuation() {
        let lines = scan_text("x = 1 + \\\n# note\n2");
        assert_eq!(firsts(&lines), vec![Other, Comment, Other]);
        assert_eq!(continued(&lines), vec![false, true, true]);
    }

    #[test]
    fn test_blank_lines() {
        let lines = scan_text("a\n\n    \nb");
        assert_eq!(firsts(&lines), vec![Other, Newline, Whitespace, Other]);
    }

    #[test]
    fn test_definitions() {
        let lines = scan_text("# banner\nclass A:\n    def f(self):\n        pass\n");
        assert_eq!(
            firsts(&lines),
            vec![Comment, Class, Def, Other, Whitespace]
        );
    }

    #[test]
    fn test_docstring_lines() {
        let text = "def f():\n    \"\"\"Summary.\n\n    Details.\n    \"\"\"\n    return 1\n";
        let lines = scan_text(text);
        assert_eq!(
            firsts(&lines),
            vec![
                Def,
                StringBegin,
                StringLiteral,
                StringLiteral,
                StringEnd,
                Other,
                Whitespace
            ]
        );
        assert!(continued(&lines).iter().all(|c| !c));
    }

    #[test]
    fn test_tail_of_file_copies_previous_continuation() {
        let lines = scan_text("x = (1,\n     2,\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].first_token, Whitespace);
        assert!(lines[2].continued);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let text = "def f(a,\n      b):\n    return a + \\\n        b\n";
        assert_eq!(scan_text(text), scan_text(text));
    }

    #[test]
    fn test_token_at_lookup() {
        let tokens = tokenize("ab cd");
        assert_eq!(token_at(&tokens, 0), Some(0));
        assert_eq!(token_at(&tokens, 1), Some(0));
        assert_eq!(token_at(&tokens, 2), Some(1));
        assert_eq!(token_at(&tokens, 5), None);
        assert_eq!(token_at(&[], 0), None);
    }
}
