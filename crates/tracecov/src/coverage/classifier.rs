//! Multi-pass line classification.
//!
//! Line tracers report only some executed lines: the last physical line of
//! a multi-line statement, and nothing at all for comments, blank lines and
//! docstrings. Starting from a seed (`Covered` where the tracer reported a
//! line, `Unknown` elsewhere) four ordered passes fill in the rest:
//!
//! 1. [`correct_statement_tails`]: the body of a multi-line statement
//!    whose tail was reported becomes `Inferred`.
//! 2. [`promote_definition_comments`]: comment banners directly above a
//!    `def`/`class` become `Inferred`.
//! 3. [`classify_structure`]: a forward scan over docstrings attached to hit
//!    code, never-reported statements, and filler between hit lines.
//! 4. [`extrapolate_tail`]: lines past the last reported line, typically
//!    added by edits after the trace run.
//!
//! Each pass only writes cells that are still `Unknown`, so a `Covered`
//! seed cell is never changed.

use super::{LineClassification, LineInfo};
use crate::lexer::TokenKind;

use LineClassification::{Covered, Inferred, NotCovered, Unknown};

/// Run all four passes over `seed`.
///
/// The result always has one entry per element of `lines`: a seed of a
/// different length (record and document out of sync) is clipped or padded
/// with `Unknown` first.
#[must_use]
pub fn classify(seed: &[LineClassification], lines: &[LineInfo]) -> Vec<LineClassification> {
    let seed = fit_seed(seed, lines.len());
    let tail_start = seed.iter().rposition(|c| *c == Covered).map_or(0, |i| i + 1);

    let pass1 = correct_statement_tails(&seed, lines);
    let pass2 = promote_definition_comments(&pass1, lines);
    let pass3 = classify_structure(&pass2, lines);
    let result = extrapolate_tail(&pass3, lines, tail_start);

    tracing::debug!(
        lines = lines.len(),
        covered = count(&result, Covered),
        inferred = count(&result, Inferred),
        not_covered = count(&result, NotCovered),
        "classified lines"
    );
    result
}

fn fit_seed(seed: &[LineClassification], len: usize) -> Vec<LineClassification> {
    if seed.len() != len {
        tracing::debug!(
            seed = seed.len(),
            lines = len,
            "seed length differs from document"
        );
    }
    let mut fitted: Vec<_> = seed.iter().copied().take(len).collect();
    fitted.resize(len, Unknown);
    fitted
}

fn count(cells: &[LineClassification], wanted: LineClassification) -> usize {
    cells.iter().filter(|c| **c == wanted).count()
}

/// Pass 1: statement-tail correction.
///
/// Walking from the last line to the first, every `Covered` line that
/// continues an earlier statement turns the `Unknown` continuation lines
/// directly above it into `Inferred`. The walk stops at the first line that
/// is not itself a continuation, which is the statement head and stays
/// `Unknown`, or at a line that is already classified.
#[must_use]
pub fn correct_statement_tails(
    cells: &[LineClassification],
    lines: &[LineInfo],
) -> Vec<LineClassification> {
    let mut out = cells.to_vec();
    for i in (0..out.len()).rev() {
        if out[i] != Covered || !lines[i].continued {
            continue;
        }
        for j in (0..i).rev() {
            if out[j] != Unknown || !lines[j].continued {
                break;
            }
            out[j] = Inferred;
        }
    }
    out
}

/// Pass 2: comment blocks directly above a definition document it.
#[must_use]
pub fn promote_definition_comments(
    cells: &[LineClassification],
    lines: &[LineInfo],
) -> Vec<LineClassification> {
    let mut out = cells.to_vec();
    for i in 0..out.len() {
        if !lines[i].first_token.is_definition() {
            continue;
        }
        for j in (0..i).rev() {
            if lines[j].first_token != TokenKind::Comment {
                break;
            }
            if out[j] == Unknown {
                out[j] = Inferred;
            }
        }
    }
    out
}

/// Pass 3: forward structural classification.
///
/// Lines that are no longer `Unknown` are skipped. For the rest:
///
/// - a docstring (first token `StringBegin` or `StringLiteral`) whose next
///   code line is hit is `Inferred` together with every line up to it;
/// - a statement head that is still `Unknown` was never reported: it and its
///   `Unknown` continuation lines become `NotCovered`;
/// - a continuation line still `Unknown` here stays `Unknown`;
/// - a run of blank or comment lines is `Inferred` when the next classified
///   line is hit and is not a definition, and stays `Unknown` otherwise.
#[must_use]
pub fn classify_structure(
    cells: &[LineClassification],
    lines: &[LineInfo],
) -> Vec<LineClassification> {
    let mut out = cells.to_vec();
    let n = out.len();
    let mut i = 0;

    while i < n {
        if out[i] != Unknown {
            i += 1;
            continue;
        }

        let kind = lines[i].first_token;
        if !kind.is_executable() {
            let mut j = i + 1;
            while j < n && out[j] == Unknown && !lines[j].first_token.is_executable() {
                j += 1;
            }
            if j < n && out[j].is_hit() && !lines[j].first_token.is_definition() {
                fill_unknown(&mut out[i..j], Inferred);
            }
            i = j;
            continue;
        }

        if matches!(kind, TokenKind::StringBegin | TokenKind::StringLiteral) {
            let code = (i + 1..n).find(|&j| {
                let next = lines[j].first_token;
                next.is_executable() && !next.is_string()
            });
            if let Some(j) = code.filter(|&j| out[j].is_hit()) {
                fill_unknown(&mut out[i..j], Inferred);
                i = j;
                continue;
            }
        }

        if lines[i].continued {
            // Tail never executed; see `continuation_without_tail_stays_unknown`
            i += 1;
            continue;
        }

        out[i] = NotCovered;
        let mut j = i + 1;
        while j < n && out[j] == Unknown && lines[j].continued {
            out[j] = NotCovered;
            j += 1;
        }
        i = j;
    }
    out
}

/// Pass 4: tail-of-file extrapolation.
///
/// `tail_start` is the 1-based number of the last line the tracer reported
/// (0 when it reported none). From there on, blank and comment lines before
/// the first code line inherit `Inferred` from a hit predecessor; from the
/// first code line onward every `Unknown` line is `NotCovered`.
#[must_use]
pub fn extrapolate_tail(
    cells: &[LineClassification],
    lines: &[LineInfo],
    tail_start: usize,
) -> Vec<LineClassification> {
    let mut out = cells.to_vec();
    let tail_start = tail_start.min(out.len());
    let last = tail_start
        .checked_sub(1)
        .map_or(Unknown, |index| out[index]);

    let mut reached_code = false;
    for i in tail_start..out.len() {
        reached_code |= lines[i].first_token.is_executable();
        if out[i] != Unknown {
            continue;
        }
        if reached_code {
            out[i] = NotCovered;
        } else if last.is_hit() {
            out[i] = Inferred;
        }
    }
    out
}

fn fill_unknown(cells: &mut [LineClassification], value: LineClassification) {
    for cell in cells.iter_mut().filter(|c| **c == Unknown) {
        *cell = value;
    }
}
