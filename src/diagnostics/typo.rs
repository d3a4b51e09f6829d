//! Keyword typo detection for diagnostics
//!
//! When an identifier shows up where a keyword was expected, the closest
//! expected keyword within two edits is offered as a suggestion. The keyword
//! table is the `const` [`KEYWORDS`](crate::lexer::KEYWORDS) slice, so no
//! lazy initialization is involved.

use crate::lexer::TokenKind;

const MAX_DISTANCE: usize = 2;

/// Find the expected keyword closest to `input`, if any is within two edits.
///
/// Matching ignores ASCII case. Ties go to the keyword listed first in
/// `candidates`, which keeps suggestions in grammar order. An input is never
/// "corrected" by an edit count as long as the input itself, so `x` does not
/// suggest `AS`.
pub fn closest_keyword(input: &str, candidates: &[TokenKind]) -> Option<TokenKind> {
    let input = input.to_ascii_lowercase();
    let input_len = input.chars().count();

    let mut closest = None;
    let mut min_distance = usize::MAX;
    for &kind in candidates {
        let Some(text) = kind.keyword_text() else {
            continue;
        };
        let keyword = text.to_ascii_lowercase();
        if input_len.abs_diff(keyword.chars().count()) > MAX_DISTANCE {
            continue;
        }
        let distance = levenshtein_distance(&input, &keyword);
        if distance <= MAX_DISTANCE && distance < input_len && distance < min_distance {
            min_distance = distance;
            closest = Some(kind);
        }
    }
    closest
}

/// Wagner-Fischer edit distance keeping only two rows of the matrix.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev_row[j] + usize::from(ca != cb);
            let deletion = prev_row[j + 1] + 1;
            let insertion = curr_row[j] + 1;
            curr_row[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }
    prev_row[b.len()]
}
