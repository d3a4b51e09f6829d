//! Diagnostics for lexical and syntactic failures
//!
//! Lexing and parsing are fail-fast: the first problem becomes a single
//! [`Diagnostic`] carrying its position, the token kinds that would have been
//! accepted there, and the offending text. [`Diagnostic::render`] turns it into
//! a report with a source snippet and caret.

pub mod render;
pub mod typo;

pub use render::RenderOptions;

use crate::ast::Position;
use crate::lexer::{Token, TokenKind, ENTITY_KINDS};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Taxonomy of failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    InvalidCharacter,
    UnterminatedString,
    /// An integer literal that does not fit the type its position requires
    InvalidNumber,
    UnexpectedToken,
    UnexpectedEndOfInput,
    /// Groups or function calls nested past the parser's depth limit
    NestingTooDeep,
}

impl DiagnosticKind {
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            DiagnosticKind::InvalidCharacter
                | DiagnosticKind::UnterminatedString
                | DiagnosticKind::InvalidNumber
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::InvalidCharacter => "invalid character",
            DiagnosticKind::UnterminatedString => "unterminated string",
            DiagnosticKind::InvalidNumber => "invalid number",
            DiagnosticKind::UnexpectedToken => "unexpected token",
            DiagnosticKind::UnexpectedEndOfInput => "unexpected end of input",
            DiagnosticKind::NestingTooDeep => "nesting too deep",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message} at line {}, column {}{}", .position.line, .position.column, expected_suffix(.expected))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub position: Position,
    pub message: String,
    /// Token kinds accepted at `position`, in grammar order and without duplicates
    pub expected: Vec<TokenKind>,
    /// The offending source text, when there is one
    pub found: Option<String>,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, position: Position, message: String) -> Self {
        Self {
            kind,
            position,
            message,
            expected: Vec::new(),
            found: None,
            suggestion: None,
        }
    }

    pub fn invalid_character(ch: char, position: Position) -> Self {
        let mut diagnostic = Self::new(
            DiagnosticKind::InvalidCharacter,
            position,
            format!("invalid character `{}`", ch.escape_debug()),
        );
        diagnostic.found = Some(ch.to_string());
        diagnostic
    }

    /// `position` is where the opening quote sits.
    pub fn unterminated_string(quote: char, position: Position) -> Self {
        let mut diagnostic = Self::new(
            DiagnosticKind::UnterminatedString,
            position,
            format!("unterminated string literal, missing closing {}", quote),
        );
        diagnostic.found = Some(quote.to_string());
        diagnostic
    }

    pub fn invalid_number(token: &Token<'_>, reason: &str) -> Self {
        let mut diagnostic = Self::new(
            DiagnosticKind::InvalidNumber,
            token.position,
            format!("invalid number `{}`: {}", token.lexeme, reason),
        );
        diagnostic.found = Some(token.lexeme.to_string());
        diagnostic
    }

    /// `open` is the parenthesis that would go one level past `limit`.
    pub fn nesting_too_deep(open: &Token<'_>, limit: usize) -> Self {
        let mut diagnostic = Self::new(
            DiagnosticKind::NestingTooDeep,
            open.position,
            format!("nesting deeper than {} levels", limit),
        );
        diagnostic.found = Some(open.lexeme.to_string());
        diagnostic
    }

    /// A token that no grammar rule accepts at this point.
    ///
    /// An `Eof` token turns into `UnexpectedEndOfInput`. An identifier that is
    /// a near miss for one of the expected keywords gets a suggestion.
    pub fn unexpected(found: &Token<'_>, expected: &[TokenKind]) -> Self {
        let mut unique: Vec<TokenKind> = Vec::with_capacity(expected.len());
        for &kind in expected {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }

        let mut diagnostic = if found.is_eof() {
            Self::new(
                DiagnosticKind::UnexpectedEndOfInput,
                found.position,
                "unexpected end of input".to_string(),
            )
        } else {
            let message = if found.kind.is_keyword() {
                format!("unexpected keyword `{}`", found.lexeme)
            } else if found.kind.is_value_start() || found.kind == TokenKind::Identifier {
                format!("unexpected {} `{}`", found.kind, found.lexeme)
            } else {
                format!("unexpected `{}`", found.lexeme)
            };
            let mut diagnostic =
                Self::new(DiagnosticKind::UnexpectedToken, found.position, message);
            diagnostic.found = Some(found.lexeme.to_string());
            diagnostic
        };

        if found.kind == TokenKind::Identifier {
            diagnostic.suggestion = typo::closest_keyword(found.lexeme, &unique)
                .map(|keyword| format!("did you mean `{}`?", keyword));
        }
        diagnostic.expected = unique;
        diagnostic
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_lexical(&self) -> bool {
        self.kind.is_lexical()
    }

    /// The expected set as display strings, with the full entity list folded
    /// into a single "an entity" entry.
    pub fn expected_descriptions(&self) -> Vec<String> {
        describe_expected(&self.expected)
    }
}

fn describe_expected(expected: &[TokenKind]) -> Vec<String> {
    let all_entities = ENTITY_KINDS.iter().all(|kind| expected.contains(kind));
    let mut descriptions = Vec::new();
    let mut entities_listed = false;
    for kind in expected {
        if all_entities && kind.is_entity() {
            if !entities_listed {
                descriptions.push("an entity".to_string());
                entities_listed = true;
            }
            continue;
        }
        descriptions.push(kind.describe().to_string());
    }
    descriptions
}

fn expected_suffix(expected: &[TokenKind]) -> String {
    let descriptions = describe_expected(expected);
    match descriptions.as_slice() {
        [] => String::new(),
        [only] => format!(", expected {}", only),
        [init @ .., last] => format!(", expected {} or {}", init.join(", "), last),
    }
}
