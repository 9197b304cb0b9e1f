//! Lexical errors.

use crate::token::{continuations_of, Delimiter};
use std::num::ParseIntError;
use tapeir_core::text::{text_pos, TextSpan};
use tapeir_diagnostics::{messages, Diagnostic};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexError>;

/// The first error a scan runs into. Scanning never recovers from one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A sentinel (`S`, `a`, `s`) is the last character of the input.
    #[error("unexpected end of input after '{sentinel}' at index {index}")]
    MissingContinuation {
        sentinel: char,
        /// Index of the sentinel.
        index: usize,
    },

    /// A sentinel is followed by a character that does not complete a command.
    #[error("malformed command '{sentinel}{found}' at index {index}")]
    MalformedSequence {
        sentinel: char,
        found: char,
        /// Index of the sentinel.
        index: usize,
    },

    /// A `{` or `|` is never closed.
    #[error("no closing '{close}' for '{delimiter}' at index {index}", close = .delimiter.close())]
    MissingClosingDelimiter {
        delimiter: Delimiter,
        /// Index of the opening delimiter.
        index: usize,
    },

    /// The text between two delimiters is not a base-10 integer.
    #[error("can't convert \"{text}\" to an integer at index {index}")]
    InvalidNumber {
        /// The raw text between the delimiters.
        text: String,
        /// Index just past the opening delimiter.
        index: usize,
        source: ParseIntError,
    },
}

/// The three families of lexical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// A two-character command that is cut short or misspelled.
    MalformedCommand,
    MissingClosingDelimiter,
    InvalidNumber,
}

impl LexError {
    pub fn kind(&self) -> LexErrorKind {
        match self {
            LexError::MissingContinuation { .. } | LexError::MalformedSequence { .. } => {
                LexErrorKind::MalformedCommand
            }
            LexError::MissingClosingDelimiter { .. } => LexErrorKind::MissingClosingDelimiter,
            LexError::InvalidNumber { .. } => LexErrorKind::InvalidNumber,
        }
    }

    /// The character index the error is reported at.
    pub fn index(&self) -> usize {
        match *self {
            LexError::MissingContinuation { index, .. }
            | LexError::MalformedSequence { index, .. }
            | LexError::MissingClosingDelimiter { index, .. }
            | LexError::InvalidNumber { index, .. } => index,
        }
    }

    /// The offending source text as a character span.
    pub fn span(&self) -> TextSpan {
        let start = text_pos(self.index());
        match self {
            LexError::MissingContinuation { .. } | LexError::MissingClosingDelimiter { .. } => {
                TextSpan::new(start, 1)
            }
            LexError::MalformedSequence { .. } => TextSpan::new(start, 2),
            LexError::InvalidNumber { text, .. } => {
                TextSpan::new(start, text_pos(text.chars().count()))
            }
        }
    }

    /// Convert into a located diagnostic. `file` is left unset when `None`.
    pub fn to_diagnostic(&self, file: Option<&str>) -> Diagnostic {
        let span = self.span();
        let diagnostic = match self {
            LexError::MissingContinuation { sentinel, .. } => {
                let (first, second) = continuation_strings(*sentinel);
                Diagnostic::with_span(
                    span,
                    &messages::UNEXPECTED_END_AFTER_0,
                    &[&sentinel.to_string(), &first, &second],
                )
            }
            LexError::MalformedSequence { sentinel, found, .. } => {
                let (first, second) = continuation_strings(*sentinel);
                Diagnostic::with_span(
                    span,
                    &messages::MALFORMED_COMMAND_0_1,
                    &[&sentinel.to_string(), &found.to_string(), &first, &second],
                )
            }
            LexError::MissingClosingDelimiter { delimiter, .. } => Diagnostic::with_span(
                span,
                &messages::NO_CLOSING_0_FOR_1,
                &[&delimiter.close().to_string(), &delimiter.open().to_string()],
            ),
            LexError::InvalidNumber { text, source, .. } => Diagnostic::with_span(
                span,
                &messages::CANNOT_CONVERT_0_TO_INTEGER,
                &[text, &source.to_string()],
            ),
        };
        match file {
            Some(file) => diagnostic.in_file(file),
            None => diagnostic,
        }
    }
}

fn continuation_strings(sentinel: char) -> (String, String) {
    continuations_of(sentinel)
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .unwrap_or_default()
}
