//! The IR scanner.
//!
//! Walks the source once, left to right. Each step either emits a token,
//! skips a character the IR does not know about, or stops with a
//! [`LexError`].

use crate::error::{LexError, Result};
use crate::token::{CommandKind, Delimiter, Token, TokenInfo, SENTINELS};
use tapeir_core::text::text_pos;

/// The scanner converts IR source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// Start of the token being scanned.
    token_start: usize,
    /// Number of unrecognized characters skipped so far.
    skipped: usize,
    /// Set once an error has been returned; the scanner is then exhausted.
    failed: bool,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            token_start: 0,
            skipped: 0,
            failed: false,
        }
    }

    /// How many unrecognized characters have been skipped.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Look at the character at position pos + offset.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token. Returns `Ok(None)` at the end of the input.
    ///
    /// After an error has been returned every further call yields `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<TokenInfo>> {
        if self.failed {
            return Ok(None);
        }
        match self.scan_token() {
            Ok(token) => Ok(token),
            Err(err) => {
                self.failed = true;
                self.pos = self.text.len();
                Err(err)
            }
        }
    }

    fn scan_token(&mut self) -> Result<Option<TokenInfo>> {
        while let Some(ch) = self.char_at(0) {
            self.token_start = self.pos;

            let token = if SENTINELS.contains(&ch) {
                self.scan_two_char_command(ch)?
            } else if let Some(delimiter) = Delimiter::from_open(ch) {
                self.scan_number(delimiter)?
            } else if let Some(kind) = CommandKind::from_char(ch) {
                self.pos += 1;
                Token::Command(kind)
            } else {
                self.pos += 1;
                self.skipped += 1;
                continue;
            };

            return Ok(Some(TokenInfo::new(
                token,
                text_pos(self.token_start),
                text_pos(self.pos),
            )));
        }
        Ok(None)
    }

    /// Scan all remaining tokens. Stops at the first error.
    pub fn scan_all(&mut self) -> Result<Vec<TokenInfo>> {
        let mut tokens = Vec::new();
        while let Some(info) = self.next_token()? {
            tokens.push(info);
        }
        Ok(tokens)
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_two_char_command(&mut self, sentinel: char) -> Result<Token> {
        let index = self.pos;
        let Some(next) = self.char_at(1) else {
            return Err(LexError::MissingContinuation { sentinel, index });
        };
        match CommandKind::from_pair(sentinel, next) {
            Some(kind) => {
                self.pos += 2;
                Ok(Token::Command(kind))
            }
            None => Err(LexError::MalformedSequence {
                sentinel,
                found: next,
                index,
            }),
        }
    }

    /// Scan a delimited number. The first closing character ends the span,
    /// there is no nesting.
    fn scan_number(&mut self, delimiter: Delimiter) -> Result<Token> {
        let open_index = self.pos;
        let start = open_index + 1;
        let close = delimiter.close();

        let Some(len) = self.text[start..].iter().position(|&c| c == close) else {
            return Err(LexError::MissingClosingDelimiter {
                delimiter,
                index: open_index,
            });
        };
        let end = start + len;

        let text: String = self.text[start..end].iter().collect();
        let value = parse_integer(&text).map_err(|source| LexError::InvalidNumber {
            text: text.clone(),
            index: start,
            source,
        })?;

        self.pos = end + 1;
        Ok(Token::literal(delimiter, value))
    }
}

impl Iterator for Scanner {
    type Item = Result<TokenInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl std::iter::FusedIterator for Scanner {}

/// Parse a base-10 integer with optional surrounding whitespace and an
/// optional leading sign.
fn parse_integer(text: &str) -> std::result::Result<i64, std::num::ParseIntError> {
    text.trim().parse::<i64>()
}

/// Tokenize `source` into a token sequence, or the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    while let Some(info) = scanner.next_token()? {
        tokens.push(info.token);
    }
    Ok(tokens)
}

/// Like [`tokenize`], keeping each token's source span.
pub fn tokenize_with_spans(source: &str) -> Result<Vec<TokenInfo>> {
    Scanner::new(source).scan_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    #[test]
    fn test_scan_simple_tokens() {
        let mut scanner = Scanner::new("><+-=.,[]");
        let kinds: Vec<CommandKind> = std::iter::from_fn(|| scanner.next_token().unwrap())
            .map(|info| info.token.command().unwrap())
            .collect();
        assert_eq!(kinds, vec![
            CommandKind::IncPointer,
            CommandKind::DecPointer,
            CommandKind::IncData,
            CommandKind::DecData,
            CommandKind::SetData,
            CommandKind::Output,
            CommandKind::Input,
            CommandKind::LoopStart,
            CommandKind::LoopEnd,
        ]);
    }

    #[test]
    fn test_scan_two_char_commands() {
        let mut scanner = Scanner::new("S>S<a+a-s+s-");
        let mut next = || scanner.next_token().unwrap().unwrap().token;
        assert_eq!(next(), Token::Command(CommandKind::RightScan));
        assert_eq!(next(), Token::Command(CommandKind::LeftScan));
        assert_eq!(next(), Token::Command(CommandKind::AddOffsetInverted));
        assert_eq!(next(), Token::Command(CommandKind::AddOffset));
        assert_eq!(next(), Token::Command(CommandKind::SubtractOffsetInverted));
        assert_eq!(next(), Token::Command(CommandKind::SubtractOffset));
        assert_eq!(scanner.next_token().unwrap(), None);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize_with_spans(" S> {12}\n|-3|").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].pos(), tokens[0].end()), (1, 3));
        assert_eq!((tokens[1].pos(), tokens[1].end()), (4, 8));
        assert_eq!((tokens[2].pos(), tokens[2].end()), (9, 13));
        assert_eq!(tokens[2].token, Token::PipeLiteral(-3));
    }

    #[test]
    fn test_skipped_count() {
        let mut scanner = Scanner::new("x + y\n");
        let tokens = scanner.scan_all().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(scanner.skipped(), 5);
    }

    #[test]
    fn test_sentinel_index() {
        let err = tokenize("++S").unwrap_err();
        assert_eq!(err, LexError::MissingContinuation { sentinel: 'S', index: 2 });

        let err = tokenize(">a?").unwrap_err();
        assert_eq!(err, LexError::MalformedSequence { sentinel: 'a', found: '?', index: 1 });
        assert_eq!(err.kind(), LexErrorKind::MalformedCommand);
    }

    #[test]
    fn test_sentinel_consumes_continuation() {
        // The '+' after 'a' belongs to the command, not a separate inc-data.
        assert_eq!(tokenize("a++").unwrap(), vec![
            Token::Command(CommandKind::AddOffsetInverted),
            Token::Command(CommandKind::IncData),
        ]);
    }

    #[test]
    fn test_number_whitespace_and_sign() {
        assert_eq!(tokenize("{ 42 }").unwrap(), vec![Token::BraceLiteral(42)]);
        assert_eq!(tokenize("{+7}").unwrap(), vec![Token::BraceLiteral(7)]);
        assert_eq!(tokenize("|-15|").unwrap(), vec![Token::PipeLiteral(-15)]);
        assert_eq!(tokenize("{\t-0\n}").unwrap(), vec![Token::BraceLiteral(0)]);
    }

    #[test]
    fn test_number_rejects_non_integers() {
        for bad in ["{}", "{ }", "{1 2}", "{1_000}", "{0x10}", "{1.5}", "{-}", "{+-1}"] {
            let err = tokenize(bad).unwrap_err();
            assert_eq!(err.kind(), LexErrorKind::InvalidNumber, "input {bad:?}");
            assert_eq!(err.index(), 1);
        }
    }

    #[test]
    fn test_number_overflow_is_invalid() {
        let err = tokenize("{99999999999999999999}").unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::InvalidNumber);
        assert_eq!(tokenize("{-9223372036854775808}").unwrap(), vec![Token::BraceLiteral(i64::MIN)]);
    }

    #[test]
    fn test_invalid_number_keeps_raw_text() {
        match tokenize("+{ x }").unwrap_err() {
            LexError::InvalidNumber { text, index, .. } => {
                assert_eq!(text, " x ");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_first_closing_character_wins() {
        // No nesting: "{1{2}" takes "1{2" as the literal text.
        let err = tokenize("{1{2}}").unwrap_err();
        assert!(matches!(err, LexError::InvalidNumber { ref text, .. } if text == "1{2"));

        // The brace closer inside a pipe literal is just text.
        let err = tokenize("|}|").unwrap_err();
        assert_eq!(err.kind(), LexErrorKind::InvalidNumber);
    }

    #[test]
    fn test_pipes_pair_left_to_right() {
        assert_eq!(tokenize("|1||2|").unwrap(), vec![Token::PipeLiteral(1), Token::PipeLiteral(2)]);
        let err = tokenize("|1||2").unwrap_err();
        assert_eq!(err, LexError::MissingClosingDelimiter { delimiter: Delimiter::Pipe, index: 3 });
    }

    #[test]
    fn test_missing_closing_delimiter_index() {
        let err = tokenize("><{5").unwrap_err();
        assert_eq!(err, LexError::MissingClosingDelimiter { delimiter: Delimiter::Brace, index: 2 });
        // A lone closing brace is just an unrecognized character.
        assert_eq!(tokenize("}").unwrap(), vec![]);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut scanner = Scanner::new("+S*-");
        assert!(matches!(scanner.next(), Some(Ok(_))));
        assert!(matches!(scanner.next(), Some(Err(LexError::MalformedSequence { .. }))));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_tokenize_owned_scanner() {
        // `tokenize` drives an owned scanner; the composite program exercises
        // every dispatch arm through it.
        assert_eq!(tokenize(">a-S>+{789}|1011|").unwrap(), vec![
            Token::Command(CommandKind::IncPointer),
            Token::Command(CommandKind::AddOffset),
            Token::Command(CommandKind::RightScan),
            Token::Command(CommandKind::IncData),
            Token::BraceLiteral(789),
            Token::PipeLiteral(1011),
        ]);
        let mut scanner = Scanner::new("S<");
        assert!(scanner.next_token().unwrap().is_some());
        assert_eq!(scanner.next_token().unwrap(), None);
    }

    #[test]
    fn test_indices_count_characters() {
        let err = tokenize("é→{x}").unwrap_err();
        assert_eq!(err.index(), 3);
    }
}
