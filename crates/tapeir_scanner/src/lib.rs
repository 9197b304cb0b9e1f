//! tapeir_scanner: Lexer for the tape-machine IR.
//!
//! Turns IR source text into [`Token`]s in a single pass:
//! - single-character commands (`>`, `<`, `+`, `-`, `=`, `.`, `,`, `[`, `]`)
//! - two-character commands introduced by `S`, `a` or `s`
//! - integer literals written as `{N}` or `|N|`
//!
//! Any other character is skipped. The first malformed construct aborts
//! the scan with a [`LexError`].
//!
//! ```
//! use tapeir_scanner::{tokenize, CommandKind, Token};
//!
//! let tokens = tokenize("a-{3}").unwrap();
//! assert_eq!(tokens, vec![Token::Command(CommandKind::AddOffset), Token::BraceLiteral(3)]);
//! ```

mod char_codes;
mod error;
mod scanner;
mod token;

pub use error::{LexError, LexErrorKind, Result};
pub use scanner::{tokenize, tokenize_with_spans, Scanner};
pub use token::{continuations_of, CommandKind, Delimiter, Token, TokenInfo, SENTINELS};
