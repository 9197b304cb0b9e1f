//! Tokens produced by the scanner.

use crate::char_codes::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tapeir_core::text::TextSpan;

/// The fifteen commands of the IR.
///
/// Note that `a+`/`s+` map to the *inverted* offset commands and `a-`/`s-`
/// to the plain ones; the downstream compiler depends on this pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    IncPointer,
    DecPointer,
    IncData,
    DecData,
    SetData,
    RightScan,
    LeftScan,
    AddOffset,
    AddOffsetInverted,
    SubtractOffset,
    SubtractOffsetInverted,
    Output,
    Input,
    LoopStart,
    LoopEnd,
}

impl CommandKind {
    pub const ALL: [CommandKind; 15] = [
        CommandKind::IncPointer,
        CommandKind::DecPointer,
        CommandKind::IncData,
        CommandKind::DecData,
        CommandKind::SetData,
        CommandKind::RightScan,
        CommandKind::LeftScan,
        CommandKind::AddOffset,
        CommandKind::AddOffsetInverted,
        CommandKind::SubtractOffset,
        CommandKind::SubtractOffsetInverted,
        CommandKind::Output,
        CommandKind::Input,
        CommandKind::LoopStart,
        CommandKind::LoopEnd,
    ];

    /// Map a single-character command.
    pub fn from_char(ch: char) -> Option<CommandKind> {
        let kind = match ch {
            GREATER_THAN => CommandKind::IncPointer,
            LESS_THAN => CommandKind::DecPointer,
            PLUS => CommandKind::IncData,
            MINUS => CommandKind::DecData,
            EQUALS => CommandKind::SetData,
            DOT => CommandKind::Output,
            COMMA => CommandKind::Input,
            OPEN_BRACKET => CommandKind::LoopStart,
            CLOSE_BRACKET => CommandKind::LoopEnd,
            _ => return None,
        };
        Some(kind)
    }

    /// Map a sentinel and its continuation to a two-character command.
    pub fn from_pair(sentinel: char, next: char) -> Option<CommandKind> {
        let kind = match (sentinel, next) {
            (S_UPPER, GREATER_THAN) => CommandKind::RightScan,
            (S_UPPER, LESS_THAN) => CommandKind::LeftScan,
            (A_LOWER, PLUS) => CommandKind::AddOffsetInverted,
            (A_LOWER, MINUS) => CommandKind::AddOffset,
            (S_LOWER, PLUS) => CommandKind::SubtractOffsetInverted,
            (S_LOWER, MINUS) => CommandKind::SubtractOffset,
            _ => return None,
        };
        Some(kind)
    }

    /// The IR spelling of this command.
    pub fn spelling(self) -> &'static str {
        match self {
            CommandKind::IncPointer => ">",
            CommandKind::DecPointer => "<",
            CommandKind::IncData => "+",
            CommandKind::DecData => "-",
            CommandKind::SetData => "=",
            CommandKind::RightScan => "S>",
            CommandKind::LeftScan => "S<",
            CommandKind::AddOffset => "a-",
            CommandKind::AddOffsetInverted => "a+",
            CommandKind::SubtractOffset => "s-",
            CommandKind::SubtractOffsetInverted => "s+",
            CommandKind::Output => ".",
            CommandKind::Input => ",",
            CommandKind::LoopStart => "[",
            CommandKind::LoopEnd => "]",
        }
    }

    /// The kebab-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::IncPointer => "inc-pointer",
            CommandKind::DecPointer => "dec-pointer",
            CommandKind::IncData => "inc-data",
            CommandKind::DecData => "dec-data",
            CommandKind::SetData => "set-data",
            CommandKind::RightScan => "right-scan",
            CommandKind::LeftScan => "left-scan",
            CommandKind::AddOffset => "add-offset",
            CommandKind::AddOffsetInverted => "add-offset-inverted",
            CommandKind::SubtractOffset => "subtract-offset",
            CommandKind::SubtractOffsetInverted => "subtract-offset-inverted",
            CommandKind::Output => "output",
            CommandKind::Input => "input",
            CommandKind::LoopStart => "loop-start",
            CommandKind::LoopEnd => "loop-end",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Characters that must be followed by exactly one continuation character.
pub const SENTINELS: [char; 3] = [S_UPPER, A_LOWER, S_LOWER];

/// The two continuations a sentinel accepts, in the order they are reported.
pub fn continuations_of(sentinel: char) -> Option<(char, char)> {
    match sentinel {
        S_UPPER => Some((GREATER_THAN, LESS_THAN)),
        A_LOWER | S_LOWER => Some((PLUS, MINUS)),
        _ => None,
    }
}

/// The delimiter pair a numeric literal was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delimiter {
    /// `{N}`
    Brace,
    /// `|N|`
    Pipe,
}

impl Delimiter {
    pub fn from_open(ch: char) -> Option<Delimiter> {
        match ch {
            OPEN_BRACE => Some(Delimiter::Brace),
            BAR => Some(Delimiter::Pipe),
            _ => None,
        }
    }

    pub fn open(self) -> char {
        match self {
            Delimiter::Brace => OPEN_BRACE,
            Delimiter::Pipe => BAR,
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::Brace => CLOSE_BRACE,
            Delimiter::Pipe => BAR,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.open())
    }
}

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Token {
    Command(CommandKind),
    /// A number written as `{N}`.
    BraceLiteral(i64),
    /// A number written as `|N|`.
    PipeLiteral(i64),
}

impl Token {
    pub fn literal(delimiter: Delimiter, value: i64) -> Token {
        match delimiter {
            Delimiter::Brace => Token::BraceLiteral(value),
            Delimiter::Pipe => Token::PipeLiteral(value),
        }
    }

    pub fn command(&self) -> Option<CommandKind> {
        match *self {
            Token::Command(kind) => Some(kind),
            _ => None,
        }
    }

    /// The delimiter and value of a literal token.
    pub fn as_literal(&self) -> Option<(Delimiter, i64)> {
        match *self {
            Token::Command(_) => None,
            Token::BraceLiteral(value) => Some((Delimiter::Brace, value)),
            Token::PipeLiteral(value) => Some((Delimiter::Pipe, value)),
        }
    }

    /// Short name used by listings: the command name, or the literal kind.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Command(kind) => kind.name(),
            Token::BraceLiteral(_) => "brace-literal",
            Token::PipeLiteral(_) => "pipe-literal",
        }
    }
}

/// Writes the canonical IR spelling.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Command(kind) => f.write_str(kind.spelling()),
            Token::BraceLiteral(value) => write!(f, "{{{}}}", value),
            Token::PipeLiteral(value) => write!(f, "|{}|", value),
        }
    }
}

impl From<CommandKind> for Token {
    fn from(kind: CommandKind) -> Self {
        Token::Command(kind)
    }
}

/// A scanned token and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub token: Token,
    /// Character span of the token's source text, delimiters included.
    pub span: TextSpan,
}

impl TokenInfo {
    pub fn new(token: Token, pos: u32, end: u32) -> Self {
        Self {
            token,
            span: TextSpan::from_bounds(pos, end),
        }
    }

    /// Start position in the source text.
    pub fn pos(&self) -> u32 {
        self.span.start
    }

    /// End position in the source text (exclusive).
    pub fn end(&self) -> u32 {
        self.span.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_maps_back_to_kind() {
        for kind in CommandKind::ALL {
            let chars: Vec<char> = kind.spelling().chars().collect();
            let mapped = match chars.as_slice() {
                [c] => CommandKind::from_char(*c),
                [sentinel, next] => CommandKind::from_pair(*sentinel, *next),
                _ => None,
            };
            assert_eq!(mapped, Some(kind), "spelling {:?}", kind.spelling());
        }
    }

    #[test]
    fn test_offset_suffix_is_inverted() {
        assert_eq!(CommandKind::from_pair('a', '+'), Some(CommandKind::AddOffsetInverted));
        assert_eq!(CommandKind::from_pair('a', '-'), Some(CommandKind::AddOffset));
        assert_eq!(CommandKind::from_pair('s', '+'), Some(CommandKind::SubtractOffsetInverted));
        assert_eq!(CommandKind::from_pair('s', '-'), Some(CommandKind::SubtractOffset));
        assert_eq!(CommandKind::from_pair('S', '+'), None);
    }

    #[test]
    fn test_sentinels_are_not_commands() {
        for sentinel in SENTINELS {
            assert_eq!(CommandKind::from_char(sentinel), None);
            assert!(continuations_of(sentinel).is_some());
        }
        assert_eq!(continuations_of('x'), None);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(Delimiter::from_open('{'), Some(Delimiter::Brace));
        assert_eq!(Delimiter::from_open('|'), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::from_open('}'), None);
        assert_eq!(Delimiter::Brace.close(), '}');
        assert_eq!(Delimiter::Pipe.close(), '|');
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Command(CommandKind::RightScan).to_string(), "S>");
        assert_eq!(Token::BraceLiteral(-3).to_string(), "{-3}");
        assert_eq!(Token::PipeLiteral(12).to_string(), "|12|");
    }

    #[test]
    fn test_literal_kinds_are_distinct() {
        assert_ne!(Token::BraceLiteral(1), Token::PipeLiteral(1));
        assert_eq!(Token::literal(Delimiter::Pipe, 7), Token::PipeLiteral(7));
        assert_eq!(Token::PipeLiteral(7).as_literal(), Some((Delimiter::Pipe, 7)));
        assert_eq!(Token::from(CommandKind::Output).as_literal(), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(CommandKind::SubtractOffsetInverted.to_string(), "subtract-offset-inverted");
        assert_eq!(Token::BraceLiteral(1).name(), "brace-literal");
        assert_eq!(Token::Command(CommandKind::LoopEnd).name(), "loop-end");
    }
}
