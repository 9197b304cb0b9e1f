//! Character code constants used by the scanner.

// Pointer and data commands
pub const GREATER_THAN: char = '>';
pub const LESS_THAN: char = '<';
pub const PLUS: char = '+';
pub const MINUS: char = '-';
pub const EQUALS: char = '=';

// I/O and loops
pub const DOT: char = '.';
pub const COMMA: char = ',';
pub const OPEN_BRACKET: char = '[';
pub const CLOSE_BRACKET: char = ']';

// Sentinels of two-character commands
pub const S_UPPER: char = 'S';
pub const A_LOWER: char = 'a';
pub const S_LOWER: char = 's';

// Literal delimiters
pub const OPEN_BRACE: char = '{';
pub const CLOSE_BRACE: char = '}';
pub const BAR: char = '|';
