//! tapeir_printer: Token stream to IR text.
//!
//! Writes tokens back out in their canonical spelling. The output holds no
//! characters the scanner would skip (apart from line breaks), so scanning
//! printed text yields the same tokens again.

use tapeir_scanner::Token;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Wrap output so no line is longer than this many characters.
    /// A token longer than the width is placed on a line of its own.
    pub max_line_width: Option<usize>,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            max_line_width: None,
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// The printer converts tokens to text.
pub struct Printer {
    output: String,
    line_width: usize,
    options: PrinterOptions,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(1024),
            line_width: 0,
            options,
        }
    }

    /// Print a token sequence to a string.
    pub fn print_tokens(&mut self, tokens: &[Token]) -> String {
        self.output.clear();
        self.line_width = 0;

        for token in tokens {
            self.write_token(&token.to_string());
        }

        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    fn write_token(&mut self, text: &str) {
        let width = text.chars().count();
        if let Some(max) = self.options.max_line_width {
            if self.line_width > 0 && self.line_width + width > max {
                self.write_newline();
            }
        }
        self.output.push_str(text);
        self.line_width += width;
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
        self.line_width = 0;
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Print tokens with default options.
pub fn print_tokens(tokens: &[Token]) -> String {
    Printer::new().print_tokens(tokens)
}
