//! tapeir_driver: Multi-file lexing.
//!
//! Collects IR sources, lexes them in parallel and turns every lexical
//! failure into a located diagnostic. Files are independent: an error in one
//! never stops the others from being lexed. Reading a source is not a
//! lexical failure; `load_files` reports it to the caller instead.

use rayon::prelude::*;
use std::io;
use tapeir_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use tapeir_scanner::{LexError, Scanner, Token, TokenInfo};
use tracing::{debug, debug_span, warn};

/// Options for a lexing session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Report a warning for a non-empty file that yields no tokens.
    pub warn_on_empty: bool,
}

/// A named source text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

/// The outcome of lexing one file.
#[derive(Debug, Clone)]
pub struct LexedFile {
    pub name: String,
    pub text: String,
    pub result: Result<Vec<TokenInfo>, LexError>,
    /// Unrecognized characters skipped before the scan finished or failed.
    pub skipped: usize,
}

impl LexedFile {
    /// The tokens without spans, if lexing succeeded.
    pub fn tokens(&self) -> Option<Vec<Token>> {
        self.result
            .as_ref()
            .ok()
            .map(|infos| infos.iter().map(|info| info.token).collect())
    }
}

/// Everything a session produced.
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    /// One entry per source, in the order sources were added.
    pub files: Vec<LexedFile>,
    pub diagnostics: DiagnosticCollection,
}

impl LexOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Total tokens across all successfully lexed files.
    pub fn token_count(&self) -> usize {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().ok())
            .map(Vec::len)
            .sum()
    }
}

/// A lexing session over a set of source files.
#[derive(Debug, Default)]
pub struct Session {
    options: SessionOptions,
    sources: Vec<SourceFile>,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
        }
    }

    /// Add a source file to the session.
    pub fn add_source(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sources.push(SourceFile {
            name: name.into(),
            text: text.into(),
        });
    }

    /// Load files from disk, stopping at the first one that cannot be read.
    /// Files read before the failure stay in the session.
    pub fn load_files(&mut self, paths: &[String]) -> io::Result<()> {
        for path in paths {
            let text = std::fs::read_to_string(path).map_err(|e| {
                warn!(file = %path, error = %e, "cannot read source file");
                io::Error::new(e.kind(), format!("cannot read '{}': {}", path, e))
            })?;
            self.add_source(path.clone(), text);
        }
        Ok(())
    }

    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// Lex every source. Output order matches the order sources were added.
    pub fn lex(&self) -> LexOutput {
        let files: Vec<LexedFile> = self.sources.par_iter().map(lex_file).collect();

        let mut diagnostics = DiagnosticCollection::new();
        for file in &files {
            match &file.result {
                Err(err) => diagnostics.add(err.to_diagnostic(Some(&file.name))),
                Ok(tokens) if tokens.is_empty() && self.options.warn_on_empty && !file.text.is_empty() => {
                    diagnostics.add(
                        Diagnostic::new(&messages::FILE_0_PRODUCED_NO_TOKENS, &[&file.name])
                            .in_file(file.name.clone()),
                    );
                }
                Ok(_) => {}
            }
        }
        diagnostics.sort();

        LexOutput { files, diagnostics }
    }
}

fn lex_file(source: &SourceFile) -> LexedFile {
    let _span = debug_span!("lex_file", file = %source.name).entered();

    let mut scanner = Scanner::new(&source.text);
    let result = scanner.scan_all();
    match &result {
        Ok(tokens) => debug!(tokens = tokens.len(), skipped = scanner.skipped(), "lexed"),
        Err(err) => debug!(error = %err, "lexing failed"),
    }

    LexedFile {
        name: source.name.clone(),
        text: source.text.clone(),
        result,
        skipped: scanner.skipped(),
    }
}

/// Lex a single source without a session.
pub fn lex_source(name: &str, text: &str) -> LexedFile {
    lex_file(&SourceFile {
        name: name.to_string(),
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapeir_scanner::{CommandKind, LexErrorKind};

    #[test]
    fn test_lex_source() {
        let file = lex_source("a.bfir", "+ x -");
        assert_eq!(file.skipped, 3);
        assert_eq!(
            file.tokens(),
            Some(vec![Token::Command(CommandKind::IncData), Token::Command(CommandKind::DecData)])
        );
    }

    #[test]
    fn test_lex_source_error() {
        let file = lex_source("a.bfir", "+{");
        assert!(file.tokens().is_none());
        assert_eq!(file.result.unwrap_err().kind(), LexErrorKind::MissingClosingDelimiter);
    }

    #[test]
    fn test_warn_on_empty() {
        let mut session = Session::new(SessionOptions { warn_on_empty: true });
        session.add_source("noise.bfir", "hello world");
        session.add_source("empty.bfir", "");
        let output = session.lex();
        assert_eq!(output.diagnostics.len(), 1);
        assert!(!output.has_errors());
        assert_eq!(output.diagnostics.diagnostics()[0].code, 1101);
    }

    #[test]
    fn test_no_warning_by_default() {
        let mut session = Session::default();
        session.add_source("noise.bfir", "hello world");
        assert!(session.lex().diagnostics.is_empty());
    }
}
