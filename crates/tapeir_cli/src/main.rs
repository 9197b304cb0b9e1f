//! tapeir-lex: Command-line front-end for the IR scanner.
//!
//! Usage:
//!   tapeir-lex [options] [file...]
//!
//! With no files and no project, `tapeir.json` in the current directory is
//! used when present, otherwise the program is read from stdin.

use clap::Parser as ClapParser;
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity};
use serde::Serialize;
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::process;
use tapeir_core::text::{byte_offset, LineMap};
use tapeir_diagnostics::Diagnostic;
use tapeir_driver::{LexOutput, LexedFile, Session, SessionOptions};
use tapeir_options::{OutputFormat, OutputOptions, TapeirConfig, CONFIG_FILE_NAME};
use tapeir_printer::Printer;
use tapeir_scanner::Token;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "tapeir-lex", about = "Tokenize tape-machine IR programs", disable_version_flag = true)]
struct Cli {
    /// IR files to tokenize. Use `-` for stdin.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to tapeir.json.
    #[arg(short = 'p', long = "project")]
    project: Option<String>,

    /// Output format: text, json or ir.
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Wrap `ir` output at this many characters.
    #[arg(long = "max-line-width")]
    max_line_width: Option<usize>,

    /// Warn about files that contain no tokens at all.
    #[arg(long = "warn-empty")]
    warn_empty: bool,

    /// Render diagnostics with source snippets.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pretty: bool,

    /// Initialize a tapeir.json file.
    #[arg(long)]
    init: bool,

    /// Increase log verbosity (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the version.
    #[arg(short = 'V', long)]
    version: bool,
}

const STDIN_NAME: &str = "<stdin>";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.version {
        println!("tapeir-lex Version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    // Project files are looked up relative to the working directory.
    let cwd = Path::new("");
    if cli.init {
        process::exit(run_init(cwd));
    }

    process::exit(run_lex(&cli, cwd));
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color())
        .with_target(false)
        .init();
}

fn run_lex(cli: &Cli, cwd: &Path) -> i32 {
    let (inputs, config) = match resolve_inputs(cli, cwd) {
        Ok(resolved) => resolved,
        Err(msg) => {
            print_error(&msg);
            return 1;
        }
    };
    let output_options = merge_output_options(cli, config.as_ref());

    let mut session = Session::new(SessionOptions { warn_on_empty: cli.warn_empty });
    if let Err(msg) = load_sources(&mut session, &inputs) {
        print_error(&msg);
        return 1;
    }
    info!(files = session.sources().len(), format = %output_options.format(), "lexing");

    let output = session.lex();
    debug!(tokens = output.token_count(), "done");

    if let Err(e) = write_output(&output, &output_options) {
        print_error(&format!("Failed to write output: {}", e));
        return 1;
    }

    print_diagnostics(&output, cli.pretty);

    if output.has_errors() {
        let count = output.diagnostics.error_count();
        eprintln!(
            "\nFound {} error{}.",
            count,
            if count == 1 { "" } else { "s" }
        );
    }
    exit_code(&output)
}

/// 2 when any file failed to lex, 0 otherwise.
fn exit_code(output: &LexOutput) -> i32 {
    if output.has_errors() { 2 } else { 0 }
}

/// Output options from tapeir.json, with command-line flags taking precedence.
fn merge_output_options(cli: &Cli, config: Option<&TapeirConfig>) -> OutputOptions {
    let mut options = config.map(TapeirConfig::output).unwrap_or_default();
    if cli.format.is_some() { options.format = cli.format; }
    if cli.max_line_width.is_some() { options.max_line_width = cli.max_line_width; }
    options
}

/// Add every input to the session. `-` reads stdin.
fn load_sources(session: &mut Session, inputs: &[String]) -> Result<(), String> {
    for input in inputs {
        if input == "-" {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            session.add_source(STDIN_NAME, text);
        } else {
            session
                .load_files(std::slice::from_ref(input))
                .map_err(|e| format!("Failed to read source: {}", e))?;
        }
    }
    Ok(())
}

fn run_init(dir: &Path) -> i32 {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        print_error("A tapeir.json file already exists in the current directory.");
        return 1;
    }

    match std::fs::write(&config_path, tapeir_options::default_config_json()) {
        Ok(()) => {
            println!("Successfully created a tapeir.json file.");
            0
        }
        Err(e) => {
            print_error(&format!("Failed to create tapeir.json: {}", e));
            1
        }
    }
}

/// Pick the inputs to lex: an explicit project, then positional files, then
/// `tapeir.json` in `cwd`, then stdin.
fn resolve_inputs(cli: &Cli, cwd: &Path) -> Result<(Vec<String>, Option<TapeirConfig>), String> {
    if let Some(ref project) = cli.project {
        let (files, config) = load_project(Path::new(project))?;
        if cli.files.is_empty() {
            return Ok((files, Some(config)));
        }
        return Ok((cli.files.clone(), Some(config)));
    }
    if !cli.files.is_empty() {
        return Ok((cli.files.clone(), None));
    }
    let default_project = cwd.join(CONFIG_FILE_NAME);
    if default_project.exists() {
        let (files, config) = load_project(&default_project)?;
        return Ok((files, Some(config)));
    }
    Ok((vec!["-".to_string()], None))
}

fn load_project(path: &Path) -> Result<(Vec<String>, TapeirConfig), String> {
    let config = tapeir_options::parse_config_file(path)
        .map_err(|e| format!("Failed to read project '{}': {}", path.display(), e))?;
    let root_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let files = config.resolved_files(root_dir);
    if files.is_empty() {
        return Err(format!("Project '{}' lists no files.", path.display()));
    }
    Ok((files, config))
}

// ============================================================================
// Token output
// ============================================================================

#[derive(Serialize)]
struct JsonFile<'a> {
    file: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<JsonToken>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonToken {
    token: Token,
    start: u32,
    end: u32,
}

fn write_output(output: &LexOutput, options: &OutputOptions) -> std::io::Result<()> {
    use std::io::Write;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match options.format() {
        OutputFormat::Text => {
            let show_names = output.files.len() > 1;
            for file in &output.files {
                let Ok(tokens) = &file.result else { continue };
                if show_names {
                    writeln!(out, "{}", file.name)?;
                }
                let line_map = LineMap::new(&file.text);
                for info in tokens {
                    let lc = line_map.line_and_column_of(info.pos());
                    let location = format!("{}:{}", lc.line + 1, lc.character + 1);
                    match info.token.as_literal() {
                        Some((_, value)) => writeln!(out, "{:<8}{} {}", location, info.token.name(), value)?,
                        None => writeln!(out, "{:<8}{}", location, info.token.name())?,
                    }
                }
            }
        }
        OutputFormat::Json => {
            let files: Vec<JsonFile<'_>> = output.files.iter().map(json_file).collect();
            serde_json::to_writer_pretty(&mut out, &files)?;
            writeln!(out)?;
        }
        OutputFormat::Ir => {
            let mut printer = Printer::with_options(options.printer_options());
            for file in &output.files {
                if let Some(tokens) = file.tokens() {
                    write!(out, "{}", printer.print_tokens(&tokens))?;
                }
            }
        }
    }
    out.flush()
}

fn json_file(file: &LexedFile) -> JsonFile<'_> {
    match &file.result {
        Ok(tokens) => JsonFile {
            file: &file.name,
            tokens: Some(
                tokens
                    .iter()
                    .map(|info| JsonToken { token: info.token, start: info.pos(), end: info.end() })
                    .collect(),
            ),
            error: None,
        },
        Err(err) => JsonFile {
            file: &file.name,
            tokens: None,
            error: Some(err.to_string()),
        },
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

fn print_diagnostics(output: &LexOutput, pretty: bool) {
    for diag in output.diagnostics.diagnostics() {
        if pretty {
            let source = diag
                .file
                .as_deref()
                .and_then(|name| output.files.iter().find(|f| f.name == name));
            eprintln!("{:?}", to_report(diag, source));
        } else {
            eprintln!("{}", diag);
        }
    }
}

/// Build a miette report, attaching the source text when it is known.
fn to_report(diag: &Diagnostic, source: Option<&LexedFile>) -> Report {
    let severity = if diag.is_error() { Severity::Error } else { Severity::Warning };
    let mut rendered = MietteDiagnostic::new(diag.message_text.clone())
        .with_code(diag.code_string())
        .with_severity(severity);

    match (source, diag.span) {
        (Some(file), Some(span)) => {
            let start = byte_offset(&file.text, span.start);
            let end = byte_offset(&file.text, span.end());
            rendered = rendered.with_label(LabeledSpan::at(start..end, "here"));
            Report::new(rendered).with_source_code(NamedSource::new(&file.name, file.text.clone()))
        }
        _ => Report::new(rendered),
    }
}

/// Whether stderr output may carry ANSI colour codes.
fn use_color() -> bool {
    std::io::stderr().is_terminal()
}

fn error_line(msg: &str, color: bool) -> String {
    if color {
        format!("\x1b[1m\x1b[31merror\x1b[0m: {}", msg)
    } else {
        format!("error: {}", msg)
    }
}

fn print_error(msg: &str) {
    eprintln!("{}", error_line(msg, use_color()));
}
