//! One interactive session: parse a line, evaluate it, render the outcome.

use std::ops::Range;

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use lispy_eval::{EvalBacktrace, EvalError, Interpreter};
use lispy_parse::ParseError;
use tracing::debug;

use crate::ReplConfig;

/// Interpreter state that lives across input lines.
pub struct Session {
    interpreter: Interpreter,
    backtrace: bool,
    pretty: bool,
}

impl Session {
    pub fn new(config: &ReplConfig) -> Self {
        Session {
            interpreter: Interpreter::builder()
                .max_call_depth(config.max_depth)
                .build(),
            backtrace: config.backtrace,
            pretty: config.pretty,
        }
    }

    /// Evaluate one input line and render what should be printed for it.
    ///
    /// The result is a single line unless `pretty` asked for annotated
    /// parse reports. Returns `None` when the line holds no forms (blank or
    /// comment only).
    pub fn run_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let forms = match lispy_parse::parse(line) {
            Ok(forms) => forms,
            Err(err) if self.pretty => return Some(render_parse_report(line, &err)),
            Err(err) => return Some(render_parse_error(line, &err)),
        };
        debug!(forms = forms.len(), "parsed line");

        match self.interpreter.eval_program(&forms) {
            Ok(Some(value)) => Some(value.to_string()),
            Ok(None) => None,
            Err(err) => Some(self.render_eval_error(&err)),
        }
    }

    fn render_eval_error(&self, err: &EvalError) -> String {
        let mut out = format!("error: {err}");
        if self.backtrace {
            if let Some(backtrace) = err.backtrace.as_ref().filter(|b| !b.is_empty()) {
                out.push_str(&inline_backtrace(backtrace));
            }
        }
        out
    }
}

/// Call names innermost first on one line, e.g. ` [in boom <- f]`.
fn inline_backtrace(backtrace: &EvalBacktrace) -> String {
    let names: Vec<&str> = backtrace.frames().iter().map(|name| &**name).collect();
    let mut out = format!(" [in {}", names.join(" <- "));
    if backtrace.omitted() > 0 {
        out.push_str(&format!(", ... {} more", backtrace.omitted()));
    }
    out.push(']');
    out
}

/// `quit` and `exit` end the session.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim(), "quit" | "exit")
}

/// Render a parse error as one line: the message, the 1-based column it
/// points at, and a hint when the input just stopped early.
pub fn render_parse_error(line: &str, err: &ParseError) -> String {
    let mut out = format!("error: {err} at column {}", column(line, err.span().start));
    if err.is_incomplete() {
        out.push_str(" (missing closing parenthesis?)");
    }
    out
}

/// 1-based character column of byte offset `offset` in `line`.
fn column(line: &str, offset: usize) -> usize {
    let mut offset = offset.min(line.len());
    while !line.is_char_boundary(offset) {
        offset -= 1;
    }
    line[..offset].chars().count() + 1
}

/// Render a parse error as an ariadne report over the offending line.
pub fn render_parse_report(line: &str, err: &ParseError) -> String {
    let range = label_range(line, err.span().to_range());
    let config = Config::default()
        .with_color(false)
        .with_index_type(IndexType::Byte);
    let mut report = Report::build(ReportKind::Error, (), range.start)
        .with_config(config)
        .with_message(err.to_string())
        .with_label(Label::new(range).with_message(label_message(err)));
    if err.is_incomplete() {
        report = report.with_note("missing closing parenthesis?");
    }

    let mut buf = Vec::new();
    match report.finish().write(Source::from(line.to_string()), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).trim_end().to_string(),
        Err(_) => render_parse_error(line, err),
    }
}

fn label_message(err: &ParseError) -> &'static str {
    match err {
        ParseError::Lex(_) => "not valid here",
        ParseError::UnexpectedToken { .. } => "unexpected token",
        ParseError::UnexpectedEof { .. } => "input ends here",
        ParseError::DuplicateParameter { .. } => "already declared",
    }
}

/// Widen empty spans to one character so the label has something to
/// point at. An end-of-input point takes the last character. Offsets are
/// bytes and always land on character boundaries.
fn label_range(line: &str, range: Range<usize>) -> Range<usize> {
    if !range.is_empty() {
        return range;
    }
    let end = line.len();
    match line.get(range.start..) {
        Some(rest) if !rest.is_empty() => {
            let width = rest.chars().next().map_or(1, char::len_utf8);
            range.start..range.start + width
        }
        _ => line.char_indices().next_back().map_or(0, |(i, _)| i)..end,
    }
}
