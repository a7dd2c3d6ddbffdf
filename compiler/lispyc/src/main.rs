//! Lispy REPL
//!
//! `lispy` reads lines from stdin; `lispy FILE` evaluates FILE line by line.
//! Either way every non-blank line prints exactly one result. Input that is
//! not valid UTF-8 is decoded lossily, so a bad byte is reported as an
//! unexpected character instead of ending the session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use lispyc::{init_tracing, is_exit_command, parse_args, Command, ReplConfig, Session, USAGE};
use tracing::info;

fn main() -> ExitCode {
    init_tracing();

    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &config.file {
        Some(path) => run_file(&config, path),
        None => run_interactive(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_file(config: &ReplConfig, path: &std::path::Path) -> io::Result<()> {
    let bytes = fs::read(path)
        .map_err(|err| io::Error::new(err.kind(), format!("{}: {err}", path.display())))?;
    let source = String::from_utf8_lossy(&bytes);
    info!(path = %path.display(), "running file");

    let mut session = Session::new(config);
    let mut stdout = io::stdout().lock();
    for line in source.lines() {
        if is_exit_command(line) {
            break;
        }
        if let Some(output) = session.run_line(line) {
            writeln!(stdout, "{output}")?;
        }
    }
    Ok(())
}

fn run_interactive(config: &ReplConfig) -> io::Result<()> {
    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut buf = Vec::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // EOF
            writeln!(stdout)?;
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if is_exit_command(&line) {
            break;
        }
        if let Some(output) = session.run_line(&line) {
            writeln!(stdout, "{output}")?;
        }
    }
    Ok(())
}
