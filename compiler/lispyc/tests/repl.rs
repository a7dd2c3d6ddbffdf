//! Session transcripts and the `lispy` binary end to end.

use std::io::Write;
use std::process::{Command, Stdio};

use lispyc::{ReplConfig, Session};
use pretty_assertions::assert_eq;

/// Feed `lines` to one session and collect what it prints.
fn transcript(config: &ReplConfig, lines: &[&str]) -> Vec<String> {
    let mut session = Session::new(config);
    lines
        .iter()
        .filter_map(|line| session.run_line(line))
        .collect()
}

#[test]
fn factorial_session() {
    let out = transcript(
        &ReplConfig::default(),
        &[
            "(def fact [n] (if (<= n 1) 1 (* n (fact (- n 1)))))",
            "(fact 5)",
            "(fact 10)",
        ],
    );
    assert_eq!(
        out,
        vec!["<FUNCTION: fact>", "<NUMBER: 120>", "<NUMBER: 3628800>"]
    );
}

#[test]
fn errors_do_not_end_the_session() {
    let out = transcript(
        &ReplConfig::default(),
        &[
            "(/ 10 0)",
            "(let x 10)",
            "(def f [a b] (+ a b))",
            "(f 1)",
            "(f x 2)",
            "y",
        ],
    );
    assert_eq!(
        out,
        vec![
            "error: division by zero",
            "<NUMBER: 10>",
            "<FUNCTION: f>",
            "error: 'f' takes 2 arguments, found 1",
            "<NUMBER: 12>",
            "error: undefined symbol: 'y'",
        ]
    );
}

#[test]
fn several_forms_on_one_line() {
    let out = transcript(&ReplConfig::default(), &["(let x 7) (def f [x] x)", "(f x)"]);
    assert_eq!(out, vec!["<FUNCTION: f>", "<NUMBER: 7>"]);
}

#[test]
fn recursion_limit_from_config() {
    let config = ReplConfig {
        max_depth: Some(25),
        ..ReplConfig::default()
    };
    let out = transcript(
        &config,
        &["(def spin [n] (spin n))", "(spin 1)", "(+ 1 1)"],
    );
    assert_eq!(
        out,
        vec![
            "<FUNCTION: spin>",
            "error: stack exhausted: more than 25 nested calls",
            "<NUMBER: 2>",
        ]
    );
}

#[test]
fn binary_reads_stdin_until_quit() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lispy"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("RUST_LOG")
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"(+ 1 2 3)\n\n(let x 4)\nquit\n(+ x 1)\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "> <NUMBER: 6>\n> > <NUMBER: 4>\n> ");
}

#[test]
fn binary_survives_invalid_utf8_input() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lispy"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .env_remove("RUST_LOG")
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"(+ 1 1)\n\xff\n(+ 1 2)\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let results: Vec<&str> = stdout
        .split("> ")
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(results.len(), 3, "{stdout}");
    assert_eq!(results[0], "<NUMBER: 2>");
    assert!(results[1].starts_with("error: unexpected character"), "{stdout}");
    assert_eq!(results[2], "<NUMBER: 3>");
}

#[test]
fn errors_print_one_line_each() {
    let config = ReplConfig {
        backtrace: true,
        ..ReplConfig::default()
    };
    let out = transcript(
        &config,
        &[
            "(def f [a] (/ a 0))",
            "(f 1",
            "(f 1)",
            "(+ 1 é",
            "(def g [a a] a)",
        ],
    );
    assert_eq!(out.len(), 5);
    for entry in &out {
        assert_eq!(entry.lines().count(), 1, "{entry:?}");
    }
    assert_eq!(out[2], "error: division by zero [in f]");
}

#[test]
fn binary_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_lispy"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Usage: lispy"), "{stdout}");
}

#[test]
fn binary_rejects_unknown_option() {
    let output = Command::new(env!("CARGO_BIN_EXE_lispy"))
        .arg("--bogus")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown option `--bogus`"), "{stderr}");
}
