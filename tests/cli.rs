use std::io::Write;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn run(file_text: &str, args: &[&str], stdin: &str) -> String {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(file_text.as_bytes()).unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_edcmd"))
        .arg(file.path())
        .args(args)
        .env_remove("EDCMD_LOG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_commands_from_stdin() {
    let stdout = run(
        "one\ntwo\nthree\nfour\n",
        &[],
        "2,3\nset nowrap\n'q\n$\n",
    );
    assert_eq!(
        stdout,
        "two\nthree\nnowrap\n? mark 'q' is not set\n? '$' cannot be used as a range start\n"
    );
}

#[test]
fn test_marks_and_line_from_flags() {
    let stdout = run(
        "one\ntwo\nthree\nfour\n",
        &["--mark", "a=2", "--line", "3"],
        "'a,. edit x y\n?f?\n",
    );
    assert_eq!(stdout, "edit 2,3: x y\nfour\n");
}

#[test]
fn test_tab_completes_instead_of_executing() {
    let stdout = run("one\ntwo\n", &[], "2 s\t\nset \t\nx\t\n2\n");
    assert_eq!(stdout, "set\nnowrap wrap\n? no completions for 'x'\ntwo\n");
}

#[test]
fn test_bad_mark_flag_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_edcmd"))
        .args(["--mark", "A=1"])
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(!output.status.success());
}
