//! End-to-end CLI tests: invoke the `whisperc` binary and assert on its
//! exit code and stdout/stderr routing (spec.md section 6, section 8).

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn whisperc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_whisperc"))
}

#[test]
fn help_output_mentions_the_binary_name() {
    let mut cmd = whisperc();
    cmd.arg("--help");

    cmd.assert().success().stdout(predicate::str::contains("whisperc"));
}

#[test]
fn version_output_succeeds() {
    let mut cmd = whisperc();
    cmd.arg("--version");

    cmd.assert().success().stdout(predicate::str::contains("whisperc"));
}

#[test]
fn a_missing_path_argument_exits_with_code_one() {
    let mut cmd = whisperc();

    cmd.assert().failure().code(1).stderr(predicate::str::contains("required"));
}

#[test]
fn an_unknown_flag_exits_with_code_one() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("hello_world.whisper")).arg("--bogus-flag");

    cmd.assert().failure().code(1).stderr(predicate::str::contains("error"));
}

#[test]
fn compiling_hello_world_prints_c_to_stdout() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("hello_world.whisper"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#"printf("%s\n", "hello, whisper")"#))
        .stdout(predicate::str::contains("#include"));
}

#[test]
fn compiling_arithmetic_shares_one_monomorphization() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("arithmetic.whisper"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let c = String::from_utf8(output).expect("utf8 output");

    assert_eq!(c.matches("int inc_0(int n)").count(), 1);
    assert!(c.contains("inc_0(5)"));
    assert!(c.contains("inc_0(7)"));
}

#[test]
fn emit_ast_prints_the_parsed_tree_instead_of_c() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("hello_world.whisper")).arg("--emit").arg("ast");

    cmd.assert().success().stdout(predicate::str::contains("Print"));
}

#[test]
fn verbose_flag_does_not_change_stdout_contents() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("hello_world.whisper")).arg("--verbose");

    cmd.assert().success().stdout(predicate::str::contains("#include"));
}

#[test]
fn a_parse_error_exits_nonzero_with_a_diagnostic_on_stderr() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("bad_syntax.whisper"));

    cmd.assert().failure().code(1).stderr(predicate::str::contains("error[E"));
}

#[test]
fn a_missing_file_exits_nonzero_with_an_io_diagnostic() {
    let mut cmd = whisperc();
    cmd.arg(fixtures_dir().join("does_not_exist.whisper"));

    cmd.assert().failure().code(1).stderr(predicate::str::contains("error[E0007]"));
}
