//! Custom entry scripts loaded through MSH_SCRIPT

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::cli::{msh, stderr, stdout};

const ECHO_SCRIPT: &str = "\
main = |argv|
  print 'count {argv.size()}'
  for arg in argv
    print arg

export {'__main__': main}
";

const RAISE_SCRIPT: &str = "\
export {'__main__': |argv| throw 'no such command: {argv.first()}'}
";

const GLOBALS_SCRIPT: &str = "\
export {'__main__': || print '{PROGRAM_NAME.size() > 0} {MSH_VERSION} {ARGV.size()}'}
";

fn write_script(
    dir: &TempDir,
    source: &str,
) -> PathBuf {
    let path = dir.path().join("entry.koto");
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn test_argv_count_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, ECHO_SCRIPT);
    let output = msh(
        &["b", "a", "c"],
        &[("MSH_SCRIPT", script.to_str().unwrap())],
        &dir.path().join("config.toml"),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "count 3\nb\na\nc\n");
}

#[test]
fn test_argv_keeps_program_name_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, ECHO_SCRIPT);
    let output = msh(
        &["x"],
        &[
            ("MSH_SCRIPT", script.to_str().unwrap()),
            ("MSH_SKIP_PROGRAM_NAME", "false"),
        ],
        &dir.path().join("config.toml"),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "count 2");
    assert!(lines[1].ends_with("msh"), "{}", lines[1]);
    assert_eq!(lines[2], "x");
}

#[test]
fn test_extra_globals_are_published() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, GLOBALS_SCRIPT);
    let output = msh(
        &["1", "2"],
        &[("MSH_SCRIPT", script.to_str().unwrap()), ("MSH_PASS_ARGV", "no")],
        &dir.path().join("config.toml"),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!("true {} 2\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_raising_entry_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, RAISE_SCRIPT);
    let output = msh(
        &["frobnicate"],
        &[("MSH_SCRIPT", script.to_str().unwrap())],
        &dir.path().join("config.toml"),
    );

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("entry.koto: "), "{}", err);
    assert!(err.contains("no such command: frobnicate"), "{}", err);
}

#[test]
fn test_missing_entry_function() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "x = 42\n");
    let output = msh(
        &[],
        &[("MSH_SCRIPT", script.to_str().unwrap())],
        &dir.path().join("config.toml"),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("undefined entry function `__main__`"));
}

#[test]
fn test_unreadable_script_is_startup_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.koto");
    let output = msh(
        &["a"],
        &[("MSH_SCRIPT", missing.to_str().unwrap())],
        &dir.path().join("config.toml"),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).starts_with("msh: cannot read script"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_broken_script_is_startup_failure() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(&dir, "x = (\n");
    let output = msh(
        &[],
        &[("MSH_SCRIPT", script.to_str().unwrap())],
        &dir.path().join("config.toml"),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("msh: failed to load script"));
}

#[cfg(unix)]
#[test]
fn test_strict_encoding_rejects_invalid_argument() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    use std::process::Command;

    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_msh"))
        .env("MSH_CONFIG", dir.path().join("config.toml"))
        .env("MSH_ARG_ENCODING", "strict")
        .env_remove("MSH_SCRIPT")
        .arg(OsString::from_vec(vec![b'a', 0xfe]))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("argument 1 is not valid UTF-8"));
}
