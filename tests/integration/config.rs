//! Config file handling through the built binary

use std::fs;

use crate::cli::{msh, stderr, stdout};

#[test]
fn test_config_file_selects_script_and_entry() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("start.koto");
    fs::write(&script, "export {start: |argv| print 'started with {argv.size()}'}\n").unwrap();

    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[launch]\nentry = \"start\"\nscript = {:?}\n",
            script.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = msh(&["a", "b"], &[], &config);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "started with 2\n");
}

#[test]
fn test_env_beats_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[launch]\nentry = \"nowhere\"\n").unwrap();

    let output = msh(&["-V"], &[("MSH_ENTRY", "__main__")], &config);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("msh v"));
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[launch]\nunknown_key = 1\n").unwrap();

    let output = msh(&[], &[], &config);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("msh: failed to load config"), "{}", err);
}

#[test]
fn test_invalid_env_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = msh(
        &[],
        &[("MSH_PASS_ARGV", "sometimes")],
        &dir.path().join("config.toml"),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid value for MSH_PASS_ARGV"));
}
