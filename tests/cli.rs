//! End-to-end tests for the `chunkwise` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with a clean environment and a working directory that has no
/// `.env` anywhere above it.
fn chunkwise(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chunkwise").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("CHUNKWISE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_credential_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    chunkwise(&dir)
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY is not set"));
}

#[test]
fn credential_from_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-from-dotenv\n").unwrap();

    chunkwise(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-from-dotenv").not());
}

#[test]
fn environment_wins_over_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-file\n").unwrap();

    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-env")
        .args(["-vv", "demo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"environment\""));
}

#[test]
fn environment_skips_malformed_dotenv_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY='unterminated\n").unwrap();

    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-env")
        .arg("demo")
        .assert()
        .success();
}

#[test]
fn malformed_dotenv_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY='unterminated\n").unwrap();

    chunkwise(&dir)
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read .env file"));
}

#[cfg(unix)]
#[test]
fn non_utf8_credential_is_fatal() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-file\n").unwrap();

    chunkwise(&dir)
        .env("OPENAI_API_KEY", OsStr::from_bytes(b"sk-\xff"))
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY is not valid UTF-8"));
}

#[test]
fn demo_prints_alphabet_chunks() {
    let dir = tempfile::tempdir().unwrap();
    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"fixed     ["abcdefghijklmnopqrstuvwxyz", "wxyzabcdefghijklmnopqrstuv", "stuvwxyz"]"#,
        ))
        .stdout(predicate::str::contains(
            r#"recursive ["abcdefghijklmnopqrstuvwxyz", "wxyzvwxyzvwxyzvwxyzvwxyzvw", "yzvwxyzvwxyz"]"#,
        ));
}

#[test]
fn split_stdin_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .args(["split", "--chunk-size", "26", "--chunk-overlap", "4", "--strategy", "fixed"])
        .args(["--format", "json"])
        .write_stdin("abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let chunks: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let chunks = chunks.as_array().unwrap();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[1]["text"], "wxyzabcdefghijklmnopqrstuv");
    assert_eq!(chunks[1]["start"], 22);
    assert_eq!(chunks[1]["overlap"], 4);
}

#[test]
fn split_file_with_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("chunkwise.toml");
    std::fs::write(
        &settings,
        "chunk_size = 12\nchunk_overlap = 0\n\n[strategy]\nkind = \"recursive\"\nseparators = [\" \"]\n",
    )
    .unwrap();

    let input = dir.path().join("input.txt");
    let mut file = std::fs::File::create(&input).unwrap();
    write!(file, "Hello world this is a test").unwrap();

    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .arg("split")
        .arg(&input)
        .arg("--config")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("--- chunk 0 [0..12] 12 chars, overlap 0 ---\nHello world \n"))
        .stdout(predicate::str::contains("this is a "));
}

#[test]
fn invalid_overlap_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .args(["split", "--chunk-size", "10", "--chunk-overlap", "10"])
        .write_stdin("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlap 10 must be < chunk size 10"));
}

#[test]
fn separator_with_fixed_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    chunkwise(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .args(["split", "--strategy", "fixed", "--separator", " "])
        .write_stdin("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--separator"));
}
