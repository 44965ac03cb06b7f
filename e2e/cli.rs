//! End-to-end tests for the `generate-fixtures` and `validate-fixture` binaries.
//!
//! Drives both binaries as black boxes with std::process::Command and checks
//! exit codes, stdout checklists, and stderr diagnostics.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn generator_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_generate-fixtures"))
}

fn validator_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_validate-fixture"))
}

/// Generate the named cases into a fresh temp dir.
fn generate(cases: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::new(generator_bin());
    cmd.arg("--out").arg(dir.path());
    for case in cases {
        cmd.args(["--only", case]);
    }
    let out = cmd.output().expect("failed to run generate-fixtures");
    assert!(out.status.success(), "generate-fixtures failed: {}", stderr(&out));
    dir
}

fn validate(args: &[&str]) -> Output {
    Command::new(validator_bin())
        .args(args)
        .output()
        .expect("failed to run validate-fixture")
}

fn fixture(dir: &Path, name: &str) -> String {
    dir.join(format!("{}.snappy", name)).to_str().unwrap().to_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── generate-fixtures ────────────────────────────────────────────────────────

#[test]
fn generator_prints_summary_blocks() {
    let dir = TempDir::new().unwrap();
    let out = Command::new(generator_bin())
        .args(["--only", "hello", "--only", "empty", "--out"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("hello:\n  Input size: 13 bytes"), "{text}");
    assert!(text.contains("empty:\n  Input size: 0 bytes"), "{text}");
    assert!(text.contains("Saved to: "), "{text}");
    assert!(text.trim_end().ends_with("Test data generation complete!"), "{text}");
    assert!(dir.path().join("hello.snappy").exists());
    assert!(dir.path().join("MANIFEST.tsv").exists());
}

#[test]
fn generator_honours_env_fixture_dir() {
    let dir = TempDir::new().unwrap();
    let out = Command::new(generator_bin())
        .args(["--only", "single_byte"])
        .env("SNAPPY_FIXTURE_DIR", dir.path())
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(dir.path().join("single_byte.snappy").exists());
}

#[test]
fn generator_rejects_unknown_case() {
    let dir = TempDir::new().unwrap();
    let out = Command::new(generator_bin())
        .args(["--only", "nope", "--out"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown case name"));
}

// ── validate-fixture: single mode ───────────────────────────────────────────

#[test]
fn hello_validates_with_expected_size_13() {
    let dir = generate(&["hello"]);
    let out = validate(&[&fixture(dir.path(), "hello"), "13"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("✓ Format validation passed"), "{text}");
    assert!(text.contains("✓ Uncompressed length: 13 bytes"), "{text}");
    assert!(text.contains("✓ Size matches expected: 13 bytes"), "{text}");
    assert!(text.contains("✓ Decompression successful"), "{text}");
    assert!(text.contains("✓ Compression ratio: "), "{text}");
    assert!(text.contains("ALL CHECKS PASSED"), "{text}");
}

#[test]
fn repeated_validates_with_expected_size_100() {
    let dir = generate(&["repeated"]);
    let out = validate(&[&fixture(dir.path(), "repeated"), "100"]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
}

#[test]
fn repeated_with_expected_size_99_fails_at_stage_3() {
    let dir = generate(&["repeated"]);
    let out = validate(&[&fixture(dir.path(), "repeated"), "99"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("stage 3"), "{err}");
    assert!(err.contains("expected=99, actual=100"), "{err}");
    let text = stdout(&out);
    assert!(!text.contains("Decompression successful"), "{text}");
    assert!(!text.contains("ALL CHECKS PASSED"), "{text}");
}

#[test]
fn checksum_flag_is_checked() {
    let dir = generate(&["hello"]);
    let out = validate(&[&fixture(dir.path(), "hello"), "13", "--xxh64", "0"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ContentMismatchError"));
}

#[test]
fn corrupt_file_fails_at_stage_2() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("junk.snappy");
    std::fs::write(&path, b"\x0d\xffjunk").unwrap();
    let out = validate(&[path.to_str().unwrap(), "13"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("stage 2"), "{}", stderr(&out));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let out = validate(&[&fixture(dir.path(), "absent"), "13"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("IOError"));
}

#[test]
fn wrong_argument_count_prints_usage_and_exits_1() {
    for args in [&[][..], &["only-one"][..], &["a", "1", "extra"][..]] {
        let out = validate(args);
        assert_eq!(out.status.code(), Some(1), "args {:?}", args);
        assert!(stderr(&out).contains("Usage:"), "args {:?}: {}", args, stderr(&out));
    }
}

#[test]
fn non_numeric_size_is_argument_error() {
    let out = validate(&["x.snappy", "thirteen"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ArgumentError"));
}

#[test]
fn help_exits_zero() {
    let out = validate(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("EXPECTED_SIZE"));
}

// ── validate-fixture: batch mode ────────────────────────────────────────────

#[test]
fn manifest_mode_validates_generated_store() {
    let dir = generate(&["empty", "hello", "pattern", "numbers"]);
    let out = validate(&["--manifest", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let text = stdout(&out);
    for name in ["empty", "hello", "pattern", "numbers"] {
        assert!(text.contains(&format!("PASS {}", name)), "{text}");
    }
}

#[test]
fn regenerating_one_case_keeps_store_valid() {
    let dir = generate(&["hello", "repeated"]);
    let out = Command::new(generator_bin())
        .arg("--out")
        .arg(dir.path())
        .args(["--only", "hello"])
        .output()
        .expect("failed to run generate-fixtures");
    assert!(out.status.success(), "{}", stderr(&out));

    let out = validate(&["--manifest", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0), "{}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("PASS hello"), "{text}");
    assert!(text.contains("PASS repeated"), "{text}");
}

#[test]
fn manifest_mode_without_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let out = validate(&["--manifest", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("MANIFEST.tsv"));
}
