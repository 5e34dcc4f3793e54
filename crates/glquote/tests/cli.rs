/*
 * cli.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Tests for the glquote binary's argument handling.
 */

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn glquote() -> Command {
    Command::new(env!("CARGO_BIN_EXE_glquote"))
}

#[test]
fn test_missing_argument_fails() {
    let output = glquote()
        .args(["--source-path", "a.usfm", "--target-path", "b.usfm"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--tn-path"), "stderr: {stderr}");
}

#[test]
fn test_nonexistent_path_fails_fast() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let tn = temp.path().join("tn_GEN.tsv");
    fs::write(&tn, "Book\tChapter\tVerse\tOrigQuote\tOccurrence\n").unwrap();
    let missing = temp.path().join("missing.usfm");

    let output = glquote()
        .arg("--source-path")
        .arg(&missing)
        .arg("--target-path")
        .arg(&missing)
        .arg("--tn-path")
        .arg(&tn)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("source_path does not exist"), "stderr: {stderr}");
    assert!(!temp.path().join("tn_GEN.tsv.new").exists());
}

#[test]
fn test_underscore_aliases_and_default_output() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let source = temp.path().join("src.usfm");
    let target = temp.path().join("tgt.usfm");
    let tn = temp.path().join("tn_GEN.tsv");
    fs::write(&source, "\\id GEN\n\\c 1\n\\v 1 God\n").unwrap();
    fs::write(
        &target,
        "\\id GEN\n\\c 1\n\\v 1 \\zaln-s |x-occurrence=\"1\" x-occurrences=\"1\" x-content=\"God\"\\*\\w Dios\\w*\\zaln-e\\*\n",
    )
    .unwrap();
    fs::write(&tn, "Book\tChapter\tVerse\tOrigQuote\tOccurrence\tGLQuote\nGEN\t1\t1\tGod\t1\t\n").unwrap();

    let output = glquote()
        .arg("--source_path")
        .arg(&source)
        .arg("--target_path")
        .arg(&target)
        .arg("--tn_path")
        .arg(&tn)
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let filled = fs::read_to_string(temp.path().join("tn_GEN.tsv.new")).unwrap();
    assert_eq!(
        filled,
        "Book\tChapter\tVerse\tOrigQuote\tOccurrence\tGLQuote\nGEN\t1\t1\tGod\t1\tDios\n"
    );
}
