//! CLI integration tests.
//! Each test reads a bundled archive from a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARCHIVE: &str = r#"{
    "issues": [
        {
            "key": "OPS-1",
            "fields": {
                "description": "<p>hi there friend.</p>",
                "reporter": { "name": "alice" },
                "comment": { "comments": [
                    { "author": { "name": "bob" }, "body": "the build is red. the build is green. the tests are red." }
                ] }
            }
        }
    ]
}"#;

fn archive(dir: &TempDir) -> String {
    let path = dir.path().join("archive.json");
    std::fs::write(&path, ARCHIVE).unwrap();
    path.to_str().unwrap().to_owned()
}

fn mimic(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mimic").unwrap();
    cmd.env("MIMIC_CACHE", dir.path().join("cache.json"))
        .env_remove("MIMIC_ARCHIVE")
        .env_remove("MIMIC_VOCABULARY")
        .args(["--archive", &archive(dir)]);
    cmd
}

#[test]
fn known_user_gets_sentences() {
    let dir = TempDir::new().unwrap();
    mimic(&dir)
        .args(["-u", "alice", "-a", "1", "-n", "3"])
        .assert()
        .success()
        .stdout("hi there friend.\n\n".repeat(3));
}

#[test]
fn unknown_user_is_reported() {
    let dir = TempDir::new().unwrap();
    mimic(&dir)
        .args(["-u", "mallory", "-n", "3"])
        .assert()
        .success()
        .stdout("User does not exist in JIRA\n");
}

#[test]
fn pooled_sentences_come_from_everybody() {
    let dir = TempDir::new().unwrap();
    let output = mimic(&dir).args(["-a", "1", "-n", "50", "--seed", "7"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let sentences: Vec<&str> = stdout.split("\n\n").filter(|s| !s.is_empty()).collect();
    assert_eq!(sentences.len(), 50);
    assert!(sentences.iter().all(|s| s.ends_with('.')));
}

#[test]
fn seed_makes_output_reproducible() {
    let dir = TempDir::new().unwrap();
    let run = || {
        mimic(&dir)
            .args(["-u", "bob", "-a", "1", "-n", "20", "--seed", "1234"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn zero_accuracy_is_fatal() {
    let dir = TempDir::new().unwrap();
    mimic(&dir)
        .args(["-a", "0", "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("order must be >= 1"));
}

#[test]
fn missing_archive_is_fatal() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    Command::cargo_bin("mimic")
        .unwrap()
        .env("MIMIC_CACHE", dir.path().join("cache.json"))
        .args(["--archive", dir.path().join("absent.json").to_str().unwrap(), "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load the issue corpus"));
}

#[test]
fn missing_vocabulary_is_fatal() {
    let dir = TempDir::new().unwrap();
    mimic(&dir)
        .args(["--vocabulary", dir.path().join("absent.txt").to_str().unwrap(), "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid chain configuration"));
}

#[test]
fn vocabulary_filters_sentences() {
    let dir = TempDir::new().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "TESTS\n").unwrap();

    let output = mimic(&dir)
        .args(["-u", "bob", "-a", "1", "-n", "20", "--min-matches", "1"])
        .args(["--vocabulary", words.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let sentences: Vec<&str> = stdout.split("\n\n").filter(|s| !s.is_empty()).collect();
    assert_eq!(sentences, vec!["the tests are red."; 20]);
}

#[test]
fn unsatisfiable_vocabulary_gives_up_when_capped() {
    let dir = TempDir::new().unwrap();
    let words = dir.path().join("words.txt");
    std::fs::write(&words, "purple\n").unwrap();

    mimic(&dir)
        .args(["-u", "bob", "-n", "1", "--min-matches", "1", "--max-attempts", "20"])
        .args(["--vocabulary", words.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no acceptable sentence"));
}

#[test]
fn verbose_run_logs_training_and_seed() {
    let dir = TempDir::new().unwrap();
    mimic(&dir)
        .env_remove("RUST_LOG")
        .args(["-v", "-u", "alice", "-n", "1", "--seed", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("training on 1 records for 'alice'"))
        .stderr(predicate::str::contains("using seed 5"));
}
