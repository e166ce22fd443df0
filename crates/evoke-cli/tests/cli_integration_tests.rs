//! CLI integration tests for evoke
//!
//! Tests the evoke CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command with an isolated config directory
fn evoke_cmd(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("evoke").unwrap();
    cmd.env("EVOKE_CONFIG_DIR", config_dir.path());
    cmd
}

fn write_subjects(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("subjects.json");
    std::fs::write(
        &path,
        r#"[
            {
                "id": "5a2f8e3c-0f44-4a5e-9c41-98a1c8b7d001",
                "name": "Anna Lee",
                "relationship": "daughter",
                "interests": "hiking"
            },
            {
                "id": "5a2f8e3c-0f44-4a5e-9c41-98a1c8b7d002",
                "name": "Ben Ortiz",
                "relationship": "friend"
            }
        ]"#,
    )
    .unwrap();
    path
}

#[test]
fn test_evaluate_exact_match() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "son", "son"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct (score 1.00)"));
}

#[test]
fn test_evaluate_partial_match() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "my son john", "son"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partially correct (score 0.80)"));
}

#[test]
fn test_evaluate_strict_rejects_fuzzy_answers() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "my son john", "son", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect (score 0.00)"));
}

#[test]
fn test_evaluate_acceptable_alternative() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "my son", "son", "--acceptable", "my son"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Correct (score 1.00)"));
}

#[test]
fn test_evaluate_json_output() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "friendly", "nice", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"is_correct\": true"))
        .stdout(predicate::str::contains("\"is_partial\": true"));
}

#[test]
fn test_evaluate_empty_expected_fails() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["evaluate", "son", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E001"));
}

#[test]
fn test_prompts_generate_seeded() {
    let config_dir = TempDir::new().unwrap();
    let subjects = write_subjects(&config_dir);

    let run = |seed: &str| -> String {
        let output = evoke_cmd(&config_dir)
            .args([
                "prompts",
                "generate",
                "--subjects",
                subjects.to_str().unwrap(),
                "--seed",
                seed,
                "--format",
                "json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    // Same seed, same prompts
    assert_eq!(run("42"), run("42"));

    let output = run("42");
    assert!(output.contains("\"relationship\""));
    assert!(output.contains("\"name_from_description\""));
}

#[test]
fn test_prompts_generate_requires_two_subjects() {
    let config_dir = TempDir::new().unwrap();
    let path = config_dir.path().join("one.json");
    std::fs::write(
        &path,
        r#"[{"id": "5a2f8e3c-0f44-4a5e-9c41-98a1c8b7d001", "name": "Anna", "relationship": "daughter"}]"#,
    )
    .unwrap();

    evoke_cmd(&config_dir)
        .args(["prompts", "generate", "--subjects", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least 2 contacts required"));
}

#[test]
fn test_profile_items_from_file() {
    let config_dir = TempDir::new().unwrap();
    let path = config_dir.path().join("profile.json");
    std::fs::write(
        &path,
        r#"{
            "full_name": "Rose Martin",
            "phone_number": "5558675309",
            "address_city": "Portland",
            "job": "librarian",
            "favorite_food": "lasagna"
        }"#,
    )
    .unwrap();

    evoke_cmd(&config_dir)
        .args([
            "profile",
            "items",
            "--profile",
            path.to_str().unwrap(),
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("expected:"))
        .stdout(predicate::str::contains("hint:"));
}

#[test]
fn test_profile_items_require_five_filled_fields() {
    let config_dir = TempDir::new().unwrap();
    let path = config_dir.path().join("sparse.json");
    std::fs::write(&path, r#"{"full_name": "Rose Martin", "job": "librarian"}"#).unwrap();

    evoke_cmd(&config_dir)
        .args(["profile", "items", "--profile", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "At least 5 filled profile fields required",
        ));
}

#[test]
fn test_session_stats_from_file() {
    let config_dir = TempDir::new().unwrap();
    let path = config_dir.path().join("responses.json");
    std::fs::write(
        &path,
        r#"[
            {
                "kind": "relationship",
                "user_answer": "daughter",
                "is_correct": true,
                "is_partial": false,
                "response_time_ms": 1500.0,
                "answered_at": "2025-06-01T10:00:00Z"
            },
            {
                "kind": "interests",
                "user_answer": "golf",
                "is_correct": false,
                "is_partial": false,
                "answered_at": "2025-06-01T10:01:00Z"
            }
        ]"#,
    )
    .unwrap();

    evoke_cmd(&config_dir)
        .args(["session", "stats", "--responses", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy: 50.0%"))
        .stdout(predicate::str::contains("relationship: 1/1"));
}

#[test]
fn test_config_set_changes_evaluation() {
    let config_dir = TempDir::new().unwrap();

    evoke_cmd(&config_dir)
        .args(["config", "set", "matching.use_partial_substring", "false"])
        .assert()
        .success();

    evoke_cmd(&config_dir)
        .args(["config", "get", "matching.use_partial_substring"])
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));

    // With the substring tier off, containment falls back to the
    // significant-word tier and scores 0.70 instead of 0.80
    evoke_cmd(&config_dir)
        .args(["evaluate", "my son john", "son"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partially correct (score 0.70)"));
}

#[test]
fn test_config_list_and_reset() {
    let config_dir = TempDir::new().unwrap();

    evoke_cmd(&config_dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matching.use_synonyms = true"))
        .stdout(predicate::str::contains("session.prompt_count = 5"));

    evoke_cmd(&config_dir)
        .args(["config", "set", "matching.use_synonyms", "false"])
        .assert()
        .success();

    evoke_cmd(&config_dir)
        .args(["config", "reset"])
        .assert()
        .success();

    evoke_cmd(&config_dir)
        .args(["config", "get", "matching.use_synonyms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true"));
}

#[test]
fn test_unknown_config_key_fails_with_hint() {
    let config_dir = TempDir::new().unwrap();
    evoke_cmd(&config_dir)
        .args(["config", "get", "matching.nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("evoke config list"));
}
