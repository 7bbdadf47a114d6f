//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO_CATALOG: &str = r#"
[[majors]]
id = 1
name = "Computer Science"
college = "College of Engineering"

[majors.description]
academics = "Algorithms and systems."

[[majors]]
id = 2
name = "Psychology"
college = "College of Liberal Arts"

[[majors]]
id = 3
name = "Business Admin"
college = "School of Business"

[[questions]]
id = 1
text = "Like coding?"
weights = [5, -2, 0]
"#;

/// Command isolated from the user's config and environment.
fn majorchooser(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("majorchooser").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("MAJORCHOOSER_STORE")
        .env_remove("MAJORCHOOSER_CATALOG")
        .env_remove("RUST_LOG");
    cmd
}

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("store.json")
}

fn scenario_catalog(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("scenario.toml");
    std::fs::write(&path, SCENARIO_CATALOG).unwrap();
    path
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("college major recommendation"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("majorchooser"));
}

#[test]
fn quiz_with_answers_recommends() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--answers")
        .arg("yes,yes,yes,yes,yes,yes,yes,yes")
        .arg("--store")
        .arg(store_path(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Major Simulation Result: Mechanical Engineering",
        ));
}

#[test]
fn quiz_json_matches_scoring_scenario() {
    let dir = TempDir::new().unwrap();
    let output = majorchooser(&dir)
        .arg("quiz")
        .arg("--answers")
        .arg("yes")
        .arg("--format")
        .arg("json")
        .arg("--catalog")
        .arg(scenario_catalog(&dir))
        .arg("--store")
        .arg(store_path(&dir))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["recommended"]["name"], "Computer Science");
    let scores: Vec<f64> = value["scores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["affinity"].as_f64().unwrap())
        .collect();
    assert_eq!(scores, vec![15.0, 8.0, 10.0]);
}

#[test]
fn quiz_rejects_wrong_answer_count() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--answers")
        .arg("yes")
        .arg("--store")
        .arg(store_path(&dir))
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 8 answers, got 1"));
}

#[test]
fn quiz_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn interactive_quiz_reads_stdin() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--catalog")
        .arg(scenario_catalog(&dir))
        .arg("--store")
        .arg(store_path(&dir))
        .write_stdin("perhaps\nno\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("(1/1) Like coding?"))
        .stderr(predicate::str::contains("Please answer yes or no"))
        .stdout(predicate::str::contains(
            "Major Simulation Result: Psychology",
        ));
}

#[test]
fn interactive_quiz_offers_another_attempt() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--catalog")
        .arg(scenario_catalog(&dir))
        .arg("--store")
        .arg(store_path(&dir))
        .write_stdin("no\nyes\nyes\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Attempt again? [yes/no]"))
        .stdout(predicate::str::contains(
            "Major Simulation Result: Psychology",
        ))
        .stdout(predicate::str::contains(
            "Major Simulation Result: Computer Science",
        ));
}

#[test]
fn interactive_quiz_aborts_on_end_of_input() {
    let dir = TempDir::new().unwrap();
    majorchooser(&dir)
        .arg("quiz")
        .arg("--store")
        .arg(store_path(&dir))
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended at question 2"));
}

#[test]
fn add_and_list_questions() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    majorchooser(&dir)
        .args(["questions", "add", "--text", "Do you like to travel?"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added question 9"));

    majorchooser(&dir)
        .args(["questions", "list"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you like to travel?"));

    assert!(store.exists());
}

#[test]
fn set_weight_accepts_negative_values() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    let catalog = scenario_catalog(&dir);

    majorchooser(&dir)
        .args(["questions", "set-weight", "1", "3", "-7.5"])
        .arg("--store")
        .arg(&store)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Set weight of question 1 for Business Admin to -7.5",
        ));

    majorchooser(&dir)
        .args(["questions", "list", "--weights"])
        .arg("--store")
        .arg(&store)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("-7.5"));
}

#[test]
fn set_weight_rejects_bad_input() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    majorchooser(&dir)
        .args(["questions", "set-weight", "1", "2", "NaN"])
        .arg("--store")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("finite"));

    majorchooser(&dir)
        .args(["questions", "set-weight", "1", "9", "1"])
        .arg("--store")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    // Nothing was written
    assert!(!store.exists());
}

#[test]
fn delete_renumbers_questions() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    majorchooser(&dir)
        .args(["questions", "delete", "1"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("7 remaining"));

    majorchooser(&dir)
        .args(["quiz", "--answers", "yes,yes,yes,yes,yes,yes,yes"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success();

    majorchooser(&dir)
        .args(["questions", "set-text", "8", "gone"])
        .arg("--store")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("question 8 not found"));
}

#[test]
fn corrupt_store_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);
    std::fs::write(&store, r#"{"questions": "not json at all"}"#).unwrap();

    majorchooser(&dir)
        .args(["quiz", "--answers", "yes"])
        .arg("--store")
        .arg(&store)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt question store"))
        .stderr(predicate::str::contains(
            "fix or delete it to start from the defaults",
        ));
}

#[test]
fn majors_list_and_browse() {
    let dir = TempDir::new().unwrap();

    majorchooser(&dir)
        .arg("majors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Graphic Design"));

    majorchooser(&dir)
        .args(["majors", "--id", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected Major: Psychology"))
        .stdout(predicate::str::contains("Opportunities"));

    majorchooser(&dir)
        .args(["majors", "--id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("major 42 not found"));
}

#[test]
fn validate_flags_weight_mismatch() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    majorchooser(&dir)
        .arg("validate")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog: 6 majors, 8 default questions"))
        .stdout(predicate::str::contains("Stored questions: 8 ("))
        .stdout(predicate::str::contains("store.json)"))
        .stdout(predicate::str::contains("All checks passed."));

    let document = serde_json::json!({
        "questions": r#"{"1":{"id":1,"text":"Short","weights":[1,2]}}"#
    });
    std::fs::write(&store, document.to_string()).unwrap();

    majorchooser(&dir)
        .arg("validate")
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("[question 1] WARNING: has 2 weights"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn rust_log_keeps_crate_info_logs() {
    let dir = TempDir::new().unwrap();
    let store = store_path(&dir);

    majorchooser(&dir)
        .env("RUST_LOG", "warn")
        .args(["questions", "add"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stderr(predicate::str::contains("added question 9"));

    majorchooser(&dir)
        .env("RUST_LOG", "majorchooser=debug")
        .args(["questions", "add"])
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stderr(predicate::str::contains("persisted 10 questions"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    majorchooser(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created majorchooser.toml"))
        .stdout(predicate::str::contains("Created catalog.toml"));

    assert!(dir.path().join("majorchooser.toml").exists());
    assert!(dir.path().join("catalog.toml").exists());

    // The generated config and catalog are picked up from the working directory
    majorchooser(&dir)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    majorchooser(&dir).arg("init").assert().success();

    majorchooser(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
