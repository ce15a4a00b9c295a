//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `dissect` command isolated from any config in the caller's cwd or home.
fn dissect(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("dissect").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("DISSECT_SEED")
        .env_remove("RUST_LOG");
    cmd
}

fn json_reports(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

#[test]
fn sections_lists_the_article() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .arg("sections")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 sections"))
        .stdout(predicate::str::contains("Literature Review"))
        .stdout(predicate::str::contains("Discussion"));
}

#[test]
fn sections_with_excerpts() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["sections", "--excerpts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("r = .166"));
}

#[test]
fn check_builtin_content() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All sections valid"));
}

#[test]
fn play_quit_immediately() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["play", "--seed", "1"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Round 1: Read this excerpt"))
        .stdout(predicate::str::contains("No rounds completed"));
}

#[test]
fn play_one_round_and_export_csv() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");

    dissect(dir.path())
        .args(["play", "--seed", "3", "--output"])
        .arg(&out)
        .write_stdin("1\n1\ne\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bonus question:"))
        .stdout(predicate::str::contains("Results saved to:"))
        .stdout(predicate::str::contains("Total score:"));

    let csv = std::fs::read_to_string(out.join("facebook_game_results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "round,guess,correct_section,bonus_answer,correct_bonus,score"
    );
    assert!(lines[1].starts_with("1,Abstract,"));
}

#[test]
fn seeded_play_is_reproducible() {
    let script = "1\ns\nn\n2\ns\nn\n3\ns\nq\n";
    let run = |seed: &str| {
        let dir = TempDir::new().unwrap();
        let output = dissect(dir.path())
            .args(["play", "--seed", seed])
            .write_stdin(script)
            .output()
            .unwrap();
        assert!(output.status.success());
        String::from_utf8(output.stdout).unwrap()
    };

    let first = run("99");
    assert!(first.contains("Round 3: Read this excerpt"));
    assert_eq!(first, run("99"));
}

#[test]
fn play_without_bonus() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["play", "--seed", "4", "--no-bonus"])
        .write_stdin("2\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bonus question").not())
        .stdout(predicate::str::contains("Rounds played: 0"));
}

#[test]
fn play_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["play", "--format", "xml"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn play_with_missing_config() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["play", "--config", "nope.toml"])
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn invalid_seed_env_is_an_error() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .env("DISSECT_SEED", "not-a-number")
        .arg("play")
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DISSECT_SEED"));
}

#[test]
fn local_config_sets_export_filename() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("dissect.toml"),
        "seed = 8\nexport_filename = \"rounds.csv\"\n",
    )
    .unwrap();

    dissect(dir.path())
        .arg("play")
        .write_stdin("3\n3\ne\nq\n")
        .assert()
        .success();

    assert!(dir.path().join("rounds.csv").exists());
}

#[test]
fn json_export_and_summary() {
    let dir = TempDir::new().unwrap();

    dissect(dir.path())
        .args(["play", "--seed", "5", "--format", "json"])
        .write_stdin("4\n2\ne\nq\n")
        .assert()
        .success();

    let reports = json_reports(dir.path());
    assert_eq!(reports.len(), 1);

    dissect(dir.path())
        .arg("summary")
        .arg("--report")
        .arg(&reports[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: 5"))
        .stdout(predicate::str::contains("Rounds: 1"));

    dissect(dir.path())
        .args(["summary", "--format", "json", "--report"])
        .arg(&reports[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"history\""));
}

#[test]
fn summary_of_missing_report() {
    let dir = TempDir::new().unwrap();
    dissect(dir.path())
        .args(["summary", "--report", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    dissect(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created dissect.toml"));
    assert!(dir.path().join("dissect.toml").exists());

    // The generated config must load.
    dissect(dir.path())
        .arg("play")
        .write_stdin("q\n")
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    dissect(dir.path()).arg("init").assert().success();

    dissect(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
