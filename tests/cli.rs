#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dbselector(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dbselector").expect("binary should compile");
    cmd.env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(config_dir.path());
    cmd
}

const MONGODB_ANSWERS: [&str; 5] = [
    "schema_evolution=unpredictable",
    "query_patterns=document_retrieval",
    "team_expertise=javascript_heavy",
    "consistency_needs=eventually_consistent",
    "performance_profile=write_heavy_scaling",
];

fn with_answers<'a>(cmd: &'a mut Command, answers: &[&str]) -> &'a mut Command {
    for answer in answers {
        cmd.arg("--answer").arg(answer);
    }
    cmd
}

#[test]
fn assess_recommends_mongodb_with_high_confidence() {
    let dir = TempDir::new().expect("temp dir should be created");
    let mut cmd = dbselector(&dir);
    cmd.arg("assess");
    with_answers(&mut cmd, &MONGODB_ANSWERS)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "# ADR: Database Selection - MongoDB for Custom Application",
        ))
        .stdout(predicate::str::contains("**Accepted**"))
        .stdout(predicate::str::contains("| MongoDB | 1.50 | 100.0% |"))
        .stdout(predicate::str::contains("## Consequences"))
        .stdout(predicate::str::contains("## Implementation Notes"))
        .stdout(predicate::str::contains("## Alternatives Considered"));
}

#[test]
fn balanced_answers_exit_with_warning_code() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args(["assess", "--answer", "schema_evolution=somewhat_predictable"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Neutral/Requires Further Analysis"))
        .stdout(predicate::str::contains("**Under Review**"))
        .stdout(predicate::str::contains("Scores are too close between"));
}

#[test]
fn compare_ranks_relational_candidate_first() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args([
            "compare",
            "--db",
            "postgresql",
            "--db",
            "mongodb",
            "--answer",
            "consistency_requirements=critical_acid",
            "--answer",
            "query_patterns=complex_joins",
            "--format",
            "json",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"recommendation\": \"postgresql\""))
        .stdout(predicate::str::contains("\"basis\": \"raw\""));
}

#[test]
fn compare_rejects_unknown_candidate() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args(["compare", "--db", "postgresql", "--db", "couchdb"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown candidate: couchdb"));
}

#[test]
fn malformed_answer_is_a_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args(["assess", "--answer", "schema_evolution"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid answer 'schema_evolution'"));
}

#[test]
fn follow_up_requires_an_unlocking_answer() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args([
            "assess",
            "--answer",
            "schema_evolution=unpredictable",
            "--follow-up",
            "schema_governance=gradual_evolution",
            "--follow-up",
            "join_complexity=simple_joins",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("[follow-up]"))
        .stdout(predicate::str::contains("join operations").not())
        .stderr(predicate::str::contains("not unlocked"));
}

#[test]
fn saved_session_replays_to_the_same_result() {
    let dir = TempDir::new().expect("temp dir should be created");
    let session = dir.path().join("sessions/ledger.json");

    let mut cmd = dbselector(&dir);
    cmd.arg("assess");
    let first = with_answers(&mut cmd, &MONGODB_ANSWERS)
        .args(["--context", "team_size=6", "--format", "json", "--save"])
        .arg(&session)
        .output()
        .expect("assess should run");
    assert!(first.status.success());
    assert!(session.exists(), "session file should be written");

    let second = dbselector(&dir)
        .arg("replay")
        .arg(&session)
        .args(["--format", "json"])
        .output()
        .expect("replay should run");
    assert!(second.status.success());

    let parse = |bytes: &[u8]| {
        let mut value: serde_json::Value =
            serde_json::from_slice(bytes).expect("output should be json");
        value
            .as_object_mut()
            .expect("output should be an object")
            .remove("generated_at");
        value
    };
    assert_eq!(parse(&first.stdout), parse(&second.stdout));
}

#[test]
fn replay_distinguishes_missing_and_malformed_sessions() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .arg("replay")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("session file not found"));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"version\": 1}").expect("fixture should write");
    dbselector(&dir)
        .arg("replay")
        .arg(&broken)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cannot parse session"));
}

#[test]
fn config_supplies_project_name_and_custom_candidates() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("dbselector.toml"),
        r#"
[project]
name = "Ledger"

[assessment]
default_candidates = ["postgresql", "cockroachdb"]

[[candidates]]
id = "cockroachdb"
name = "CockroachDB"
category = "relational"
learning_curve = "medium"
ecosystem_maturity = "mature"
scaling_model = "horizontal"
"#,
    )
    .expect("config should write");

    dbselector(&dir)
        .args(["compare", "--answer", "performance_scaling=write_heavy"])
        .assert()
        .stdout(predicate::str::contains("for Ledger"))
        .stdout(predicate::str::contains("| CockroachDB |"));

    dbselector(&dir)
        .args(["candidates", "--category", "relational"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("CockroachDB (cockroachdb)"));
}

#[test]
fn configured_weight_overrides_catalog_weight_in_listing() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("dbselector.toml"),
        "[weights]\nschema_evolution = 0.4\n",
    )
    .expect("config should write");

    dbselector(&dir)
        .arg("questions")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("[schema_evolution] (weight 40%)"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().expect("temp dir should be created");
    fs::write(
        dir.path().join("dbselector.toml"),
        "[weights]\nbudget = 0.2\n",
    )
    .expect("config should write");

    dbselector(&dir)
        .arg("questions")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}

#[test]
fn questions_and_pairs_are_listed() {
    let dir = TempDir::new().expect("temp dir should be created");
    dbselector(&dir)
        .args(["questions", "--guided", "--context", "financial_domain=yes"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("[schema_evolution] (weight 25%)"))
        .stdout(predicate::str::contains("[consistency_requirements] (weight 15%)"))
        .stdout(predicate::str::contains("hint: Financial applications"))
        .stdout(predicate::str::contains("Follow-up questions:"));

    dbselector(&dir)
        .args(["candidates", "--pairs"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- postgresql vs mongodb"));
}
