//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const LEGACY: &str = r#"{
  "ARE": ["parlare", "mangiare", "andare", "fare"],
  "ERE": ["credere", "vedere", "essere"],
  "IRE": ["dormire"],
  "ONREGELMATIG": ["andare", "fare", "essere"]
}"#;

const NORMALIZED: &str = r#"{
  "verbs": [
    {"infinitive": "andare", "group": "ARE", "irregular_tenses": ["presente", "futuro"]},
    {"infinitive": "parlare", "group": "ARE", "irregular_tenses": []},
    {"infinitive": "vedere", "group": "ERE", "irregular_tenses": []}
  ]
}"#;

/// `verbi` running inside `dir`, isolated from the user's config and
/// environment.
fn verbi(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("verbi").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("VERBI_DATABASE")
        .env_remove("VERBI_IRREGULAR_MARKER")
        .env_remove("RUST_LOG");
    cmd
}

fn setup(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("verbs.json"), contents).unwrap();
    dir
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    verbi(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Italian verb irregularity database",
        ));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    verbi(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("verbi"));
}

#[test]
fn tenses_lists_all_eight_in_order() {
    let dir = TempDir::new().unwrap();
    verbi(dir.path()).arg("tenses").assert().success().stdout(
        "presente\nimperfetto\nfuturo\npassato_remoto\npassato_prossimo\n\
         trapassato_prossimo\ntrapassato_remoto\nfuturo_anteriore\n",
    );
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    verbi(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created verbi.toml"))
        .stdout(predicate::str::contains("Created verbs.json"));

    assert!(dir.path().join("verbi.toml").exists());
    verbi(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:   legacy"))
        .stdout(predicate::str::contains("Verbs:    11"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    verbi(dir.path()).arg("init").assert().success();
    verbi(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn list_reads_legacy_database() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["list", "--group", "ONREGELMATIG", "--tense", "presente"])
        .assert()
        .success()
        .stdout("andare\nfare\nessere\n");

    verbi(dir.path())
        .args(["list", "--group", "REGULAR", "--tense", "futuro"])
        .assert()
        .success()
        .stdout("parlare\nmangiare\ncredere\nvedere\ndormire\n");
}

#[test]
fn list_rejects_unknown_tense() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["list", "--group", "ARE", "--tense", "futuro_semplice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tense: 'futuro_semplice'"));
}

#[test]
fn editing_legacy_database_is_refused() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["mark", "parlare", "futuro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("verbi migrate"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("verbs.json")).unwrap(),
        LEGACY
    );
}

#[test]
fn migrate_writes_sibling_file() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 8 verbs (simplified)"));

    // Original is untouched.
    assert_eq!(
        std::fs::read_to_string(dir.path().join("verbs.json")).unwrap(),
        LEGACY
    );

    let migrated = read_json(&dir.path().join("verbs.migrated.json"));
    let verbs = migrated["verbs"].as_array().unwrap();
    assert_eq!(verbs.len(), 8);
    assert_eq!(verbs[0]["infinitive"], "andare");
    assert_eq!(verbs[0]["group"], "ARE");
    assert_eq!(verbs[0]["irregular_tenses"].as_array().unwrap().len(), 8);
    let parlare = verbs.iter().find(|v| v["infinitive"] == "parlare").unwrap();
    assert_eq!(parlare["irregular_tenses"], serde_json::json!([]));
}

#[test]
fn migrate_all_tenses_layout() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["migrate", "--policy", "all-tenses", "--output", "full.json"])
        .assert()
        .success();

    let migrated = read_json(&dir.path().join("full.json"));
    let andare = &migrated["verbs"][0];
    assert_eq!(andare["infinitive"], "andare");
    let tenses = andare["tenses"].as_object().unwrap();
    assert_eq!(tenses.len(), 8);
    assert_eq!(tenses["presente"]["irregular"], true);

    let dormire = migrated["verbs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["infinitive"] == "dormire")
        .unwrap();
    assert_eq!(dormire["tenses"]["futuro"]["irregular"], false);
}

#[test]
fn migrate_then_edit_in_place() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["migrate", "--in-place"])
        .assert()
        .success();

    verbi(dir.path())
        .args(["mark", "parlare", "futuro", "presente"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Marked parlare irregular in: presente, futuro",
        ));

    let output = verbi(dir.path())
        .args(["info", "parlare", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let info: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["group"], "ARE");
    assert_eq!(info["irregular_tenses"], serde_json::json!(["presente", "futuro"]));
    assert_eq!(info["format"], "normalized");

    verbi(dir.path())
        .args(["migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to migrate"));
}

#[test]
fn mark_with_invalid_tense_changes_nothing() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["mark", "parlare", "futuro", "futuro_semplice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid tense: 'futuro_semplice'"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("verbs.json")).unwrap(),
        NORMALIZED
    );
}

#[test]
fn mark_all_tenses_and_repeat() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["mark", "vedere", "--all-tenses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("futuro_anteriore"));

    verbi(dir.path())
        .args(["mark", "vedere", "--all-tenses"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already irregular in every tense"));
}

#[test]
fn remove_clears_tenses() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["remove", "andare", "presente"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared andare in: presente"))
        .stdout(predicate::str::contains("still irregular in: futuro"));

    let saved = read_json(&dir.path().join("verbs.json"));
    assert_eq!(
        saved["verbs"][0]["irregular_tenses"],
        serde_json::json!(["futuro"])
    );
}

#[test]
fn unknown_verb_fails() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["info", "nuotare"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("verb 'nuotare' not found"));

    verbi(dir.path())
        .args(["mark", "nuotare", "presente"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("verb 'nuotare' not found"));
}

#[test]
fn info_text_output() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .args(["info", "ESSERE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Verb:      essere"))
        .stdout(predicate::str::contains("Group:     ERE"))
        .stdout(predicate::str::contains("Format:    legacy"));
}

#[test]
fn add_new_verb() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["add", "dormire"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added dormire (IRE)"));

    verbi(dir.path())
        .args(["add", "Dormire"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate infinitive"));

    verbi(dir.path())
        .args(["add", "porre", "--group", "VERBI_MODALI"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid conjugation group"));
}

#[test]
fn groups_table() {
    let dir = setup(LEGACY);
    verbi(dir.path())
        .arg("groups")
        .assert()
        .success()
        .stdout(predicate::str::contains("ONREGELMATIG"))
        .stdout(predicate::str::contains("Format: legacy"));
}

#[test]
fn quiz_json_is_reproducible() {
    let dir = setup(NORMALIZED);
    let args = [
        "quiz",
        "--groups",
        "IRREGULAR",
        "--tenses",
        "presente,futuro",
        "--seed",
        "11",
        "--json",
    ];

    let first = verbi(dir.path()).args(args).output().unwrap();
    let second = verbi(dir.path()).args(args).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let question: Value = serde_json::from_slice(&first.stdout).unwrap();
    assert_eq!(question["verb"], "andare");
    assert_eq!(question["is_irregular"], true);
    assert_eq!(question["group"], "IRREGULAR");
}

#[test]
fn quiz_with_no_candidates_fails() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["quiz", "--groups", "IRE", "--tenses", "presente"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no verbs found"));
}

#[test]
fn analyze_suggests_and_applies() {
    let dir = setup(NORMALIZED);
    let table = serde_json::json!({
        "word": "vedere",
        "conjugations": [
            {"group": "indicative/present", "value": "vedo"},
            {"group": "indicative/present", "value": "vedi"},
            {"group": "indicative/present", "value": "vede"},
            {"group": "indicative/present", "value": "vediamo"},
            {"group": "indicative/present", "value": "vedete"},
            {"group": "indicative/present", "value": "vedono"},
            {"group": "indicative/future", "value": "vedrò"},
            {"group": "indicative/future", "value": "vedrai"},
            {"group": "indicative/future", "value": "vedrà"},
            {"group": "indicative/future", "value": "vedremo"},
            {"group": "indicative/future", "value": "vedrete"},
            {"group": "indicative/future", "value": "vedranno"}
        ]
    });
    std::fs::write(dir.path().join("vedere.json"), table.to_string()).unwrap();
    std::fs::write(dir.path().join("broken.json"), "not json").unwrap();

    verbi(dir.path())
        .args(["analyze", "vedere.json", "broken.json", "--apply"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked vedere irregular in: futuro"))
        .stderr(predicate::str::contains("skipping broken.json"));

    let saved = read_json(&dir.path().join("verbs.json"));
    assert_eq!(
        saved["verbs"][2]["irregular_tenses"],
        serde_json::json!(["futuro"])
    );
}

#[test]
fn analyze_fails_when_nothing_is_readable() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["analyze", "missing.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could be read"));
}

#[test]
fn database_flag_and_env_override() {
    let dir = setup(NORMALIZED);
    std::fs::write(dir.path().join("legacy.json"), LEGACY).unwrap();

    verbi(dir.path())
        .args(["--database", "legacy.json", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Format:   legacy"));

    verbi(dir.path())
        .env("VERBI_DATABASE", "legacy.json")
        .arg("groups")
        .assert()
        .success()
        .stdout(predicate::str::contains("ONREGELMATIG"));

    verbi(dir.path())
        .args(["validate", "--database", "nowhere.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read verb database"));
}

#[test]
fn custom_marker_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("verbs.json"),
        r#"{"ARE": ["parlare", "andare"], "IRREGOLARE": ["andare"]}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("verbi.toml"),
        "irregular_marker = \"IRREGOLARE\"\n",
    )
    .unwrap();

    verbi(dir.path())
        .args(["list", "--group", "IRREGULAR"])
        .assert()
        .success()
        .stdout("andare\n");
}

#[test]
fn missing_explicit_config_fails() {
    let dir = setup(NORMALIZED);
    verbi(dir.path())
        .args(["--config", "nope.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn validate_reports_warnings_without_migrating() {
    let dir = setup(r#"{"ARE": ["parlare"], "ERE": ["parlare", "credere"]}"#);
    let output = verbi(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "WARNING: 'parlare' appears in both ARE and ERE; keeping ARE",
        ))
        .stdout(predicate::str::contains("1 warning(s) found."))
        .stderr(predicate::str::contains("migration complete").not())
        .get_output()
        .clone();

    // Logged once while loading, not again for the report.
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("appears in both").count(), 1, "{stderr}");
}

#[test]
fn import_reads_lists_and_keyed_lists() {
    let dir = TempDir::new().unwrap();
    let words = dir.path().join("words");
    std::fs::create_dir(&words).unwrap();
    std::fs::write(
        words.join("a.json"),
        r#"["parlare", {"verb": "credere"}, "andare", "porre"]"#,
    )
    .unwrap();
    std::fs::write(
        words.join("b.json"),
        r#"{"lezione1": ["dormire", "Parlare"], "lezione2": [{"verb": "essere"}]}"#,
    )
    .unwrap();

    verbi(dir.path())
        .args(["import", "words"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 6 verbs from 2 file(s) into verbs.json",
        ))
        .stdout(predicate::str::contains("  ONREGELMATIG: 3"));

    let imported = read_json(&dir.path().join("verbs.json"));
    assert_eq!(
        imported,
        serde_json::json!({
            "ARE": ["parlare"],
            "ERE": ["credere"],
            "IRE": ["dormire"],
            "ONREGELMATIG": ["andare", "essere", "porre"]
        })
    );

    // The result is a regular legacy database.
    verbi(dir.path())
        .args(["list", "--group", "IRREGULAR"])
        .assert()
        .success()
        .stdout("andare\nessere\nporre\n");
}

#[test]
fn import_refuses_to_overwrite_without_force() {
    let dir = setup(NORMALIZED);
    let words = dir.path().join("words");
    std::fs::create_dir(&words).unwrap();
    std::fs::write(words.join("list.json"), r#"["cantare"]"#).unwrap();

    verbi(dir.path())
        .args(["import", "words"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("verbs.json")).unwrap(),
        NORMALIZED
    );

    verbi(dir.path())
        .args(["import", "words", "--output", "imported.json"])
        .assert()
        .success();
    assert_eq!(
        read_json(&dir.path().join("imported.json"))["ARE"],
        serde_json::json!(["cantare"])
    );

    verbi(dir.path())
        .args(["import", "words", "--force"])
        .assert()
        .success();
    assert_eq!(
        read_json(&dir.path().join("verbs.json"))["ARE"],
        serde_json::json!(["cantare"])
    );
}
