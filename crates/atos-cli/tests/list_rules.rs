use assert_cmd::Command;
use predicates::str::contains;

fn atos() -> Command {
    Command::cargo_bin("atos-cli").unwrap()
}

#[test]
fn list_rules_shows_the_registry() {
    atos()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(contains("rule(s) registered"))
        .stdout(contains("EVID_NONE"))
        .stdout(contains("INS_SCOPE_GAP"))
        .stdout(contains("PROP_NOT_SELECTED"))
        .stdout(contains("(terminal)"));
}

#[test]
fn list_rules_filters_by_module_as_json() {
    let output = atos()
        .args(["list-rules", "--module", "forensic", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules = rules.as_array().expect("rules must be a JSON array");
    assert!(!rules.is_empty());
    assert!(rules.iter().all(|rule| rule["module"] == "forensic"));
    assert!(rules.iter().any(|rule| rule["id"] == "EVID_UNVERIFIED"));
}

#[test]
fn list_rules_rejects_unknown_modules() {
    atos()
        .args(["list-rules", "--module", "billing"])
        .assert()
        .failure()
        .stderr(contains("unknown guidance module `billing`"));
}

#[test]
fn modules_lists_all_five_identifiers() {
    let output = atos().arg("modules").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let listed: Vec<_> = stdout.lines().collect();
    assert_eq!(
        listed,
        vec!["intelligence", "forensic", "insurance", "execution", "equity"]
    );
}
