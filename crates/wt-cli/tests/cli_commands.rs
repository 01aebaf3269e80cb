//! Integration tests for the `wt` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wt() -> Command {
    Command::cargo_bin("wt").unwrap()
}

/// Create a temp directory holding a freshly initialised save file.
fn test_world() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("world.json");
    wt().args(["init", "-w", path.to_str().unwrap()])
        .assert()
        .success();
    (dir, path)
}

fn run(path: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    wt().args(args)
        .args(["-w", path.to_str().unwrap()])
        .assert()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_save_file() {
    let dir = TempDir::new().unwrap();
    wt().arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created world in world.json"));

    let json = fs::read_to_string(dir.path().join("world.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"].as_array().unwrap().len(), 15);
    assert!(value["root"].is_string());
}

#[test]
fn init_refuses_to_overwrite() {
    let (_dir, path) = test_world();
    run(&path, &["init"])
        .failure()
        .stderr(predicate::str::contains("already exists"));
    run(&path, &["init", "--force"]).success();
}

// ---------------------------------------------------------------------------
// inspection
// ---------------------------------------------------------------------------

#[test]
fn list_shows_entities_and_parents() {
    let (_dir, path) = test_world();
    run(&path, &["list"]).success().stdout(
        predicate::str::contains("entrance guard")
            .and(predicate::str::contains("wall entrance"))
            .and(predicate::str::contains("(root)"))
            .and(predicate::str::contains("15 entities")),
    );
}

#[test]
fn tree_prints_outline() {
    let (_dir, path) = test_world();
    run(&path, &["tree"]).success().stdout(
        predicate::str::starts_with("global [location]\n")
            .and(predicate::str::contains("\n  shelter [location]\n    player [creature]\n"))
            .and(predicate::str::contains("      entrance guard [creature]")),
    );
}

#[test]
fn tree_from_named_entity() {
    let (_dir, path) = test_world();
    run(&path, &["tree", "--from", "barn"]).success().stdout(
        predicate::str::starts_with("barn [location]\n")
            .and(predicate::str::contains("  canned food [item]"))
            .and(predicate::str::contains("shelter").not()),
    );
}

#[test]
fn show_location_lists_materials() {
    let (_dir, path) = test_world();
    run(&path, &["show", "barn"]).success().stdout(
        predicate::str::contains("in:         settlement < global")
            .and(predicate::str::contains("Materials here:"))
            .and(predicate::str::contains("steel: 6")),
    );
}

#[test]
fn show_unknown_entity_fails() {
    let (_dir, path) = test_world();
    run(&path, &["show", "castle"])
        .failure()
        .stderr(predicate::str::contains("entity not found"));
}

#[test]
fn check_passes_fresh_world() {
    let (_dir, path) = test_world();
    run(&path, &["check"])
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn check_rejects_inconsistent_file() {
    let (_dir, path) = test_world();
    let json = fs::read_to_string(&path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["children"] = serde_json::json!({});
    fs::write(&path, value.to_string()).unwrap();

    run(&path, &["check"])
        .failure()
        .stderr(predicate::str::contains("invalid snapshot"));
}

#[test]
fn unknown_type_in_file_fails_cleanly() {
    let (_dir, path) = test_world();
    let json = fs::read_to_string(&path).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["nodes"][1]["type"] = "VEHICLE".into();
    fs::write(&path, value.to_string()).unwrap();

    run(&path, &["list"])
        .failure()
        .stderr(predicate::str::contains("unknown entity type: \"VEHICLE\""));
}

#[test]
fn missing_save_file() {
    let dir = TempDir::new().unwrap();
    run(&dir.path().join("nope.json"), &["where"])
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn where_describes_shelter() {
    let (_dir, path) = test_world();
    run(&path, &["where"])
        .success()
        .stdout(predicate::str::starts_with("You are here: shelter - "));
}

#[test]
fn moves_lists_reachable_locations() {
    let (_dir, path) = test_world();
    run(&path, &["moves"]).success().stdout(predicate::eq(
        "From here you can move to:\n- global\n- town\n- settlement\n",
    ));
}

#[test]
fn go_moves_player_and_saves() {
    let (_dir, path) = test_world();
    run(&path, &["go", "settlement"])
        .success()
        .stdout(predicate::str::contains("You are here: settlement"));
    run(&path, &["go", "wall entrance"])
        .success()
        .stdout(predicate::str::contains("- entrance guard:"));
    run(&path, &["where"])
        .success()
        .stdout(predicate::str::starts_with("You are here: wall entrance"));
    run(&path, &["check"]).success();
}

#[test]
fn go_to_unreachable_place_fails() {
    let (_dir, path) = test_world();
    run(&path, &["go", "counter"])
        .failure()
        .stderr(predicate::str::contains("cannot go to \"counter\""));
    run(&path, &["where"])
        .success()
        .stdout(predicate::str::starts_with("You are here: shelter"));
}

#[test]
fn custom_player_name() {
    let (_dir, path) = test_world();
    run(&path, &["where", "--player", "entrance guard"])
        .success()
        .stdout(predicate::str::starts_with("You are here: wall entrance"));
    run(&path, &["where", "--player", "ghost"])
        .failure()
        .stderr(predicate::str::contains("no entity named \"ghost\""));
}
