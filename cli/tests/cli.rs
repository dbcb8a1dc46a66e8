use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gridpath() -> Command {
    let mut cmd = Command::cargo_bin("gridpath").unwrap();
    cmd.env_remove("GRIDPATH_MAX_EXPANSIONS")
        .env_remove("GRIDPATH_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

fn maze_file(text: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("maze.txt");
    fs::write(&file, text).unwrap();
    (dir, file.to_string_lossy().into_owned())
}

#[test]
fn solves_a_file() {
    let (_dir, file) = maze_file("S..\n.##\n..X\n");
    gridpath()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculating path..."))
        .stdout(predicate::str::contains("S..\n*##\n**X\n"))
        .stdout(predicate::str::is_match(r"Path found in \d+ ms\.").unwrap())
        .stdout(predicate::str::contains("Steps: d,d,r,r"));
}

#[test]
fn reports_unreachable_goal() {
    let (_dir, file) = maze_file("S..\n###\n..X\n");
    gridpath()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Path not found."));
}

#[test]
fn reports_bad_maps() {
    let (_dir, file) = maze_file("S..\n.#\n..X\n");
    gridpath()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong map format: row 1 has 2 columns, expected 3."));

    let (_dir, file) = maze_file("...\n..X\n");
    gridpath()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Start or end point is not defined."));

    let (_dir, file) = maze_file("S.?\n..X\n");
    gridpath()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong map format: unexpected character '?'"));
}

#[test]
fn diagonal_hides_steps() {
    let (_dir, file) = maze_file("S..\n...\n..X\n");
    gridpath()
        .args([file.as_str(), "--diagonal"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Don't use diagonal option to view the solution steps.",
        ))
        .stdout(predicate::str::contains("Steps:").not());
}

#[test]
fn console_input_until_done() {
    gridpath()
        .write_stdin("S.X\nDONE\nthis is ignored\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please draw the rectangle map."))
        .stdout(predicate::str::contains("Steps: r,r"));
}

#[test]
fn reload_asks_until_no() {
    let (_dir, file) = maze_file("S.X\n");
    let assert = gridpath()
        .args([file.as_str(), "--reload"])
        .write_stdin("what\ny\nn\n")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Calculating path...").count(), 2);
    assert_eq!(stdout.matches("Wrong answer.").count(), 1);
}

#[test]
fn expansion_limit_from_env() {
    let (_dir, file) = maze_file("S....\n.....\n....X\n");
    gridpath()
        .arg(&file)
        .env("GRIDPATH_MAX_EXPANSIONS", "2")
        .assert()
        .success()
        .stdout(predicate::str::contains("expansion limit"));
}

#[test]
fn generous_timeout_still_solves() {
    let (_dir, file) = maze_file("S.X\n");
    gridpath()
        .args([file.as_str(), "--timeout-ms", "30000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Steps: r,r"));
}

#[test]
fn missing_file_fails() {
    gridpath()
        .arg("/nonexistent/gridpath/maze.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading maze file"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let (_dir, file) = maze_file("S.X\n");
    gridpath()
        .args([file.as_str(), "-vv", "--no-color"])
        .assert()
        .success()
        .stderr(predicate::str::contains("parsed 3x1 map"))
        .stdout(predicate::str::contains("parsed").not());
}
