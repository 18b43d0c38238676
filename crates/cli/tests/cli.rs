// ABOUTME: End-to-end tests for the readaloud binary over local HTML files.
// ABOUTME: Exercises the text report, JSON output, and synchronous speak mode.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

const PAGE: &str = r#"<html><body>
    <h2 class="title">Intro</h2>
    <p>Hello &amp; welcome.</p>
    <nav><h2>Menu</h2></nav>
    </body></html>"#;

fn page_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();
    file
}

#[test]
fn report_lists_regions() {
    let file = page_file();
    Command::cargo_bin("readaloud")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 region(s)"))
        .stdout(predicate::str::contains("#1 Intro"))
        .stdout(predicate::str::contains("Hello & welcome."));
}

#[test]
fn json_output_is_parseable() {
    let file = page_file();
    let output = Command::cargo_bin("readaloud")
        .unwrap()
        .arg("--json")
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let regions = parsed.as_array().unwrap();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0]["claim"], 1);
    assert_eq!(regions[0]["title"], "Intro");
    assert_eq!(regions[0]["content"], "Hello & welcome.");
}

#[test]
fn speak_mode_plays_title_then_content() {
    let file = page_file();
    Command::cargo_bin("readaloud")
        .unwrap()
        .arg("--speak")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("speaking: Intro")
                .and(predicate::str::contains("speaking: Hello & welcome.")),
        );
}

#[test]
fn stdin_input_is_supported() {
    Command::cargo_bin("readaloud")
        .unwrap()
        .arg("-")
        .write_stdin(PAGE)
        .assert()
        .success()
        .stdout(predicate::str::contains("#1 Intro"));
}

#[test]
fn missing_file_fails_with_error() {
    Command::cargo_bin("readaloud")
        .unwrap()
        .arg("/no/such/page.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
