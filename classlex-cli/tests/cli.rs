use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn scan_prints_classes_and_selection() {
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("scan").arg("md:hover:p-4").arg("--cursor").arg("10");

    cmd.assert().success().stdout(
        predicate::str::contains("\"p-4\"@9..12 variants=[md, hover]")
            .and(predicate::str::contains("selection: \"p-4\"@9..12")),
    );
}

#[test]
fn scan_outputs_json() {
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("scan")
        .arg("a:(b c)")
        .arg("--brackets")
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"in_group\": true").and(predicate::str::contains("\"groups\"")));
}

#[test]
fn scan_reads_config_file() {
    let config = write_temp(".toml", "[twin]\nenabled = true\n");
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("scan")
        .arg("hover:(p-4!)")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"p-4\"@7..10 variants=[hover] important group"));
}

#[test]
fn scan_rejects_invalid_separator() {
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("scan").arg("a").arg("--separator").arg("");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("separator must not be empty"));
}

#[test]
fn check_reports_problems() {
    let file = write_temp(".txt", "md: p-4 p-4\n");
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("check").arg(file.path());

    cmd.assert().failure().code(1).stdout(
        predicate::str::contains("1:1 empty-class")
            .and(predicate::str::contains("1:9 duplicate-class")),
    );
}

#[test]
fn check_passes_clean_file() {
    let file = write_temp(".txt", "md:p-4 hover:underline\n");
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("check").arg(file.path());

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn tokens_lists_spans() {
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("tokens").arg("md:p-4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0..2\tVariant\tmd").and(predicate::str::contains("3..6\tClass\tp-4")));
}

#[test]
fn list_options_prints_defaults() {
    let mut cmd = cargo_bin_cmd!("classlex");
    cmd.arg("list-options");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[scanner]").and(predicate::str::contains("separator = \":\"")));
}
