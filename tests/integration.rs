// Runs the capture binary against scratch directory trees.
use predicates::prelude::PredicateBooleanExt;
use std::fs;

fn sample_tree() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.json"), r#"{"x":1}"#).unwrap();
    fs::write(root.join("b.txt"), "hello").unwrap();
    fs::write(root.join("package-lock.json"), "{}").unwrap();
    fs::write(root.join("yarn.lock"), "# yarn").unwrap();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("node_modules/dep/index.js"), "module.exports = 1").unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join(".git/HEAD"), "ref: refs/heads/main").unwrap();

    dir
}

#[test]
fn capture_named_project() {
    let tree = sample_tree();
    let name = tree.path().file_name().unwrap().to_string_lossy().into_owned();
    let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

    cmd.arg(tree.path());

    cmd.assert()
        .success()
        .stdout(predicates::str::contains(format!(
            "let mut fixture = project(\"{}\");",
            name
        )))
        .stdout(predicates::str::contains(
            "fixture.add_json_file(\"a.json\", serde_json::json!({\n\t\"x\": 1\n}));",
        ))
        .stdout(predicates::str::contains(
            "fixture.add_file(\"b.txt\", \"hello\");",
        ))
        .stdout(predicates::str::contains("node_modules").not())
        .stdout(predicates::str::contains(".git").not())
        .stdout(predicates::str::contains("package-lock.json").not())
        .stdout(predicates::str::contains("yarn.lock").not());
}

#[test]
fn capture_temp_project_from_current_dir() {
    let tree = sample_tree();
    let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

    cmd.current_dir(tree.path()).arg("-t");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains(
            "let mut fixture = tempdir_project(\"\").unwrap();",
        ))
        .stdout(predicates::str::contains("fixture.add_file(\"b.txt\", \"hello\");"));
}

#[test]
fn two_positional_arguments_print_usage() {
    let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

    cmd.arg("foo").arg("bar");

    cmd.assert()
        .code(1)
        .stdout(predicates::str::diff("Usage: capture-fs-fixture [-t] [path]\n"));
}

#[test]
fn unknown_flag_prints_usage() {
    let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

    cmd.arg("--verbose");

    cmd.assert()
        .code(1)
        .stdout(predicates::str::contains("Usage: capture-fs-fixture [-t] [path]"))
        .stdout(predicates::str::contains("fixture.").not());
}

#[test]
fn dash_arguments_other_than_temp_flag_print_usage() {
    let tree = sample_tree();

    for arg in ["--", "-", "-tt"] {
        let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

        cmd.current_dir(tree.path()).arg(arg);

        cmd.assert()
            .code(1)
            .stdout(predicates::str::diff("Usage: capture-fs-fixture [-t] [path]\n"));
    }
}

#[test]
fn repeated_temp_flag_is_accepted() {
    let tree = sample_tree();
    let mut cmd = assert_cmd::Command::cargo_bin("capture-fs-fixture").unwrap();

    cmd.current_dir(tree.path()).arg("-t").arg("-t");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("tempdir_project"));
}
