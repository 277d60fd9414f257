use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TITLE_LINE: &str = "0123456789abcdef0123456789abcdef=fedcba9876543210fedcba9876543210";

struct TestEnv {
    _tmp: TempDir,
    source: PathBuf,
    keys: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let source = tmp.path().join("source");
        fs::create_dir_all(&source).expect("create source dir");
        let keys = tmp.path().join("keys");
        Self {
            _tmp: tmp,
            source,
            keys,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("skyline-keys").unwrap();
        cmd.arg("--keys-dir").arg(&self.keys).env_remove("RUST_LOG");
        cmd
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.source.join(name);
        fs::write(&path, contents).expect("write source file");
        path
    }

    fn installed(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.keys.join(name)).ok()
    }
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn import_directory() {
    let env = TestEnv::new();
    env.write("title.keys", &format!("; comment\n{}\n", TITLE_LINE));
    env.write("prod.keys", "master_key_00 = 00ff\n");
    env.write("readme.txt", "hello");

    env.cmd()
        .args(["import", path_arg(&env.source)])
        .assert()
        .success()
        .stdout(contains("title_keys"))
        .stdout(contains("prod_keys"))
        .stdout(contains("readme.txt").not());

    assert_eq!(env.installed("title.keys").unwrap(), format!("{}\n", TITLE_LINE));
    assert_eq!(env.installed("prod.keys").unwrap(), "master_key_00=00ff\n");
}

#[test]
fn import_directory_with_corrupt_file_fails() {
    let env = TestEnv::new();
    env.write("prod.keys", "masterkey=00\n");

    env.cmd()
        .args(["import", path_arg(&env.source)])
        .assert()
        .failure()
        .stdout(contains("corrupt"));

    assert!(env.installed("prod.keys").is_none());
}

#[test]
fn import_file_infers_type_from_name() {
    let env = TestEnv::new();
    let file = env.write("prod.keys", "header_key=AA\n");

    env.cmd()
        .args(["import-file", path_arg(&file)])
        .assert()
        .success()
        .stdout(contains("Keys imported successfully"));
}

#[test]
fn import_file_with_unknown_name_needs_type() {
    let env = TestEnv::new();
    let file = env.write("my-keys.txt", "header_key=AA\n");

    env.cmd()
        .args(["import-file", path_arg(&file)])
        .assert()
        .failure()
        .stderr(contains("--type"));

    env.cmd()
        .args(["import-file", path_arg(&file), "--type", "prod"])
        .assert()
        .success();
    assert_eq!(env.installed("prod.keys").unwrap(), "header_key=AA\n");
}

#[test]
fn import_missing_file_reports_not_found() {
    let env = TestEnv::new();
    let missing = env.source.join("title.keys");

    env.cmd()
        .args(["import-file", path_arg(&missing)])
        .assert()
        .failure()
        .stdout(contains("not found"));

    assert!(!env.keys.exists());
}

#[test]
fn install_bundled_json() {
    let env = TestEnv::new();
    env.write("prod.keys", "master_key_00=00\n");

    env.cmd()
        .args([
            "--format",
            "json",
            "install-bundled",
            "--type",
            "prod_keys",
            "--bundled-dir",
            path_arg(&env.source),
        ])
        .assert()
        .success()
        .stdout(contains("\"result\": \"success\""));
}

#[test]
fn install_bundled_without_directory_fails() {
    let env = TestEnv::new();

    env.cmd()
        .args(["install-bundled", "--type", "prod"])
        .assert()
        .failure()
        .stderr(contains("--bundled-dir"));
}

#[test]
fn status_lists_installed_keys() {
    let env = TestEnv::new();
    env.write("prod.keys", "a_b=00\nc_d=11\n");
    env.cmd().args(["import", path_arg(&env.source)]).assert().success();

    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(contains("prod.keys: 2 entries"))
        .stdout(contains("title.keys: not installed"));
}

#[test]
fn json_outputs_share_key_type_names() {
    let env = TestEnv::new();
    env.write("prod.keys", "a_b=00\n");

    env.cmd()
        .args(["--format", "json", "import", path_arg(&env.source)])
        .assert()
        .success()
        .stdout(contains("\"key_type\": \"prod_keys\""));

    env.cmd()
        .args(["--format", "json", "status"])
        .assert()
        .success()
        .stdout(contains("\"key_type\": \"prod_keys\""));
}

#[test]
fn rejects_unknown_key_type() {
    let env = TestEnv::new();
    let file = env.write("prod.keys", "a_b=00\n");

    env.cmd()
        .args(["import-file", path_arg(&file), "--type", "dev_keys"])
        .assert()
        .failure()
        .stderr(contains("Invalid key type"));
}
