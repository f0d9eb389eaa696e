use std::ffi::OsString;
use std::fs;
use std::path::Path;

use tempfile::{TempDir, tempdir};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new(config: &str) -> Self {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("config.toml"), config).expect("write config");
        Self { dir }
    }

    fn data(&self) -> std::path::PathBuf {
        self.dir.path().join("data").join("store.json")
    }

    fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut argv: Vec<OsString> = vec!["tasklist".into()];
        argv.push("--data".into());
        argv.push(self.data().into());
        argv.push("--config".into());
        argv.push(self.dir.path().join("config.toml").into());
        argv.extend(args.iter().map(OsString::from));

        let mut out = Vec::new();
        tasklist_cli::run(argv, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8 output"))
    }

    fn stored(&self, key: &str) -> serde_json::Value {
        let raw = fs::read_to_string(self.data()).expect("store file");
        let map: serde_json::Value = serde_json::from_str(&raw).expect("store json");
        let items = map[key].as_str().expect("stored items");
        serde_json::from_str(items).expect("items json")
    }
}

fn assert_exists(path: &Path) {
    assert!(path.exists(), "{} should exist", path.display());
}

#[test]
fn add_check_delete_purge_roundtrip() {
    let sandbox = Sandbox::new("");

    let out = sandbox.run(&["add", "buy milk"]).expect("add");
    assert!(out.starts_with("added item 1\n"));
    assert!(out.contains("buy milk"));
    assert_exists(&sandbox.data());

    sandbox.run(&["check", "1"]).expect("check");
    let stored = sandbox.stored("todo-20240622");
    assert_eq!(
        stored,
        serde_json::json!([
            {"title": "buy milk", "id": 1, "completedFlag": true, "deleteFlag": false}
        ])
    );

    let out = sandbox.run(&["list", "--filter", "completed"]).expect("list");
    assert!(out.contains("buy milk"));
    let out = sandbox.run(&["list", "--filter", "unchecked"]).expect("list");
    assert_eq!(out, "no items in unchecked\n");

    sandbox.run(&["delete", "1"]).expect("delete");
    let out = sandbox.run(&["list", "--filter", "trash"]).expect("list");
    assert!(out.contains("buy milk"));

    let out = sandbox.run(&["purge"]).expect("purge");
    assert!(out.starts_with("purged 1 items\n"));
    assert_eq!(sandbox.stored("todo-20240622"), serde_json::json!([]));
}

#[test]
fn ids_continue_across_invocations() {
    let sandbox = Sandbox::new("");
    sandbox.run(&["seed"]).expect("seed");
    sandbox.run(&["add", "after seed"]).expect("add");

    let stored = sandbox.stored("todo-20240622");
    let ids: Vec<u64> = stored
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["id"].as_u64().expect("id"))
        .collect();
    assert_eq!(ids, vec![4, 1, 2, 3]);
}

#[test]
fn config_controls_key_and_batch() {
    let sandbox = Sandbox::new(
        r#"
storage_key = "custom-key"
batch_size = 2
batch_title_prefix = "seed-"
"#,
    );
    sandbox.run(&["seed"]).expect("seed");

    let stored = sandbox.stored("custom-key");
    assert_eq!(stored[0]["title"], "seed-1");
    assert_eq!(stored.as_array().map(Vec::len), Some(2));
}

#[test]
fn blank_title_fails_without_writing() {
    let sandbox = Sandbox::new("");
    let err = sandbox.run(&["add", "   "]).expect_err("blank title");
    assert_eq!(err.to_string(), "title must not be empty");
    assert!(!sandbox.data().exists());
}

#[test]
fn malformed_store_is_left_untouched() {
    let sandbox = Sandbox::new("");
    fs::create_dir_all(sandbox.data().parent().expect("parent")).expect("mkdir");
    let corrupt = r#"{"todo-20240622":"[{\"title\":\"x\"}]"}"#;
    fs::write(sandbox.data(), corrupt).expect("write");

    assert!(sandbox.run(&["add", "new"]).is_err());
    assert_eq!(fs::read_to_string(sandbox.data()).expect("read"), corrupt);
}

#[test]
fn store_with_exhausted_ids_is_left_untouched() {
    let sandbox = Sandbox::new("");
    fs::create_dir_all(sandbox.data().parent().expect("parent")).expect("mkdir");
    let stored = r#"{"todo-20240622":"[{\"title\":\"x\",\"id\":18446744073709551615,\"completedFlag\":false,\"deleteFlag\":false}]"}"#;
    fs::write(sandbox.data(), stored).expect("write");

    let err = sandbox.run(&["add", "new"]).expect_err("exhausted ids");
    assert!(format!("{err:#}").contains("no room"));
    assert_eq!(fs::read_to_string(sandbox.data()).expect("read"), stored);
}

#[test]
fn oversized_seed_is_rejected_without_writing() {
    let sandbox = Sandbox::new("");
    assert!(sandbox.run(&["seed", "--count", "100000"]).is_err());
    assert!(!sandbox.data().exists());

    sandbox.run(&["seed", "--count", "5"]).expect("seed");
    assert_eq!(sandbox.stored("todo-20240622").as_array().map(Vec::len), Some(5));
}
