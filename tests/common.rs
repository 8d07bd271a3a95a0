#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SNAPSHOT: &str = "data/employees.json";
pub const LEDGER: &str = "data/pending_requests.json";

/// Temp HOME, config path and filesystem store for one test.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("home")).expect("home");
        fs::create_dir_all(dir.path().join("store").join("data")).expect("store");
        Self { dir }
    }

    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    pub fn store(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn config(&self) -> PathBuf {
        self.dir.path().join("staffledger.conf")
    }

    pub fn out(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(self.config(), yaml).expect("write config");
    }

    pub fn seed_snapshot(&self, json: &str) {
        fs::write(self.store().join(SNAPSHOT), json).expect("seed snapshot");
    }

    pub fn seed_ledger(&self, json: &str) {
        fs::write(self.store().join(LEDGER), json).expect("seed ledger");
    }

    pub fn ledger_exists(&self) -> bool {
        self.store().join(LEDGER).exists()
    }

    pub fn ledger(&self) -> Vec<Value> {
        let raw = fs::read_to_string(self.store().join(LEDGER)).expect("read ledger");
        serde_json::from_str(&raw).expect("ledger json")
    }

    /// The binary, pointed at this sandbox.
    pub fn sl(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("staffledger");
        cmd.env("HOME", self.home())
            .env("APPDATA", self.home())
            .env_remove("GITHUB_TOKEN")
            .env_remove("STAFFLEDGER_PASSPHRASE")
            .arg("--config")
            .arg(self.config())
            .arg("--store")
            .arg(self.store());
        cmd
    }
}

pub fn three_employees() -> &'static str {
    r#"[
        {"employeeId": 5, "name": "Ana Ruiz", "title": "Analyst", "lastUpdated": "2025-09-01T06:00:00"},
        {"employeeId": 6, "name": "Luis Gil", "title": "Manager", "lastUpdated": "2025-09-01T06:00:00"},
        {"employeeId": 9, "name": "Eva Sanz", "title": "Analyst", "lastUpdated": "2025-09-01T06:00:00"}
    ]"#
}
