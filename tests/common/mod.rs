#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// Stands in for `adb`: appends its argv to `$FAKE_ADB_LOG` and answers the
/// handful of queries the tool reads back.
const FAKE_ADB: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$FAKE_ADB_LOG"
if [ -n "$FAKE_ADB_FAIL_ON" ]; then
  case "$*" in
    *"$FAKE_ADB_FAIL_ON"*) echo "error: $FAKE_ADB_FAIL_ON rejected" >&2; exit 1 ;;
  esac
fi
case "$1" in
  devices)
    echo "List of devices attached"
    if [ -z "$FAKE_ADB_OFFLINE" ]; then
      printf 'emulator-5554\tdevice\n'
    fi
    ;;
  shell)
    shift
    case "$*" in
      "getprop ro.product.brand") echo "${FAKE_ADB_BRAND:-google}" ;;
      "getprop ro.product.model") echo "Pixel Test" ;;
      "getprop ro.build.version.release") echo "14" ;;
      "pm list packages -3") printf '%s\n' "$FAKE_ADB_PACKAGES" ;;
      "dumpsys battery") printf 'Current Battery Service state:\n  level: 81\n' ;;
    esac
    ;;
esac
exit 0
"#;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub adb: PathBuf,
    pub log: PathBuf,
    pub brand: String,
    pub packages: Vec<String>,
    pub offline: bool,
    pub fail_on: Option<String>,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let bin = tmp.path().join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        let adb = bin.join("adb");
        fs::write(&adb, FAKE_ADB).expect("write fake adb");
        fs::set_permissions(&adb, fs::Permissions::from_mode(0o755)).expect("chmod fake adb");

        let log = tmp.path().join("adb.log");
        Self {
            _tmp: tmp,
            home,
            adb,
            log,
            brand: "google".to_string(),
            packages: vec![],
            offline: false,
            fail_on: None,
        }
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.brand = brand.to_string();
        self
    }

    pub fn with_packages(mut self, packages: &[&str]) -> Self {
        self.packages = packages.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Make every adb call whose argv contains `needle` exit 1 with stderr only.
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.fail_on = Some(needle.to_string());
        self
    }

    pub fn cmd(&self) -> Command {
        let listing: Vec<String> = self.packages.iter().map(|p| format!("package:{p}")).collect();
        let mut cmd = cargo_bin_cmd!("droidsave");
        cmd.env("HOME", &self.home)
            .env("DROIDSAVE_ADB", &self.adb)
            .env("FAKE_ADB_LOG", &self.log)
            .env("FAKE_ADB_BRAND", &self.brand)
            .env("FAKE_ADB_PACKAGES", listing.join("\n"))
            .env_remove("RUST_LOG");
        if self.offline {
            cmd.env("FAKE_ADB_OFFLINE", "1");
        } else {
            cmd.env_remove("FAKE_ADB_OFFLINE");
        }
        match &self.fail_on {
            Some(needle) => cmd.env("FAKE_ADB_FAIL_ON", needle),
            None => cmd.env_remove("FAKE_ADB_FAIL_ON"),
        };
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn fail_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("error json output")
    }

    /// Every `adb` invocation so far, one argv per line.
    pub fn adb_log(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn whitelist_path(&self) -> PathBuf {
        self.home.join(".config/droidsave/whitelist.txt")
    }
}
