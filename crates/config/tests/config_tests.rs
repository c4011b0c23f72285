//! Tests for the `trellis-config` loader.
//!
//! These exercise default handling, file discovery via `TRELLIS_CONFIG`,
//! and environment overrides. Environment-touching tests are serialized.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use trellis_config::load;

const ENV_VARS_TO_RESET: &[&str] = &[
    "TRELLIS_CONFIG",
    "TRELLIS__DATABASE__URL",
    "TRELLIS__DATABASE__MAX_CONNECTIONS",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        let mut ctx = Self {
            vars: Vec::new(),
            original_dir: None,
        };
        for key in ENV_VARS_TO_RESET {
            ctx.remove_var(key);
        }
        ctx
    }

    fn set_var(&mut self, key: &str, value: &str) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &std::path::Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn defaults_apply_without_file_or_environment() {
    let temp_dir = TempDir::new().unwrap();
    let mut ctx = TestContext::new();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("defaults should load");

    assert_eq!(config.database.url, "sqlite://trellis.db");
    assert_eq!(config.database.max_connections, 10);
}

#[test]
#[serial]
fn explicit_config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[database]\nurl = \"sqlite://custom.db\"\nmax_connections = 3\n",
    )
    .unwrap();

    let mut ctx = TestContext::new();
    ctx.set_var("TRELLIS_CONFIG", config_path.to_str().unwrap());

    let config = load().expect("explicit file should load");

    assert_eq!(config.database.url, "sqlite://custom.db");
    assert_eq!(config.database.max_connections, 3);
}

#[test]
#[serial]
fn config_file_is_discovered_in_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("trellis.toml"),
        "[database]\nurl = \"sqlite://discovered.db\"\n",
    )
    .unwrap();

    let mut ctx = TestContext::new();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("discovered file should load");

    assert_eq!(config.database.url, "sqlite://discovered.db");
    // Keys the file omits keep their defaults.
    assert_eq!(config.database.max_connections, 10);
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("trellis.toml"),
        "[database]\nurl = \"sqlite://from-file.db\"\n",
    )
    .unwrap();

    let mut ctx = TestContext::new();
    ctx.set_current_dir(temp_dir.path());
    ctx.set_var("TRELLIS__DATABASE__URL", "sqlite://from-env.db");
    ctx.set_var("TRELLIS__DATABASE__MAX_CONNECTIONS", "2");

    let config = load().expect("environment overrides should load");

    assert_eq!(config.database.url, "sqlite://from-env.db");
    assert_eq!(config.database.max_connections, 2);
}

#[test]
#[serial]
fn malformed_config_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[database\nurl = ").unwrap();

    let mut ctx = TestContext::new();
    ctx.set_var("TRELLIS_CONFIG", config_path.to_str().unwrap());

    assert!(load().is_err());
}
