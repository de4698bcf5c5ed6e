//! TestWorld pattern for running the `acontext` binary in isolation.
//!
//! Each world owns a temp directory used as working directory and as
//! `ACONTEXT_PATH`, so tests never read the developer's real config.

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

/// Isolated environment for CLI runs.
///
/// # Example
/// ```no_run
/// use acontext_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let output = world.run(&["version"]).unwrap();
/// assert!(output.status.success());
/// ```
pub struct TestWorld {
    _temp_dir: TempDir,
    cwd: PathBuf,
    config_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cwd = temp_dir.path().join("work");
        let config_dir = temp_dir.path().join(".acontext");

        std::fs::create_dir_all(&cwd).expect("Failed to create work dir");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            _temp_dir: temp_dir,
            cwd,
            config_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Write `config.toml` into the world's config directory.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.config_dir.join("config.toml"), content)
            .expect("Failed to write config");
        self
    }

    /// Create a directory (relative to the working directory).
    pub fn with_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.cwd.join(relative)).expect("Failed to create dir");
        self
    }

    pub fn command(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("acontext").expect("acontext binary is built");
        cmd.current_dir(&self.cwd)
            .env("ACONTEXT_PATH", &self.config_dir)
            .env_remove("ACONTEXT_LOG")
            .env_remove("ACONTEXT_TELEMETRY_ENDPOINT");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<Output> {
        Ok(self.command().args(args).output()?)
    }
}
