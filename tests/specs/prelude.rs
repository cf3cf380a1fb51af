//! Helpers for the black-box behavior tests.
//!
//! Provides a small DSL for testing rw CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// An address nothing listens on; connections are refused immediately.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Returns the path to a binary, checking the llvm-cov target directory first.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // Resolve relative to the test binary when CARGO_MANIFEST_DIR points at
    // a different target directory.
    assert_cmd::cargo::cargo_bin(name)
}

/// Create a CLI builder for rw commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
///
/// Every command runs with its own state directory and config path so the
/// user's environment never leaks in.
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    home: TempDir,
}

impl CliBuilder {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let envs = vec![
            (
                "RW_STATE_DIR".into(),
                home.path().join("state").to_string_lossy().into(),
            ),
            (
                "RW_CONFIG".into(),
                home.path().join("config.toml").to_string_lossy().into(),
            ),
            ("NO_COLOR".into(), "1".into()),
        ];
        Self {
            args: Vec::new(),
            envs,
            home,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Write the config file this command reads
    pub fn config(self, content: &str) -> Self {
        std::fs::write(self.home.path().join("config.toml"), content).unwrap();
        self
    }

    /// Path of the log file written by this command
    pub fn log_path(&self) -> PathBuf {
        self.home.path().join("state/rw.log")
    }

    /// Build the command without running it
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(binary_path("rw"));
        cmd.args(&self.args);

        for var in ["RW_API_URL", "RW_API_TOKEN", "RW_POLL_MS", "RW_LOG", "COLOR"] {
            cmd.env_remove(var);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    fn output(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        RunAssert {
            output,
            _home: self.home,
        }
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let run = self.output();
        assert!(
            run.output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let run = self.output();
        assert!(
            !run.output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
    _home: TempDir,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert the process exit code.
    pub fn code(self, expected: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(expected),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// Prefer this for output formats.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout contains substring.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Parse stdout as JSON.
    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).expect("stdout should be JSON")
    }
}
