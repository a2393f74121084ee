//! Shared test utilities for E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let mut gate = mockito::Server::new();
//!     let fixture = TestFixture::new();
//!     fixture.command(&gate).args(["application", "save"]).assert().failure();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use mockito::Matcher;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::entities;
    #[allow(unused_imports)]
    pub use super::gate;
    pub use super::TestFixture;
}

/// Entity documents used as `--file` or stdin input.
#[allow(dead_code)]
pub mod entities {
    /// A complete application definition.
    pub const APPLICATION: &str = r#"{
  "name": "billing",
  "email": "billing-team@example.com",
  "description": "from file",
  "cloudProviders": "kubernetes"
}"#;

    /// A complete project definition.
    pub const PROJECT: &str = r#"{
  "name": "platform",
  "email": "platform-team@example.com",
  "config": {"applications": ["billing", "payments"]}
}"#;

    /// A document that is not a JSON object.
    pub const NOT_AN_OBJECT: &str = r#"["billing"]"#;
}

/// Helpers for scripting a mock Gate server.
#[allow(dead_code)]
pub mod gate {
    use mockito::{Mock, Server};

    /// Task reference returned by [`accept_task`].
    pub const TASK_REF: &str = "/tasks/01TASK";

    /// Mock `POST /tasks` answering with [`TASK_REF`].
    pub fn accept_task(server: &mut Server) -> Mock {
        server
            .mock("POST", "/tasks")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"ref": "{}"}}"#, TASK_REF))
            .create()
    }

    /// Mock `GET /tasks/01TASK` reporting `status`, expected `hits` times.
    pub fn task_status(server: &mut Server, status: &str, hits: usize) -> Mock {
        server
            .mock("GET", "/tasks/01TASK")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"id": "01TASK", "name": "createApplication", "status": "{}"}}"#,
                status
            ))
            .expect(hits)
            .create()
    }

    /// Mock `GET /tasks/01TASK` that must never be hit.
    pub fn no_status_checks(server: &mut Server) -> Mock {
        server.mock("GET", "/tasks/01TASK").expect(0).create()
    }
}

/// A test fixture that provides a temporary directory with an empty spin
/// config, so tests never pick up the developer's `~/.spin/config`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty config file.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("config")
            .write_str("")
            .expect("Failed to write config file");
        Self { temp_dir }
    }

    /// Replace the config file contents.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config")
    }

    /// Create a command with no Gate endpoint configured.
    pub fn bare_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("spin");
        cmd.current_dir(self.path())
            .env("SPIN_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("SPIN_GATE_ENDPOINT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Create a command pointed at the given mock Gate server.
    pub fn command(&self, server: &mockito::Server) -> assert_cmd::Command {
        let mut cmd = self.bare_command();
        cmd.env("SPIN_GATE_ENDPOINT", server.url());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
