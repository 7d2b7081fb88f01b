//! # ImgRS CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module provides shared utility functions used across the integration
//! test files (`image.rs`, `container.rs`, `reconcile.rs`, ...).
//!
//! Most tests run `imgrs` against a fake container runtime: a small `sh`
//! script that answers the handful of runtime commands ImgRS issues with
//! canned listings, and appends every invocation's arguments to a per-test
//! log file so tests can assert on what was (and was not) run.
//!
//! The script is written once per test binary and shared. Each test gets its
//! own `FakeRuntime` with a private HOME, working directory and call log.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

/// Helper function to create an `assert_cmd::Command` for the compiled `imgrs` binary.
///
/// ## Panics
/// Panics if the `imgrs` binary cannot be found via `Command::cargo_bin`.
pub fn imgrs_cmd() -> Command {
    Command::cargo_bin("imgrs").expect("Failed to find imgrs binary for testing")
}

pub const DIGEST_NEW: &str = "sha256:11507a0e2f5e69d5dfa40a62a1bd7b6ee57e6bcd85c67c9b8431b36fff21c437";
pub const DIGEST_OLD: &str = "sha256:cba06b5736faf67e54b07b561eae94395e774c517a7d910a54369e1263ccfbd4";
/// A well-formed digest no image or container carries.
pub const DIGEST_UNKNOWN: &str = "sha256:0000000000000000000000000000000000000000000000000000000000000000";
pub const LOCAL_NEW: &str = "sha256:380702aa33e4c068bc8edf1e4fa9b1913fffa506366fb12561e5c0816ba05ac8";
pub const LOCAL_OLD: &str = "sha256:71668dbe34b32c43d2a99edd542e22dd4e492d8ea14f5d353e7d72d06a068b3e";
pub const LOCAL_DANGLING: &str = "sha256:4ca2d821beb2180774b4d96011ad6855c4e75d3e628c413c5a8751a6d7cff082";
/// Runs `ubuntu:latest` (DIGEST_NEW), named `web-1`.
pub const CONTAINER_NEW: &str = "d0f631ca1ddba8db3bcfcb9e057cdc98d0379f1bee00e75a545147a27dadd982";
/// Runs the untagged previous build (DIGEST_OLD), named `web-old`.
pub const CONTAINER_OLD: &str = "9c0abe51c6e6655d81de2d044d4fb194931f058c0426c67c7285d8f5657ed64a";

pub const REGISTRY_USER: &str = "deploy";
pub const REGISTRY_SECRET: &str = "s3cret-t0ken";

#[cfg(unix)]
#[allow(unused_imports)]
pub use fake::FakeRuntime;

#[cfg(unix)]
mod fake {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::sync::OnceLock;
    use tempfile::TempDir;

    /// One isolated `imgrs` environment backed by the shared fake runtime script.
    pub struct FakeRuntime {
        pub home: TempDir,
        log: PathBuf,
    }

    impl FakeRuntime {
        pub fn new() -> Self {
            let home = tempfile::tempdir().expect("Failed to create temp HOME");
            let log = home.path().join("runtime-calls.log");
            Self { home, log }
        }

        /// Path of the fake runtime binary.
        pub fn script(&self) -> &'static Path {
            fake_runtime_script()
        }

        /// `imgrs --runtime <fake>` with a clean environment rooted at this runtime's HOME.
        pub fn cmd(&self) -> Command {
            let mut cmd = imgrs_cmd();
            cmd.current_dir(self.home.path())
                .env("HOME", self.home.path())
                .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
                .env("IMGRS_FAKE_LOG", &self.log)
                .env_remove("IMGRS_RUNTIME")
                .env_remove("IMGRS_REGISTRY_TOKEN")
                .env_remove("RUST_LOG")
                .arg("--runtime")
                .arg(self.script());
            cmd
        }

        /// Argument lines of every runtime invocation so far, in order.
        pub fn calls(&self) -> Vec<String> {
            std::fs::read_to_string(&self.log)
                .map(|s| s.lines().map(str::to_string).collect())
                .unwrap_or_default()
        }

        /// Writes `.imgrs.toml` into the working directory.
        pub fn write_project_config(&self, toml: &str) {
            std::fs::write(self.home.path().join(".imgrs.toml"), toml).expect("Failed to write project config");
        }

        /// Writes the user config under this runtime's `XDG_CONFIG_HOME`.
        pub fn write_user_config(&self, toml: &str) {
            let dir = self.home.path().join(".config").join("imgrs");
            std::fs::create_dir_all(&dir).expect("Failed to create user config dir");
            std::fs::write(dir.join("config.toml"), toml).expect("Failed to write user config");
        }
    }

    /// Written once per test binary; every test waits here before spawning anything.
    fn fake_runtime_script() -> &'static Path {
        static SCRIPT: OnceLock<PathBuf> = OnceLock::new();
        SCRIPT.get_or_init(|| {
            let dir = std::env::temp_dir().join(format!("imgrs-fake-runtime-{}", std::process::id()));
            std::fs::create_dir_all(&dir).expect("Failed to create fake runtime dir");
            let path = dir.join("docker");
            std::fs::write(&path, script_body()).expect("Failed to write fake runtime");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake runtime executable");
            path
        })
    }

    fn image_listing() -> String {
        let rows = [
            ("REPOSITORY", "TAG", "DIGEST", "IMAGE ID", "CREATED", "SIZE"),
            ("ubuntu", "latest", DIGEST_NEW, LOCAL_NEW, "4 weeks ago", "77.8MB"),
            ("ubuntu", "<none>", DIGEST_OLD, LOCAL_OLD, "3 months ago", "77.8MB"),
            ("<none>", "<none>", "<none>", LOCAL_DANGLING, "5 months ago", "12.1MB"),
        ];
        rows.iter()
            .map(|(repo, tag, digest, id, created, size)| {
                format!("{:<12}{:<10}{:<75}{:<75}{:<16}{}\n", repo, tag, digest, id, created, size)
            })
            .collect()
    }

    fn container_listing() -> String {
        let old_image = &LOCAL_OLD["sha256:".len().."sha256:".len() + 12];
        let rows = [
            ("CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS", "NAMES"),
            (CONTAINER_NEW, "ubuntu:latest", "\"sleep infinity\"", "2 hours ago", "Up 2 hours", "80/tcp", "web-1"),
            (CONTAINER_OLD, old_image, "\"sleep infinity\"", "3 days ago", "Exited (0) 2 days ago", "", "web-old"),
        ];
        rows.iter()
            .map(|(id, image, command, created, status, ports, names)| {
                format!(
                    "{:<67}{:<17}{:<20}{:<15}{:<25}{:<10}{}\n",
                    id, image, command, created, status, ports, names
                )
            })
            .collect()
    }

    fn inspect_json(id: &str, local_id: &str, name: &str, status: &str) -> String {
        format!(
            r#"[{{"Id": "{}", "Image": "{}", "Name": "/{}", "State": {{"Status": "{}"}}}}]"#,
            id, local_id, name, status
        )
    }

    fn script_body() -> String {
        format!(
            r#"#!/bin/sh
if [ -n "$IMGRS_FAKE_LOG" ]; then
  printf '%s\n' "$*" >> "$IMGRS_FAKE_LOG"
fi
case "$*" in
  "images --digests --no-trunc")
    cat <<'LISTING'
{images}LISTING
    ;;
  "container ls --all --no-trunc")
    cat <<'LISTING'
{containers}LISTING
    ;;
  "container inspect {c_new}")
    echo '{inspect_new}'
    ;;
  "container inspect {c_old}")
    echo '{inspect_old}'
    ;;
  "container inspect "*)
    echo "Error: No such container: $3" >&2
    exit 1
    ;;
  "login ghcr.io -u {user} --password-stdin")
    read -r secret
    if [ "$secret" = "{secret}" ]; then
      echo "Login Succeeded"
    else
      echo "Error response from daemon: unauthorized: incorrect username or password" >&2
      exit 1
    fi
    ;;
  "pull missing"*)
    echo "Error response from daemon: manifest unknown" >&2
    exit 1
    ;;
  "pull "*)
    echo "Status: Downloaded newer image for $2"
    ;;
  "rmi {local_old}"|"rmi {local_new}")
    echo "Deleted: $2"
    ;;
  "rmi "*)
    echo "Error response from daemon: No such image: $2" >&2
    exit 1
    ;;
  *)
    echo "fake runtime: unsupported command: $*" >&2
    exit 125
    ;;
esac
"#,
            images = image_listing(),
            containers = container_listing(),
            c_new = CONTAINER_NEW,
            c_old = CONTAINER_OLD,
            inspect_new = inspect_json(CONTAINER_NEW, LOCAL_NEW, "web-1", "running"),
            inspect_old = inspect_json(CONTAINER_OLD, LOCAL_OLD, "web-old", "exited"),
            user = REGISTRY_USER,
            secret = REGISTRY_SECRET,
            local_old = LOCAL_OLD,
            local_new = LOCAL_NEW,
        )
    }
}
