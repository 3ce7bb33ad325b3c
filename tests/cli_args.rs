//! Integration tests for the command-line surface
//!
//! Drives the compiled binary for the argument and credential-check paths
//! that run before any network call.

use std::process::Command;
use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_do-inventory"))
        .args(args)
        .output()
        .expect("Failed to execute do-inventory")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("do-inventory"), "Help should mention the binary");
    assert!(stdout.contains("--list"), "Help should mention --list");
    assert!(stdout.contains("--host"), "Help should mention --host");
    assert!(
        stdout.contains("--refresh-cache"),
        "Help should mention --refresh-cache"
    );
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
}

#[test]
fn test_missing_credentials_is_fatal_before_any_network_call() {
    // Cleared environment and an empty working directory: no settings file,
    // no env vars, no credential flags.
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = Command::new(env!("CARGO_BIN_EXE_do-inventory"))
        .env_clear()
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute do-inventory");

    assert!(
        !output.status.success(),
        "Expected missing credentials to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("client_id") && stderr.contains("api_key"),
        "Should name the missing credential fields: {}",
        stderr
    );
    assert!(
        stderr.contains("DIGITALOCEAN_CLIENT_ID"),
        "Should name the environment variable alternative: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--no-such-flag"]);
    assert!(!output.status.success(), "Expected unknown flag to fail");
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for argument handling that don't require running the binary

    use clap::Parser;
    use do_inventory::cli::{Cli, Mode};
    use do_inventory::config::{EnvSettings, FileSettings, Settings};

    #[test]
    fn test_cli_no_args_is_list_mode() {
        let cli = Cli::parse_from(["do-inventory"]);
        assert_eq!(cli.mode(), Mode::List);
    }

    #[test]
    fn test_cli_host_selects_host_mode() {
        let cli = Cli::parse_from(["do-inventory", "--host", "10.0.0.1"]);
        assert_eq!(cli.mode(), Mode::Host("10.0.0.1".to_string()));
    }

    #[test]
    fn test_argument_credentials_take_precedence() {
        let cli = Cli::parse_from(["do-inventory", "--client-id", "arg-id", "--api-key", "arg-key"]);
        let file = FileSettings {
            client_id: Some("file-id".to_string()),
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };
        let env = EnvSettings {
            client_id: Some("env-id".to_string()),
            api_key: Some("env-key".to_string()),
        };

        let settings = Settings::resolve(file, env, &cli);
        let credentials = settings.credentials().expect("Credentials should resolve");

        assert_eq!(credentials.client_id, "arg-id");
        assert_eq!(credentials.api_key, "arg-key");
    }

    #[test]
    fn test_missing_credentials_resolve_to_error() {
        let cli = Cli::parse_from(["do-inventory"]);
        let settings = Settings::resolve(FileSettings::default(), EnvSettings::default(), &cli);
        assert!(settings.credentials().is_err());
    }
}
