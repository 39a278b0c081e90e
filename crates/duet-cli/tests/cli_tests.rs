//! End-to-end tests of the `duet` binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn duet_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("duet");
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Project with client and server entries.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    for file in [
        "src/client/index.js",
        "src/client/vendor.js",
        "src/server/index.js",
    ] {
        let path = temp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    temp
}

fn configure_json(root: &Path, args: &[&str]) -> serde_json::Value {
    let output = duet_cmd()
        .arg("configure")
        .args(args)
        .arg("--root")
        .arg(root)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn help_lists_commands() {
    duet_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("classify"));
}

#[test]
fn configure_prints_production_client_json() {
    let temp = project();
    let config = configure_json(temp.path(), &["-t", "client", "-m", "production"]);

    assert_eq!(config["target"], "web");
    assert_eq!(config["output"]["filename"], "[name]-[chunkhash].js");
    assert_eq!(config["entry"]["main"][0], "./src/client/index.js");
    assert_eq!(config["entry"]["vendor"][0], "./src/client/vendor.js");
    assert_eq!(config["bail"], true);

    let kinds: Vec<_> = config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|plugin| plugin["kind"].as_str().unwrap().to_string())
        .collect();
    assert!(kinds.contains(&"style-extraction".to_string()));
    assert!(!kinds.contains(&"hot-module-replacement".to_string()));
}

#[test]
fn configure_reads_duet_toml_and_flags() {
    let temp = project();
    fs::write(
        temp.path().join("duet.toml"),
        "[env]\nserver_bundle_output_path = \"./dist/server\"\n\n[options]\nlightBundle = false\n",
    )
    .unwrap();

    let config = configure_json(temp.path(), &["-t", "server", "-m", "development"]);
    assert_eq!(config["externals"]["lightBundle"], false);
    assert!(
        config["output"]["path"]
            .as_str()
            .unwrap()
            .ends_with("dist/server")
    );

    let config = configure_json(
        temp.path(),
        &["-t", "server", "-m", "development", "--light-bundle", "true"],
    );
    assert_eq!(config["externals"]["lightBundle"], true);
}

#[test]
fn environment_overrides_settings() {
    let temp = project();
    let output = duet_cmd()
        .env("CLIENT_DEVSERVER_PORT", "9000")
        .args(["configure", "-t", "client", "-m", "development", "--root"])
        .arg(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["output"]["publicPath"], "http://localhost:9000/client/");
}

#[test]
fn configure_summary_format() {
    let temp = project();
    duet_cmd()
        .args(["configure", "-t", "server", "-m", "production", "--format", "summary", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("server production build"))
        .stdout(predicate::str::contains("externals: full bundle"))
        .stdout(predicate::str::contains("asset-stub"))
        .stderr(predicate::str::contains("✓ Configured server production build"));
}

#[test]
fn invalid_mode_is_reported() {
    let temp = project();
    duet_cmd()
        .args(["configure", "-t", "client", "-m", "staging", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            r#"Invalid mode "staging", expected one of development|production"#,
        ));
}

#[test]
fn missing_target_is_reported() {
    duet_cmd()
        .args(["configure", "-m", "production"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#"You must provide a "target""#));
}

#[test]
fn invalid_settings_are_rejected() {
    let temp = project();
    duet_cmd()
        .env("CLIENT_BUNDLE_HTTP_PATH", "client/")
        .args(["configure", "-t", "client", "-m", "production", "--root"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("client_bundle_http_path"));
}

#[test]
fn missing_root_is_reported() {
    duet_cmd()
        .args(["configure", "-t", "client", "-m", "production", "--root", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project root not found"));
}

#[test]
fn classify_server_specifiers() {
    let temp = project();
    duet_cmd()
        .args([
            "classify",
            "fs",
            "./utils",
            "express",
            "some-package/icon.svg",
            "-t",
            "server",
            "-m",
            "production",
            "--root",
        ])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fs → external (builtin)"))
        .stdout(predicate::str::contains("./utils → bundle (relative)"))
        .stdout(predicate::str::contains("express → external (unsafe)"))
        .stdout(predicate::str::contains(
            "some-package/icon.svg → bundle (loader-asset)",
        ));
}

#[test]
fn classify_client_bundles_everything() {
    let temp = project();
    duet_cmd()
        .args(["classify", "fs", "-t", "client", "-m", "development", "--root"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fs → bundle (full-bundle)"));
}
