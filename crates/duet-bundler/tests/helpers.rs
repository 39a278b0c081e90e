//! Shared test utilities for duet-bundler tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use duet_bundler::{BuildConfiguration, ConfigureOptions, configure};
use tempfile::TempDir;

/// Project root containing the given files (relative paths, empty content)
pub fn project_with(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for file in files {
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, "").expect("write file");
    }
    dir
}

/// Project root with both default entries and the client vendor entry
pub fn full_project() -> TempDir {
    project_with(&[
        "src/client/index.js",
        "src/client/vendor.js",
        "src/server/index.js",
    ])
}

pub fn build(root: &Path, target: &str, mode: &str) -> BuildConfiguration {
    configure(target, mode, &ConfigureOptions::default(), root).expect("valid axes")
}

pub fn build_with(
    root: &Path,
    target: &str,
    mode: &str,
    options: &ConfigureOptions,
) -> BuildConfiguration {
    configure(target, mode, options, root).expect("valid axes")
}

pub const AXES: [(&str, &str); 4] = [
    ("client", "development"),
    ("client", "production"),
    ("server", "development"),
    ("server", "production"),
];
