//! Test utilities for odhlint integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// A function wrapper so statement-level snippets parse as a Go file
pub fn go_func(body: &str) -> String {
    format!("package main\n\nfunc run() error {{\n{}\n\treturn nil\n}}\n", body)
}

/// The errordemote shape: the else branch only logs the error
pub const DEMOTED_ERROR: &str = r#"	if value, err := getConfig(ctx); err == nil {
		config.Value = value
	} else {
		log.Info("couldn't get config", "error", err)
	}"#;

/// Same shape, but the error is propagated
pub const RETURNED_ERROR: &str = r#"	if value, err := getConfig(ctx); err == nil {
		config.Value = value
	} else {
		log.Info("couldn't get config", "error", err)
		return err
	}"#;

/// Minimal CSV manifest with the given spec body (indented two spaces)
pub fn csv_manifest(name: &str, spec: &str) -> String {
    let mut manifest = format!(
        "apiVersion: operators.coreos.com/v1alpha1\nkind: ClusterServiceVersion\nmetadata:\n  name: {}\nspec:\n",
        name
    );
    for line in spec.lines() {
        manifest.push_str("  ");
        manifest.push_str(line);
        manifest.push('\n');
    }
    manifest
}

/// Manifest of an arbitrary kind with the given body after `metadata`
pub fn resource_manifest(api_version: &str, kind: &str, name: &str, body: &str) -> String {
    format!(
        "apiVersion: {}\nkind: {}\nmetadata:\n  name: {}\n{}",
        api_version, kind, name, body
    )
}

/// On-disk bundle under a temporary directory
pub struct BundleFixture {
    pub dir: TempDir,
}

impl BundleFixture {
    /// An empty bundle with a `manifests/` directory
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("manifests")).unwrap();
        Self { dir }
    }

    /// A directory with no `manifests/` at all
    pub fn without_manifests() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest(self, file: &str, content: &str) -> Self {
        write_file(self.dir.path(), &format!("manifests/{}", file), content);
        self
    }

    pub fn annotations(self, content: &str) -> Self {
        write_file(self.dir.path(), "metadata/annotations.yaml", content);
        self
    }

    /// Annotations declaring `channels` and, optionally, a default channel
    pub fn channels(self, channels: &str, default: Option<&str>) -> Self {
        let mut content = format!(
            "annotations:\n  operators.operatorframework.io.bundle.package.v1: example-operator\n  operators.operatorframework.io.bundle.channels.v1: {}\n",
            channels
        );
        if let Some(default) = default {
            content.push_str(&format!(
                "  operators.operatorframework.io.bundle.channel.default.v1: {}\n",
                default
            ));
        }
        self.annotations(&content)
    }
}

/// A bundle that passes every builtin manifest rule
pub fn clean_bundle() -> BundleFixture {
    BundleFixture::new()
        .manifest(
            "example.clusterserviceversion.yaml",
            &csv_manifest(
                "example-operator.v1.0.0",
                "version: 1.0.0\nminKubeVersion: 1.25.0\ninstallModes:\n  - type: AllNamespaces\n    supported: true\n",
            ),
        )
        .channels("stable,fast", Some("stable"))
}
