#![forbid(unsafe_code)]

//! Reads a bundle directory into a [`Bundle`]
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   manifests/            required; every *.yaml / *.yml file is read
//!   metadata/
//!     annotations.yaml    optional
//! ```
//!
//! Manifest files are read in file-name order, and documents within a file in
//! order, so the loaded bundle is the same on every platform. Any failure
//! aborts the whole load.

use crate::bundle::model::{
    self, Bundle, BundleAnnotations, ClusterServiceVersion, CustomResourceDefinition, Metadata,
    Resource,
};
use crate::error::LoadError;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFESTS_DIR: &str = "manifests";
pub const METADATA_DIR: &str = "metadata";
pub const ANNOTATIONS_FILE: &str = "annotations.yaml";

const ANNOTATION_MEDIATYPE: &str = "operators.operatorframework.io.bundle.mediatype.v1";
const ANNOTATION_MANIFESTS: &str = "operators.operatorframework.io.bundle.manifests.v1";
const ANNOTATION_METADATA: &str = "operators.operatorframework.io.bundle.metadata.v1";
const ANNOTATION_PACKAGE: &str = "operators.operatorframework.io.bundle.package.v1";
const ANNOTATION_DEFAULT_CHANNEL: &str = "operators.operatorframework.io.bundle.channel.default.v1";
const ANNOTATION_CHANNELS: &str = "operators.operatorframework.io.bundle.channels.v1";

/// Load the bundle rooted at `path`
///
/// # Errors
///
/// - `LoadError::BundleNotFound` if `path` does not exist
/// - `LoadError::ManifestsDirMissing` if `<path>/manifests` is not a directory
/// - `LoadError::Read` / `LoadError::Yaml` naming the file that failed
pub fn load_bundle(path: impl AsRef<Path>) -> Result<Bundle, LoadError> {
    let path = path.as_ref();
    let root = path.canonicalize().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::BundleNotFound(path.to_path_buf())
        } else {
            LoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let manifests_path = root.join(MANIFESTS_DIR);
    if !manifests_path.is_dir() {
        return Err(LoadError::ManifestsDirMissing(manifests_path));
    }
    let metadata_path = root.join(METADATA_DIR);

    debug!("Loading bundle from {}", root.display());

    let mut bundle = Bundle {
        annotations: load_annotations(&metadata_path.join(ANNOTATIONS_FILE))?,
        root,
        manifests_path,
        metadata_path,
        ..Bundle::default()
    };

    for file in manifest_files(&bundle.manifests_path)? {
        load_manifest_file(&mut bundle, &file)?;
    }

    debug!(
        "Loaded bundle: csv={}, crds={}, resources={}",
        bundle.csv.is_some(),
        bundle.crds.len(),
        bundle.resources.len()
    );

    Ok(bundle)
}

#[derive(Debug, Default, Deserialize)]
struct AnnotationsFile {
    #[serde(default, deserialize_with = "model::lenient_string_map")]
    annotations: BTreeMap<String, String>,
}

fn load_annotations(path: &Path) -> Result<Option<BundleAnnotations>, LoadError> {
    if !path.is_file() {
        debug!("No annotations file at {}", path.display());
        return Ok(None);
    }

    let text = read(path)?;
    let value: Value = serde_yaml::from_str(&text).map_err(|source| yaml_error(path, source))?;
    let parsed: AnnotationsFile = if value.is_null() {
        AnnotationsFile::default()
    } else {
        serde_yaml::from_value(value).map_err(|source| yaml_error(path, source))?
    };
    let mut raw = parsed.annotations;

    let mut take = |key: &str| raw.remove(key).filter(|v| !v.trim().is_empty());

    Ok(Some(BundleAnnotations {
        file: path.to_path_buf(),
        media_type: take(ANNOTATION_MEDIATYPE),
        manifests: take(ANNOTATION_MANIFESTS),
        metadata: take(ANNOTATION_METADATA),
        package: take(ANNOTATION_PACKAGE),
        default_channel: take(ANNOTATION_DEFAULT_CHANNEL).map(|c| c.trim().to_string()),
        channels: take(ANNOTATION_CHANNELS)
            .map(|list| split_channels(&list))
            .unwrap_or_default(),
    }))
}

fn split_channels(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

/// `*.yaml` and `*.yml` files directly under `dir`, sorted by name
fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn load_manifest_file(bundle: &mut Bundle, file: &Path) -> Result<(), LoadError> {
    let text = read(file)?;

    for document in serde_yaml::Deserializer::from_str(&text) {
        let value = Value::deserialize(document).map_err(|source| yaml_error(file, source))?;
        if value.is_null() {
            continue;
        }
        add_document(bundle, file, value)?;
    }

    Ok(())
}

/// Route one manifest document by its `kind`
fn add_document(bundle: &mut Bundle, file: &Path, value: Value) -> Result<(), LoadError> {
    let kind = value
        .get("kind")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match kind.as_str() {
        "ClusterServiceVersion" => {
            let mut csv: ClusterServiceVersion =
                serde_yaml::from_value(value).map_err(|source| yaml_error(file, source))?;
            csv.file = file.to_path_buf();
            if let Some(previous) = bundle.csv.replace(csv) {
                debug!(
                    "{} replaces ClusterServiceVersion from {}",
                    file.display(),
                    previous.file.display()
                );
            }
        }
        "CustomResourceDefinition" => {
            let mut crd: CustomResourceDefinition =
                serde_yaml::from_value(value).map_err(|source| yaml_error(file, source))?;
            crd.file = file.to_path_buf();
            bundle.crds.push(crd);
        }
        _ => {
            let metadata = match value.get("metadata") {
                Some(metadata) if !metadata.is_null() => {
                    serde_yaml::from_value::<Metadata>(metadata.clone())
                        .map_err(|source| yaml_error(file, source))?
                }
                _ => Metadata::default(),
            };
            let api_version = value
                .get("apiVersion")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            bundle.resources.push(Resource {
                file: file.to_path_buf(),
                api_version,
                kind,
                metadata,
                document: value,
            });
        }
    }

    Ok(())
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn yaml_error(path: &Path, source: serde_yaml::Error) -> LoadError {
    LoadError::Yaml {
        path: path.to_path_buf(),
        source,
    }
}
