#![forbid(unsafe_code)]

//! In-memory representation of an OLM operator bundle
//!
//! Only the fields the manifest rules inspect are typed. Everything else in a
//! manifest is ignored during decoding, except for generic resources, which
//! keep their whole document as an untyped value tree.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A loaded bundle directory
///
/// Immutable once the loader returns it; rules only read it.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Canonical bundle root
    pub root: PathBuf,

    /// `<root>/manifests`
    pub manifests_path: PathBuf,

    /// `<root>/metadata`
    pub metadata_path: PathBuf,

    /// Parsed `metadata/annotations.yaml`, if present
    pub annotations: Option<BundleAnnotations>,

    /// The ClusterServiceVersion, if the bundle has one
    pub csv: Option<ClusterServiceVersion>,

    pub crds: Vec<CustomResourceDefinition>,

    /// Every other manifest, in load order
    pub resources: Vec<Resource>,
}

impl Bundle {
    /// Generic resources of one kind
    pub fn resources_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Resource> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    /// Looks up a CRD by `<plural>.<group>`
    pub fn crd(&self, full_name: &str) -> Option<&CustomResourceDefinition> {
        self.crds.iter().find(|crd| crd.full_name() == full_name)
    }
}

/// Bundle-level metadata from `metadata/annotations.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleAnnotations {
    pub file: PathBuf,
    pub media_type: Option<String>,
    pub manifests: Option<String>,
    pub metadata: Option<String>,
    pub package: Option<String>,
    pub default_channel: Option<String>,

    /// Comma-separated channel list, trimmed, empty entries dropped
    pub channels: Vec<String>,
}

/// Standard Kubernetes object metadata
///
/// Every scalar decodes as text and null decodes as empty, so
/// `labels: {version: 1.0}` or a bare `containerImage:` annotation loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub namespace: String,
    #[serde(deserialize_with = "lenient_string_map")]
    pub annotations: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient_string_map")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterServiceVersion {
    /// Manifest the CSV was read from
    #[serde(skip)]
    pub file: PathBuf,

    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: CsvSpec,
}

impl ClusterServiceVersion {
    pub fn conversion_webhooks(&self) -> impl Iterator<Item = &WebhookDefinition> {
        self.spec
            .webhook_definitions
            .iter()
            .filter(|w| w.is_conversion())
    }

    /// True if an install mode of this type is declared and supported
    pub fn supports_install_mode(&self, mode: &str) -> bool {
        self.spec
            .install_modes
            .iter()
            .any(|m| m.mode_type == mode && m.supported)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvSpec {
    #[serde(deserialize_with = "scalar_string")]
    pub min_kube_version: Option<String>,

    #[serde(deserialize_with = "scalar_string")]
    pub version: Option<String>,

    pub install_modes: Vec<InstallMode>,

    #[serde(rename = "webhookdefinitions")]
    pub webhook_definitions: Vec<WebhookDefinition>,

    #[serde(rename = "customresourcedefinitions")]
    pub custom_resource_definitions: CrdDescriptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstallMode {
    #[serde(rename = "type")]
    pub mode_type: String,
    pub supported: bool,
}

/// Text of a YAML scalar; `None` for null
fn scalar_text<E: de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Tagged(tagged) => scalar_text((*tagged).value),
        other => Err(E::custom(format!("expected a scalar, found {:?}", other))),
    }
}

/// Accepts any YAML scalar, so `minKubeVersion: 1.25` decodes as `"1.25"`
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
}

/// Like [`scalar_string`], with null decoding as `""`
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_string(deserializer).map(Option::unwrap_or_default)
}

/// A string-to-string map whose keys and values may be any scalar
///
/// A null map decodes as empty and a null value as `""`.
pub(crate) fn lenient_string_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let mapping = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(de::Error::custom(format!(
                "expected a mapping, found {:?}",
                other
            )))
        }
    };

    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = scalar_text::<D::Error>(key)?.unwrap_or_default();
            let value = scalar_text::<D::Error>(value)?.unwrap_or_default();
            Ok((key, value))
        })
        .collect()
}

pub const CONVERSION_WEBHOOK: &str = "ConversionWebhook";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookDefinition {
    /// `ValidatingAdmissionWebhook`, `MutatingAdmissionWebhook` or `ConversionWebhook`
    #[serde(rename = "type")]
    pub webhook_type: String,
    pub generate_name: String,
    pub deployment_name: String,
    pub admission_review_versions: Vec<String>,
    pub failure_policy: Option<String>,
    pub side_effects: Option<String>,
    pub webhook_path: Option<String>,

    #[serde(rename = "conversionCRDs")]
    pub conversion_crds: Vec<String>,

    pub rules: Vec<WebhookRule>,
}

impl WebhookDefinition {
    pub fn is_conversion(&self) -> bool {
        self.webhook_type == CONVERSION_WEBHOOK
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookRule {
    pub api_groups: Vec<String>,
    pub api_versions: Vec<String>,
    pub operations: Vec<String>,
    pub resources: Vec<String>,
}

/// `spec.customresourcedefinitions` of a CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrdDescriptions {
    pub owned: Vec<CrdReference>,
    pub required: Vec<CrdReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrdReference {
    /// `<plural>.<group>`
    pub name: String,
    pub version: String,
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomResourceDefinition {
    #[serde(skip)]
    pub file: PathBuf,

    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: CrdSpec,
}

impl CustomResourceDefinition {
    /// `<plural>.<group>`, the name OLM uses to refer to the CRD
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.spec.names.plural, self.spec.group)
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.spec.versions.iter().any(|v| v.name == version)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrdSpec {
    pub group: String,
    pub names: CrdNames,
    pub versions: Vec<CrdVersion>,

    /// Absent and `false` are both acceptable to OLM
    pub preserve_unknown_fields: Option<bool>,

    pub conversion: Option<CrdConversion>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrdNames {
    pub kind: String,
    pub plural: String,
    pub singular: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrdVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrdConversion {
    pub strategy: String,
}

/// Any manifest that is neither a CSV nor a CRD
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub file: PathBuf,
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,

    /// The entire document
    pub document: Value,
}

impl Resource {
    /// A top-level field of the document
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// A field under `spec`
    pub fn spec_field(&self, key: &str) -> Option<&Value> {
        self.document.get("spec").and_then(|spec| spec.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = r#"
apiVersion: operators.coreos.com/v1alpha1
kind: ClusterServiceVersion
metadata:
  name: example.v1.0.0
  annotations:
    capabilities: Basic Install
spec:
  minKubeVersion: 1.25.0
  installModes:
    - type: OwnNamespace
      supported: true
    - type: AllNamespaces
      supported: false
  webhookdefinitions:
    - type: ConversionWebhook
      generateName: cwidget.example.com
      deploymentName: example-controller
      conversionCRDs: [widgets.example.com]
  customresourcedefinitions:
    owned:
      - name: widgets.example.com
        version: v1
        kind: Widget
  install:
    strategy: deployment
"#;

    #[test]
    fn test_csv_decodes_olm_field_names() {
        let csv: ClusterServiceVersion = serde_yaml::from_str(CSV).unwrap();
        assert_eq!(csv.metadata.name, "example.v1.0.0");
        assert_eq!(csv.spec.min_kube_version.as_deref(), Some("1.25.0"));
        assert_eq!(csv.spec.webhook_definitions.len(), 1);
        assert!(csv.spec.webhook_definitions[0].is_conversion());
        assert_eq!(
            csv.spec.webhook_definitions[0].conversion_crds,
            vec!["widgets.example.com"]
        );
        assert_eq!(csv.spec.custom_resource_definitions.owned[0].kind, "Widget");
        assert_eq!(csv.conversion_webhooks().count(), 1);
        assert!(csv.supports_install_mode("OwnNamespace"));
        assert!(!csv.supports_install_mode("AllNamespaces"));
        assert!(!csv.supports_install_mode("MultiNamespace"));
    }

    #[test]
    fn test_crd_full_name_and_versions() {
        let crd: CustomResourceDefinition = serde_yaml::from_str(
            r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: widgets.example.com
spec:
  group: example.com
  names: {kind: Widget, plural: widgets, singular: widget}
  preserveUnknownFields: false
  versions:
    - {name: v1, served: true, storage: true}
"#,
        )
        .unwrap();
        assert_eq!(crd.full_name(), "widgets.example.com");
        assert!(crd.has_version("v1"));
        assert!(!crd.has_version("v2"));
        assert_eq!(crd.spec.preserve_unknown_fields, Some(false));
    }

    #[test]
    fn test_resource_field_lookup() {
        let document: Value = serde_yaml::from_str(
            "kind: PriorityClass\nglobalDefault: true\nspec:\n  maxUnavailable: 1\n",
        )
        .unwrap();
        let resource = Resource {
            file: PathBuf::from("pc.yaml"),
            api_version: String::new(),
            kind: "PriorityClass".to_string(),
            metadata: Metadata::default(),
            document,
        };
        assert_eq!(resource.field("globalDefault"), Some(&Value::Bool(true)));
        assert!(resource.spec_field("maxUnavailable").is_some());
        assert!(resource.spec_field("missing").is_none());
    }

    #[test]
    fn test_numeric_min_kube_version_is_kept_as_text() {
        let spec: CsvSpec = serde_yaml::from_str("minKubeVersion: 1.25
").unwrap();
        assert_eq!(spec.min_kube_version.as_deref(), Some("1.25"));

        let spec: CsvSpec = serde_yaml::from_str("minKubeVersion:
").unwrap();
        assert_eq!(spec.min_kube_version, None);
    }

    #[test]
    fn test_metadata_scalars_decode_as_text() {
        let metadata: Metadata = serde_yaml::from_str(
            r#"
name: 1234
namespace:
labels:
  version: 1.0
  enabled: true
  3: three
annotations:
  containerImage:
  description: plain
"#,
        )
        .unwrap();
        assert_eq!(metadata.name, "1234");
        assert_eq!(metadata.namespace, "");
        assert_eq!(metadata.labels["version"], "1.0");
        assert_eq!(metadata.labels["enabled"], "true");
        assert_eq!(metadata.labels["3"], "three");
        assert_eq!(metadata.annotations["containerImage"], "");
        assert_eq!(metadata.annotations["description"], "plain");
    }

    #[test]
    fn test_null_metadata_maps_are_empty() {
        let metadata: Metadata = serde_yaml::from_str("labels:\nannotations: ~\n").unwrap();
        assert!(metadata.labels.is_empty());
        assert!(metadata.annotations.is_empty());
    }

    #[test]
    fn test_nested_metadata_value_is_rejected() {
        let result: Result<Metadata, _> = serde_yaml::from_str("labels:\n  app: [a, b]\n");
        assert!(result.is_err());
    }
}
