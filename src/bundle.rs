#![forbid(unsafe_code)]

//! OLM operator bundles: data model and loader

pub mod loader;
pub mod model;

pub use loader::load_bundle;
pub use model::{
    Bundle, BundleAnnotations, ClusterServiceVersion, CrdReference, CustomResourceDefinition,
    InstallMode, Metadata, Resource, WebhookDefinition, WebhookRule,
};
