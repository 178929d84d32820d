#![forbid(unsafe_code)]

//! Manifest rules over a loaded [`Bundle`](crate::bundle::Bundle)
//!
//! IDs are stable and never renumbered; 008 and 009 are unassigned.

pub mod channel_naming;
pub mod conversion_webhook;
pub mod default_channel;
pub mod min_kube_version;
pub mod owned_crd;
pub mod pdb;
pub mod priority_class;
pub mod values;
pub mod webhook_operator_resources;

pub use channel_naming::ChannelNamingRule;
pub use conversion_webhook::{ConversionAllNamespacesRule, ConversionPreserveUnknownFieldsRule};
pub use default_channel::DefaultChannelRule;
pub use min_kube_version::MinKubeVersionRule;
pub use owned_crd::OwnedCrdRule;
pub use pdb::{PdbMaxUnavailableRule, PdbMinAvailableRule};
pub use priority_class::PriorityClassGlobalDefaultRule;
pub use webhook_operator_resources::WebhookOperatorResourcesRule;
