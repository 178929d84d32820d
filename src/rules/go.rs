#![forbid(unsafe_code)]

//! Detectors over Go syntax trees

pub mod dependency_direction;
pub mod duplicate_constant;
pub mod error_demote;
pub mod type_assertion;

pub use dependency_direction::{DependencyDirectionMatcher, DependencyLayer, default_layers};
pub use duplicate_constant::DuplicateConstantMatcher;
pub use error_demote::ErrorDemoteMatcher;
pub use type_assertion::TypeAssertionMatcher;
