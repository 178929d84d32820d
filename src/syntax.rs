#![forbid(unsafe_code)]

//! Go syntax trees and the matching protocol shared by all source detectors

pub mod pattern;
pub mod source;
pub mod suppression;

pub use pattern::{NodeMatcher, PatternRule};
pub use source::{Comment, SourceFile};
pub use suppression::SuppressionPolicy;
