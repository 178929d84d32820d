#![forbid(unsafe_code)]

//! Rule selection, parallel execution and violation ordering

pub mod executor;
pub mod file_walker;
pub mod selection;

pub use executor::{ExecutionEngine, Report};
pub use file_walker::collect_go_files;
pub use selection::Selection;
