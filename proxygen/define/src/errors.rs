//! Error types for metadata index lookups.

use thiserror::Error;

/// Errors raised while querying an [`AssemblyIndex`](crate::AssemblyIndex).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefineError {
    /// The requested assembly is not part of the index.
    #[error("Assembly '{0}' is not present in the metadata index")]
    AssemblyNotFound(String),

    /// The assembly declares no module type.
    #[error("Assembly '{0}' does not declare a module")]
    NoStartupModule(String),

    /// The assembly declares more than one module type.
    #[error("Assembly '{assembly}' declares more than one module: {}", .modules.join(", "))]
    MultipleStartupModules {
        /// The assembly that was searched.
        assembly: String,
        /// Fully qualified names of every declared module.
        modules: Vec<String>,
    },
}
