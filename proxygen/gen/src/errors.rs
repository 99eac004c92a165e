//! Error types for the proxy generator.

use proxygen_define::DefineError;
use thiserror::Error;

/// Errors that can occur while generating or removing client proxies.
///
/// Variants up to and including [`GeneratorError::ConfigError`] are usage
/// errors: the invocation itself is wrong and nothing was generated.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Working directory does not exist
    #[error("Specified directory does not exist: {0}")]
    WorkDirectoryNotFound(String),

    /// No client project file in the working directory
    #[error(
        "No project file found in '{0}'. The working directory must have a HttpApi.Client project file."
    )]
    ProjectFileNotFound(String),

    /// More than one client project file in the working directory
    #[error("Expected exactly one HttpApi.Client project file in '{directory}', found: {}", .candidates.join(", "))]
    AmbiguousProjectFile {
        directory: String,
        candidates: Vec<String>,
    },

    /// The project file declares no target framework
    #[error("Could not read <TargetFramework> from project file '{0}'")]
    TargetFrameworkNotFound(String),

    /// The project file is not well-formed XML
    #[error("Failed to parse project file '{path}': {source}")]
    ProjectXml {
        path: String,
        #[source]
        source: quick_xml::Error,
    },

    /// The project file exists but could not be read as text
    #[error("Failed to read project file '{path}': {source}")]
    ProjectFileUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The client assembly's startup module could not be resolved
    #[error("Could not resolve the startup module: {0}")]
    StartupModule(#[from] DefineError),

    /// The API description has no module with the requested name
    #[error("Module '{module}' not found in the API description. Available modules: {}", .available.join(", "))]
    ModuleNotFound {
        module: String,
        available: Vec<String>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to read the client assembly metadata index
    #[error("Failed to read assembly metadata '{path}': {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be decoded
    #[error("Failed to decode JSON from '{origin}': {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// An action descriptor could not be embedded into generated code
    #[error("Failed to serialize action '{action}': {source}")]
    Serialize {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API description request failed
    #[error("Failed to fetch the API description: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered the API description request with an error
    #[error("API description request to '{url}' failed with HTTP {status}: {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    /// Failed to read an input file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to delete the output folder
    #[error("Failed to remove '{path}': {source}")]
    RemoveError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Returns `true` for errors caused by how the generator was invoked.
    ///
    /// Usage errors abort a run before anything is fetched or written.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::WorkDirectoryNotFound(_)
                | Self::ProjectFileNotFound(_)
                | Self::AmbiguousProjectFile { .. }
                | Self::TargetFrameworkNotFound(_)
                | Self::ProjectXml { .. }
                | Self::ProjectFileUnreadable { .. }
                | Self::StartupModule(_)
                | Self::ModuleNotFound { .. }
                | Self::ConfigError(_)
        )
    }
}
