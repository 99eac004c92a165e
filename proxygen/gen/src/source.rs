//! Inputs the generator consumes.
//!
//! - [`ApiDescriptionSource`]: where the server's API description comes from.
//!   [`HttpApiDescriptionSource`] asks a running server,
//!   [`FileApiDescriptionSource`] reads a saved snapshot.
//! - [`AssemblyReader`]: how the client project's build output is inspected.
//!   [`JsonAssemblyReader`] reads the metadata index written next to the
//!   assembly.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use proxygen_define::{ApplicationApiDescriptionModel, AssemblyIndex};
use tracing::{Span, instrument};
use url::Url;

use crate::errors::GeneratorError;
use crate::project::metadata_path;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path, relative to the server root, of the API description endpoint.
pub const API_DEFINITION_PATH: &str = "api/abp/api-definition";

/// Supplies the server's API description.
///
/// ## Native Async Traits
///
/// Uses native async functions in traits; no `async-trait` crate is needed.
pub trait ApiDescriptionSource: Send + Sync {
    /// Fetches the API description for a run targeting `module`.
    ///
    /// ## Errors
    ///
    /// Any failure is fatal to the run; nothing is retried.
    fn fetch(
        &self,
        module: &str,
    ) -> impl std::future::Future<Output = Result<ApplicationApiDescriptionModel, GeneratorError>> + Send;
}

/// Fetches the API description from a running server.
#[derive(Debug, Clone)]
pub struct HttpApiDescriptionSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpApiDescriptionSource {
    /// Creates a source for the server at `base_url` with the default timeout.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, GeneratorError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a source with an explicit request timeout.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: api_definition_url(&base_url)?,
        })
    }
}

/// Joins [`API_DEFINITION_PATH`] onto `base_url`, keeping any path prefix.
///
/// ```
/// use url::Url;
/// use proxygen_gen::source::api_definition_url;
///
/// let url = api_definition_url(&Url::parse("https://localhost:44300/gateway").unwrap()).unwrap();
/// assert_eq!(url.as_str(), "https://localhost:44300/gateway/api/abp/api-definition");
/// ```
pub fn api_definition_url(base_url: &Url) -> Result<Url, GeneratorError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(API_DEFINITION_PATH)
        .map_err(|e| GeneratorError::ConfigError(format!("invalid server URL '{}': {e}", base_url)))
}

impl ApiDescriptionSource for HttpApiDescriptionSource {
    #[instrument(
        name = "fetch_api_description",
        skip(self),
        fields(
            http.url = %self.endpoint,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn fetch(&self, module: &str) -> Result<ApplicationApiDescriptionModel, GeneratorError> {
        let response = self.client.get(self.endpoint.clone()).send().await?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(GeneratorError::HttpStatus {
                url: self.endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let model = serde_json::from_slice(&body).map_err(|source| GeneratorError::Json {
            origin: self.endpoint.to_string(),
            source,
        })?;

        tracing::debug!("API description fetched");
        Ok(model)
    }
}

/// Reads the API description from a JSON file saved from a server.
#[derive(Debug, Clone)]
pub struct FileApiDescriptionSource {
    path: PathBuf,
}

impl FileApiDescriptionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ApiDescriptionSource for FileApiDescriptionSource {
    async fn fetch(&self, module: &str) -> Result<ApplicationApiDescriptionModel, GeneratorError> {
        tracing::debug!(path = %self.path.display(), module, "reading API description snapshot");

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| GeneratorError::ReadError {
                path: self.path.display().to_string(),
                source,
            })?;

        serde_json::from_str(&json).map_err(|source| GeneratorError::Json {
            origin: self.path.display().to_string(),
            source,
        })
    }
}

/// Inspects the client project's build output.
pub trait AssemblyReader {
    /// Loads the metadata index describing the assembly at `assembly_path`
    /// and everything it references.
    fn read(&self, assembly_path: &Path) -> Result<AssemblyIndex, GeneratorError>;
}

/// Reads the `{project}.metadata.json` index written next to the assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonAssemblyReader;

impl AssemblyReader for JsonAssemblyReader {
    fn read(&self, assembly_path: &Path) -> Result<AssemblyIndex, GeneratorError> {
        let path = metadata_path(assembly_path);
        let json = fs::read_to_string(&path).map_err(|source| GeneratorError::Metadata {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| GeneratorError::Json {
            origin: path.display().to_string(),
            source,
        })
    }
}
