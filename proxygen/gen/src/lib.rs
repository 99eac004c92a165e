//! Proxygen code generator library.
//!
//! This crate generates C# client proxy classes for the application services
//! a server publishes. Each proxy implements the service's local interface and
//! forwards every call to the remote endpoint through `MakeRequestAsync`,
//! carrying the server's action descriptor inline. For every service it
//! writes:
//!
//! - `{Controller}ClientProxy.cs` with one method per exposed operation
//! - `{Controller}ClientProxy.extension.cs`, an empty partial class shell
//!
//! ## Modules
//!
//! - [`generator`] - Orchestrates a run (generate or remove)
//! - [`project`] - Client project file, target framework, and build output paths
//! - [`source`] - API description sources and the assembly metadata reader
//! - [`discovery`] - Remote service discovery over the module dependency graph
//! - [`proxy`] - Per-service proxy and companion file assembly
//! - [`method`] - Per-operation method synthesis
//! - [`type_names`] - C# type name rendering and import tracking
//! - [`template`] - Placeholder templates rendered in one pass
//! - [`output`] - Atomic file writing and output folder removal
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use proxygen_gen::generator::{GenerateProxyArgs, ProxyGenerator};
//! use proxygen_gen::source::{HttpApiDescriptionSource, JsonAssemblyReader};
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = HttpApiDescriptionSource::new(Url::parse("https://localhost:44300")?)?;
//! let generator = ProxyGenerator::new(source, JsonAssemblyReader);
//!
//! let report = generator
//!     .run(&GenerateProxyArgs::new("src/Acme.BookStore.HttpApi.Client"))
//!     .await?;
//!
//! for file in &report.files {
//!     println!("{}", file.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Generated Code Structure
//!
//! For a `Book` controller implementing `IBookAppService`:
//!
//! ```text
//! namespace Acme.BookStore.ClientProxies
//! {
//!     public partial class BookClientProxy : ClientProxyBase<IBookAppService>, IBookAppService
//!     {
//!         public async Task<BookDto> GetAsync(int id)
//!         {
//!             ...
//!             return await MakeRequestAsync<BookDto>(action, id);
//!         }
//!     }
//! }
//! ```

pub mod discovery;
pub mod errors;
pub mod generator;
pub mod method;
pub mod output;
pub mod project;
pub mod proxy;
pub mod source;
pub mod template;
pub mod type_names;

#[cfg(test)]
mod test_utils;
