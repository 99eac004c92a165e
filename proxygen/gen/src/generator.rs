//! Generation orchestration.
//!
//! [`ProxyGenerator`] drives one run against a client project directory. A run
//! is either a removal (delete the output folder) or a generation pass:
//!
//! 1. Validate the working directory and locate the client project file
//! 2. Resolve the build output assembly from the project's target framework
//! 3. Load the assembly metadata and its startup module
//! 4. Discover the remote service interfaces reachable from that module
//! 5. Fetch the server's API description
//! 6. For every eligible controller of the requested module, assemble and
//!    write the proxy and companion files
//!
//! Services that cannot be matched are skipped and logged at `debug`; they
//! never fail the run.

use std::path::{Component, Path, PathBuf};

use strum::{Display, EnumString};
use tracing::instrument;

use crate::discovery::discover_remote_services;
use crate::errors::GeneratorError;
use crate::output::{remove_output_folder, write_atomic};
use crate::project::{
    assembly_path, check_work_directory, project_name, read_target_framework,
};
use crate::proxy::{DEFAULT_FOLDER, assemble_proxy, should_generate_proxy};
use crate::source::{ApiDescriptionSource, AssemblyReader};

/// What a run does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ProxyCommand {
    /// Generate (or regenerate) proxy files.
    #[default]
    Generate,
    /// Delete the output folder.
    Remove,
}

/// Configuration of a single run.
#[derive(Debug, Clone)]
pub struct GenerateProxyArgs {
    pub command: ProxyCommand,
    /// Directory holding the client project file.
    pub work_directory: PathBuf,
    /// Name of the module to read from the API description.
    pub module: String,
    /// Output folder relative to the working directory; blank means
    /// [`DEFAULT_FOLDER`].
    pub folder: Option<String>,
    /// Render files without writing them.
    pub dry_run: bool,
}

impl GenerateProxyArgs {
    /// Creates generation args with the default module and folder.
    pub fn new(work_directory: impl Into<PathBuf>) -> Self {
        Self {
            command: ProxyCommand::Generate,
            work_directory: work_directory.into(),
            module: DEFAULT_MODULE.to_string(),
            folder: None,
            dry_run: false,
        }
    }

    /// The effective output folder.
    ///
    /// ```
    /// use proxygen_gen::generator::GenerateProxyArgs;
    ///
    /// let mut args = GenerateProxyArgs::new(".");
    /// assert_eq!(args.folder(), "ClientProxies");
    ///
    /// args.folder = Some("  ".to_string());
    /// assert_eq!(args.folder(), "ClientProxies");
    ///
    /// args.folder = Some("Proxies/Books".to_string());
    /// assert_eq!(args.folder(), "Proxies/Books");
    /// ```
    pub fn folder(&self) -> &str {
        match self.folder.as_deref() {
            Some(folder) if !folder.trim().is_empty() => folder,
            _ => DEFAULT_FOLDER,
        }
    }

    /// `{work_directory}/{folder}`
    ///
    /// ## Errors
    ///
    /// Returns [`GeneratorError::ConfigError`] if the folder is absolute or
    /// climbs out of the working directory with `..`.
    pub fn output_dir(&self) -> Result<PathBuf, GeneratorError> {
        let folder = self.folder();
        let escapes = Path::new(folder).components().any(|component| {
            matches!(
                component,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes {
            return Err(GeneratorError::ConfigError(format!(
                "output folder '{}' must be a relative path inside the working directory",
                folder
            )));
        }
        Ok(self.work_directory.join(folder))
    }
}

/// Module read from the API description when none is configured.
pub const DEFAULT_MODULE: &str = "app";

/// A rendered file and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Files rendered, in write order. In dry-run mode nothing was written.
    pub files: Vec<GeneratedFile>,
    /// Controllers in the requested module.
    pub services_considered: usize,
    /// Controllers that produced no files.
    pub services_skipped: usize,
    /// The folder deleted by a removal run, if it existed.
    pub removed: Option<PathBuf>,
}

impl GenerationReport {
    /// Number of proxy classes produced.
    pub fn proxies_generated(&self) -> usize {
        self.services_considered - self.services_skipped
    }
}

/// Runs proxy generation against a client project.
///
/// ## Examples
///
/// ```no_run
/// use proxygen_gen::generator::{GenerateProxyArgs, ProxyGenerator};
/// use proxygen_gen::source::{FileApiDescriptionSource, JsonAssemblyReader};
///
/// # async fn example() -> Result<(), proxygen_gen::errors::GeneratorError> {
/// let generator = ProxyGenerator::new(
///     FileApiDescriptionSource::new("api-definition.json"),
///     JsonAssemblyReader,
/// );
/// let report = generator.run(&GenerateProxyArgs::new("src/Acme.BookStore.HttpApi.Client")).await?;
/// println!("{} proxies", report.proxies_generated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProxyGenerator<S, R> {
    source: S,
    reader: R,
}

impl<S, R> ProxyGenerator<S, R>
where
    S: ApiDescriptionSource,
    R: AssemblyReader,
{
    pub fn new(source: S, reader: R) -> Self {
        Self { source, reader }
    }

    /// Executes `args.command`.
    ///
    /// ## Errors
    ///
    /// Usage errors (see [`GeneratorError::is_usage_error`]) abort before
    /// anything is written. All of them except
    /// [`GeneratorError::ModuleNotFound`] are raised before the API
    /// description is fetched. Fetch and write failures abort the run where
    /// they occur; files already written stay on disk.
    #[instrument(
        skip(self, args),
        fields(
            command = %args.command,
            work_directory = %args.work_directory.display(),
            module = %args.module,
        )
    )]
    pub async fn run(&self, args: &GenerateProxyArgs) -> Result<GenerationReport, GeneratorError> {
        match args.command {
            ProxyCommand::Remove => remove_proxies(args),
            ProxyCommand::Generate => {
                args.output_dir()?;
                let project_file = check_work_directory(&args.work_directory)?;
                self.generate(args, &project_file).await
            }
        }
    }

    async fn generate(
        &self,
        args: &GenerateProxyArgs,
        project_file: &Path,
    ) -> Result<GenerationReport, GeneratorError> {
        let project = project_name(project_file)?;
        let target_framework = read_target_framework(project_file)?;
        let assembly = assembly_path(&args.work_directory, &project, &target_framework);
        tracing::debug!(assembly = %assembly.display(), "reading client assembly metadata");

        let index = self.reader.read(&assembly)?;
        let startup = index.startup_module(&project)?;
        let root_namespace = startup.namespace.clone().unwrap_or_default();

        let services = discover_remote_services(&index, startup);
        tracing::debug!(
            startup_module = %startup.full_name(),
            count = services.len(),
            "remote services discovered"
        );

        let model = self.source.fetch(&args.module).await?;
        let module = model
            .module(&args.module)
            .ok_or_else(|| GeneratorError::ModuleNotFound {
                module: args.module.clone(),
                available: model.module_names().map(str::to_string).collect(),
            })?;

        let folder = args.folder();
        let output_dir = args.output_dir()?;
        let mut report = GenerationReport {
            services_considered: module.controllers.len(),
            ..Default::default()
        };

        for controller in module.controllers.values() {
            if !should_generate_proxy(controller) {
                tracing::debug!(
                    controller = %controller.controller_name,
                    "not an application service, skipping"
                );
                report.services_skipped += 1;
                continue;
            }

            let Some(proxy) = assemble_proxy(controller, &services, &root_namespace, folder)? else {
                report.services_skipped += 1;
                continue;
            };

            let proxy_path = proxy.proxy_path(&output_dir);
            let companion_path = proxy.companion_path(&output_dir);
            let files = [
                GeneratedFile {
                    path: proxy_path,
                    contents: proxy.proxy_source,
                },
                GeneratedFile {
                    path: companion_path,
                    contents: proxy.companion_source,
                },
            ];

            for file in files {
                if !args.dry_run {
                    write_atomic(&file.path, &file.contents)?;
                    tracing::info!(path = %file.path.display(), "wrote client proxy file");
                }
                report.files.push(file);
            }
        }

        tracing::info!(
            generated = report.proxies_generated(),
            skipped = report.services_skipped,
            dry_run = args.dry_run,
            "client proxy generation finished"
        );

        Ok(report)
    }
}

/// Deletes the output folder of the client project in `args.work_directory`.
///
/// The working directory must hold the client project file, as for
/// generation. An absent output folder is not an error. Needs neither an API
/// description nor assembly metadata.
pub fn remove_proxies(args: &GenerateProxyArgs) -> Result<GenerationReport, GeneratorError> {
    let output_dir = args.output_dir()?;
    check_work_directory(&args.work_directory)?;

    let removed = if args.dry_run {
        output_dir.exists()
    } else {
        remove_output_folder(&output_dir)?
    };

    if removed {
        tracing::info!(path = %output_dir.display(), "removed client proxy folder");
    } else {
        tracing::debug!(path = %output_dir.display(), "client proxy folder absent, nothing to remove");
    }

    Ok(GenerationReport {
        removed: removed.then_some(output_dir),
        ..Default::default()
    })
}
