//! Client project inspection.
//!
//! Locates the client project file in the working directory, reads its target
//! framework, and derives where the build placed the output assembly and the
//! assembly's metadata index.

use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::GeneratorError;

/// File name suffix identifying the client project file.
pub const PROJECT_MARKER_SUFFIX: &str = "HttpApi.Client.csproj";

/// Build configuration whose output is inspected.
pub const BUILD_CONFIGURATION: &str = "Debug";

/// Suffix, replacing `.dll`, of the metadata index written next to the assembly.
pub const METADATA_SUFFIX: &str = "metadata.json";

const TARGET_FRAMEWORK_ELEMENT: &[u8] = b"TargetFramework";

/// Validates `directory` and returns its single client project file.
///
/// ## Errors
///
/// - [`GeneratorError::WorkDirectoryNotFound`] if `directory` is not a directory
/// - [`GeneratorError::ProjectFileNotFound`] if no `*HttpApi.Client.csproj` exists
/// - [`GeneratorError::AmbiguousProjectFile`] if more than one exists
pub fn check_work_directory(directory: &Path) -> Result<PathBuf, GeneratorError> {
    if !directory.is_dir() {
        return Err(GeneratorError::WorkDirectoryNotFound(
            directory.display().to_string(),
        ));
    }
    find_project_file(directory)
}

/// Finds the single `*HttpApi.Client.csproj` directly inside `directory`.
pub fn find_project_file(directory: &Path) -> Result<PathBuf, GeneratorError> {
    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&directory.display().to_string()),
        PROJECT_MARKER_SUFFIX
    );

    let mut candidates: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| GeneratorError::ConfigError(format!("invalid working directory pattern: {e}")))?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => Err(GeneratorError::ProjectFileNotFound(
            directory.display().to_string(),
        )),
        1 => Ok(candidates.remove(0)),
        _ => Err(GeneratorError::AmbiguousProjectFile {
            directory: directory.display().to_string(),
            candidates: candidates
                .iter()
                .filter_map(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Returns the project name: the project file name without its extension.
pub fn project_name(project_file: &Path) -> Result<String, GeneratorError> {
    project_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| GeneratorError::ProjectFileNotFound(project_file.display().to_string()))
}

/// Reads the `<TargetFramework>` of a project file.
///
/// ## Errors
///
/// Returns [`GeneratorError::TargetFrameworkNotFound`] when the element is
/// missing or empty, [`GeneratorError::ProjectXml`] when the file is not
/// well-formed, and [`GeneratorError::ProjectFileUnreadable`] when it cannot
/// be read as UTF-8 text.
pub fn read_target_framework(project_file: &Path) -> Result<String, GeneratorError> {
    let xml = fs::read_to_string(project_file).map_err(|source| {
        GeneratorError::ProjectFileUnreadable {
            path: project_file.display().to_string(),
            source,
        }
    })?;

    parse_target_framework(&xml)
        .map_err(|source| GeneratorError::ProjectXml {
            path: project_file.display().to_string(),
            source,
        })?
        .ok_or_else(|| GeneratorError::TargetFrameworkNotFound(project_file.display().to_string()))
}

/// Extracts the text of the first non-empty `<TargetFramework>` element.
///
/// ```
/// use proxygen_gen::project::parse_target_framework;
///
/// let xml = r#"<Project Sdk="Microsoft.NET.Sdk">
///   <PropertyGroup>
///     <TargetFramework>net6.0</TargetFramework>
///   </PropertyGroup>
/// </Project>"#;
///
/// assert_eq!(parse_target_framework(xml).unwrap().as_deref(), Some("net6.0"));
/// ```
pub fn parse_target_framework(xml: &str) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut inside = false;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) if start.local_name().as_ref() == TARGET_FRAMEWORK_ELEMENT => {
                inside = true;
                value.clear();
            }
            Event::Text(text) if inside => value.push_str(&String::from_utf8_lossy(&text)),
            Event::End(end) if inside && end.local_name().as_ref() == TARGET_FRAMEWORK_ELEMENT => {
                inside = false;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return Ok(Some(trimmed.to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// `{work_directory}/bin/Debug/{target_framework}/{project_name}.dll`
pub fn assembly_path(work_directory: &Path, project_name: &str, target_framework: &str) -> PathBuf {
    work_directory
        .join("bin")
        .join(BUILD_CONFIGURATION)
        .join(target_framework)
        .join(format!("{}.dll", project_name))
}

/// The metadata index next to `assembly_path`.
///
/// ```
/// use std::path::Path;
/// use proxygen_gen::project::metadata_path;
///
/// assert_eq!(
///     metadata_path(Path::new("bin/Debug/net6.0/Acme.HttpApi.Client.dll")),
///     Path::new("bin/Debug/net6.0/Acme.HttpApi.Client.metadata.json")
/// );
/// ```
pub fn metadata_path(assembly_path: &Path) -> PathBuf {
    assembly_path.with_extension(METADATA_SUFFIX)
}
