//! Common test utilities for proxygen integration tests.
//!
//! Builds a throwaway client project from the files in `tests/fixtures/`:
//!
//! ```text
//! {tmp}/
//! ├── Acme.BookStore.HttpApi.Client.csproj
//! ├── api-definition.json
//! └── bin/Debug/net6.0/Acme.BookStore.HttpApi.Client.metadata.json
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const PROJECT: &str = "Acme.BookStore.HttpApi.Client";
pub const TARGET_FRAMEWORK: &str = "net6.0";

/// Loads a fixture from the `tests/fixtures/` directory.
///
/// ## Panics
///
/// Panics if the fixture file cannot be read.
pub fn load_fixture(name: &str) -> String {
    let mut fixture_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fixture_path.push("tests");
    fixture_path.push("fixtures");
    fixture_path.push(name);

    fs::read_to_string(&fixture_path)
        .unwrap_or_else(|e| panic!("Failed to read fixture at {:?}: {}", fixture_path.display(), e))
}

/// A client project laid out in a temporary directory.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// Project file, build metadata and a saved API description.
    pub fn new() -> Self {
        let fixture = Self::bare();
        fixture.write(
            &format!("{PROJECT}.csproj"),
            &load_fixture(&format!("{PROJECT}.csproj")),
        );
        fixture.write(
            &format!("bin/Debug/{TARGET_FRAMEWORK}/{PROJECT}.metadata.json"),
            &load_fixture(&format!("{PROJECT}.metadata.json")),
        );
        fixture.write("api-definition.json", &load_fixture("book-store-api.json"));
        fixture
    }

    /// An empty directory.
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn api_file(&self) -> PathBuf {
        self.path().join("api-definition.json")
    }

    /// `{project}/ClientProxies`
    pub fn proxies_dir(&self) -> PathBuf {
        self.path().join("ClientProxies")
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, contents).expect("Failed to write fixture file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }
}
