use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A loaded workflow project, ready to be compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub path: PathBuf,
    pub name: String,
    pub content: String,
}

/// Result of compiling a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileOutcome {
    pub successful: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl CompileOutcome {
    /// The first reported compiler error, or a generic message when the
    /// compiler gave none.
    pub fn first_error(&self) -> &str {
        self.errors
            .first()
            .map(String::as_str)
            .unwrap_or("compilation reported no diagnostics")
    }
}

/// Capability to load and compile workflow projects.
pub trait ProjectSystem {
    /// Loads the project file at `path`.
    ///
    /// # Errors
    /// Returns `Error::ProjectLoad` if the file is missing or malformed.
    fn load(&self, path: &Path) -> Result<Project>;

    /// Compiles a loaded project.
    fn compile(&self, project: &Project) -> Result<CompileOutcome>;
}
