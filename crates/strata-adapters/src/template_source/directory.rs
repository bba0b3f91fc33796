//! Templates read from a directory on disk.
//!
//! # Resolution order
//!
//! [`DirectoryTemplateSource::discover`] probes these candidates and keeps
//! the first that holds a folder for the requested kind:
//!
//! 1. **`$STRATA_TEMPLATES_DIR`**: environment variable override.
//! 2. **`templates.local_path`**: from the CLI configuration.
//!
//! A `templates` folder in the working directory is not picked up on its
//! own; point one of the above at it. When nothing matches, callers fall
//! back to the embedded set.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use strata_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::StrataResult,
};

/// Environment variable naming a templates directory.
pub const TEMPLATES_DIR_ENV: &str = "STRATA_TEMPLATES_DIR";

/// Templates served from `<root>/<kind>/<file>`.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a templates directory that serves `kind`.
    pub fn discover(configured: Option<&Path>, kind: &str) -> Option<Self> {
        let env_dir = std::env::var_os(TEMPLATES_DIR_ENV).map(PathBuf::from);

        for candidate in candidate_paths(env_dir, configured) {
            if candidate.join(kind).is_dir() {
                info!(path = %candidate.display(), "Using templates directory");
                return Some(Self::new(candidate));
            }
            debug!(path = %candidate.display(), kind, "No templates for kind, skipping");
        }

        None
    }
}

/// Ordered candidates; unset sources are omitted.
fn candidate_paths(env_dir: Option<PathBuf>, configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);

    if let Some(p) = env_dir {
        debug!(path = %p.display(), "candidate from ${}", TEMPLATES_DIR_ENV);
        paths.push(p);
    }
    if let Some(p) = configured {
        paths.push(p.to_path_buf());
    }

    paths
}

impl TemplateSource for DirectoryTemplateSource {
    fn fetch(&self, name: &str) -> StrataResult<Vec<u8>> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into());
        }

        std::fs::read(&path).map_err(|e| {
            ApplicationError::Filesystem {
                path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> StrataResult<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable template entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                names.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        names.sort();
        Ok(names)
    }
}
