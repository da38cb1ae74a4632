use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Scenario;

/// Resolves scenario files relative to a base directory.
pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        Scenario::from_yaml(&path)
            .with_context(|| format!("Failed to load scenario {}", path.display()))
    }

    /// Loads `file` when given, otherwise the built-in catalog.
    pub fn load_or_builtin(&self, file: Option<impl AsRef<Path>>) -> Result<Scenario> {
        match file {
            Some(file) => self.load(file),
            None => Ok(Scenario::builtin()),
        }
    }
}
