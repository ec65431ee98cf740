//! Where fixtures come from.

use crate::error::{DemockError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Resolves a (filtered) request URL to a raw fixture payload.
pub trait FixtureSource: Send + Sync {
    /// `Ok(None)` when no fixture exists for `url`.
    fn load(&self, url: &str) -> Result<Option<Value>>;
}

/// In-memory fixtures keyed by exact URL.
impl FixtureSource for HashMap<String, Value> {
    fn load(&self, url: &str) -> Result<Option<Value>> {
        Ok(self.get(url).cloned())
    }
}

/// Fixtures stored as JSON files under a root directory, mirroring URL paths.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a URL path onto the root; parent-directory segments are rejected.
    pub fn resolve(&self, url: &str) -> Result<PathBuf> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let relative = Path::new(path.trim_start_matches('/'));

        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => resolved.push(segment),
                Component::CurDir => {}
                _ => {
                    return Err(DemockError::Fixture {
                        path: url.to_string(),
                        message: "path escapes the fixture root".to_string(),
                    })
                }
            }
        }
        Ok(resolved)
    }
}

impl FixtureSource for DirectorySource {
    fn load(&self, url: &str) -> Result<Option<Value>> {
        let path = self.resolve(url)?;
        if !path.is_file() {
            return Ok(None);
        }
        trace!(path = %path.display(), "Loading fixture");

        let fixture_error = |message: String| DemockError::Fixture {
            path: path.display().to_string(),
            message,
        };
        let contents = std::fs::read_to_string(&path).map_err(|e| fixture_error(e.to_string()))?;
        let value = serde_json::from_str(&contents).map_err(|e| fixture_error(e.to_string()))?;
        Ok(Some(value))
    }
}
