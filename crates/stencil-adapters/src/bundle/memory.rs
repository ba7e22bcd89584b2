//! In-memory bundle, registered at runtime.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::{ApplicationError, ports::BundleSource},
    domain::{Language, TemplateName, bundle_resource_path},
    error::StencilResult,
};

/// Thread-safe in-memory bundle.
///
/// Clones share the same resources.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    resources: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBundle {
    /// Create a new empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` as the bundled `name` template for `language`.
    pub fn insert(
        &self,
        language: &Language,
        name: &TemplateName,
        text: impl Into<String>,
    ) -> StencilResult<()> {
        self.insert_resource(bundle_resource_path(language, name), text)
    }

    /// Register `text` under a raw resource path.
    pub fn insert_resource(
        &self,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> StencilResult<()> {
        let mut resources = self
            .resources
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        resources.insert(path.into(), text.into());
        Ok(())
    }

    /// Builder-style [`insert_resource`](Self::insert_resource) for test setup.
    pub fn with(self, path: impl Into<String>, text: impl Into<String>) -> Self {
        if let Ok(mut resources) = self.resources.write() {
            resources.insert(path.into(), text.into());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BundleSource for MemoryBundle {
    fn load(&self, path: &str) -> StencilResult<Option<String>> {
        let resources = self
            .resources
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(resources.get(path).cloned())
    }
}
