//! Template settings read by the resolution core.
//!
//! The settings object is owned by the host. The core only reads the fields
//! below; generator-specific flags travel in `options` and are exposed to
//! templates under the `__settings` key without being interpreted here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Settings consumed by [`TemplateFactory`](crate::application::TemplateFactory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Enables the whole text-template path. When `false` every template
    /// resolves through the compiled registry.
    pub use_text_templates: bool,

    /// Directory searched for `<Name>.hbs` overrides.
    pub template_directory: Option<PathBuf>,

    /// Stamp injected as `ToolchainVersion` unless the model supplies one.
    pub tool_version: String,

    /// Opaque generator flags.
    pub options: Map<String, Value>,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            use_text_templates: true,
            template_directory: None,
            tool_version: default_tool_version(),
            options: Map::new(),
        }
    }
}

impl TemplateSettings {
    /// Builder-style override directory setter.
    pub fn with_template_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_directory = Some(dir.into());
        self
    }

    /// Builder-style toggle for the text-template path.
    pub fn with_text_templates(mut self, enabled: bool) -> Self {
        self.use_text_templates = enabled;
        self
    }

    /// The override directory, treating an empty path as "not configured".
    pub fn override_directory(&self) -> Option<&std::path::Path> {
        self.template_directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tool_version.trim().is_empty() {
            return Err(DomainError::InvalidSettings(
                "tool_version must not be blank".into(),
            ));
        }
        Ok(())
    }
}

/// `stencil <crate version>`.
pub fn default_tool_version() -> String {
    format!("stencil {}", crate::VERSION)
}
