//! Template Locator - text template lookup.
//!
//! Finds the raw text of a template: the override directory first, then the
//! language bundle. Returns `None` when no text template applies, which sends
//! the factory to the compiled registry.

use tracing::debug;

use crate::{
    application::ports::{BundleSource, Filesystem},
    domain::{Language, TemplateName, TemplateSettings, bundle_resource_path, override_path},
    error::StencilResult,
};

/// Service for text template lookup.
pub struct TemplateLocator {
    filesystem: Box<dyn Filesystem>,
    bundles: Box<dyn BundleSource>,
}

impl TemplateLocator {
    /// Create a new locator with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, bundles: Box<dyn BundleSource>) -> Self {
        Self {
            filesystem,
            bundles,
        }
    }

    /// Find the text of `name` for `language`.
    ///
    /// A failing override read is an error, not a miss.
    pub fn resolve_text(
        &self,
        settings: &TemplateSettings,
        language: &Language,
        name: &TemplateName,
    ) -> StencilResult<Option<String>> {
        if !settings.use_text_templates {
            return Ok(None);
        }

        if !name.is_compiled_only() {
            if let Some(dir) = settings.override_directory() {
                let path = override_path(dir, name);
                if self.filesystem.exists(&path) {
                    debug!(template = %name, path = %path.display(), "Override template found");
                    return self.filesystem.read_to_string(&path).map(Some);
                }
            }
        }

        let resource = bundle_resource_path(language, name);
        let text = self.bundles.load(&resource)?;
        if text.is_some() {
            debug!(template = %name, %resource, "Bundled template found");
        }
        Ok(text)
    }
}
