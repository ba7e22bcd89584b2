//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::path::Path;
use std::sync::Arc;

use crate::domain::{InclusionDirective, Language, Model, RenderContext, TemplateName};
use crate::error::StencilResult;

/// Port for reading the override directory.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if a file exists at path.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> StencilResult<String>;
}

/// Port for bundled, per-language template resources.
///
/// Implemented by:
/// - `stencil_adapters::bundle::EmbeddedBundle` (compiled into the binary)
/// - `stencil_adapters::bundle::MemoryBundle` (registered at runtime)
#[cfg_attr(test, mockall::automock)]
pub trait BundleSource: Send + Sync {
    /// Load the resource at `path` (see `domain::bundle_resource_path`).
    ///
    /// `Ok(None)` means the bundle has no such entry.
    fn load(&self, path: &str) -> StencilResult<Option<String>>;
}

/// Port for the text template engine.
///
/// Implemented by:
/// - `stencil_adapters::renderer::HandlebarsEngine`
pub trait TemplateEngine: Send + Sync {
    /// Render raw template text against `context`.
    ///
    /// The engine owns parsing and caching of `source`. Whenever it reaches an
    /// inclusion directive it calls `includes` with the flattened visible
    /// scope and writes whatever text comes back.
    fn render(
        &self,
        source: &str,
        context: &RenderContext,
        includes: &dyn IncludeResolver,
    ) -> StencilResult<String>;
}

/// Callback the engine uses to render inclusion directives.
pub trait IncludeResolver: Sync {
    /// Resolve and render `directive`, returning the indented text to write,
    /// or `None` when nothing should be written (missing template or empty
    /// output).
    fn include(&self, directive: &InclusionDirective, scope: Model)
    -> StencilResult<Option<String>>;
}

/// A template whose rendering logic is code rather than text.
pub trait CompiledTemplate: Send {
    fn render(&self) -> StencilResult<String>;
}

/// Constructor for a compiled template: takes the model, returns the renderer.
pub type CompiledTemplateCtor = Arc<dyn Fn(Model) -> Box<dyn CompiledTemplate> + Send + Sync>;

/// A set of compiled templates for one language, loaded on first demand.
pub trait LanguageModule: Send + Sync {
    fn language(&self) -> Language;

    /// The templates this module provides, keyed by slot name.
    fn templates(&self) -> Vec<(TemplateName, CompiledTemplateCtor)>;
}
