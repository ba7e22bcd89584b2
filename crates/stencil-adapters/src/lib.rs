//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod bundle;
pub mod filesystem;
pub mod renderer;
pub mod settings;

// Re-export commonly used adapters
pub use bundle::{EmbeddedBundle, MemoryBundle};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{HandlebarsEngine, ParseCache};
pub use settings::load_settings;

use stencil_core::{application::TemplateFactoryBuilder, domain::TemplateSettings};

/// A factory builder wired with the production adapters: the local
/// filesystem for overrides, the embedded bundle and a fresh Handlebars engine.
pub fn default_builder(settings: TemplateSettings) -> TemplateFactoryBuilder {
    stencil_core::application::TemplateFactory::builder()
        .settings(settings)
        .filesystem(LocalFilesystem::new())
        .bundles(EmbeddedBundle::new())
        .engine(HandlebarsEngine::new())
}
