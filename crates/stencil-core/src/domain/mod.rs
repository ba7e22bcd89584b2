// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure logic with no I/O. Filesystem access, bundle
//! loading and template rendering are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or engine calls
//! - **Few external crates**: std, thiserror, serde and serde_json values
//! - **Validated values**: `Language` and `TemplateName` are checked on construction
//!
// Public API - what the world sees
pub mod context;
pub mod conventions;
pub mod directive;
pub mod error;
pub mod settings;
pub mod value_objects;

// Re-exports for convenience
pub use context::{
    LANGUAGE_KEY, Model, RenderContext, SETTINGS_KEY, TEMPLATE_KEY, TOOLCHAIN_VERSION_KEY,
};
pub use conventions::{
    TEMPLATE_EXTENSION, bundle_resource_path, compiled_type_name, override_path,
};
pub use directive::{INDENT_WIDTH, InclusionDirective};
pub use error::{DomainError, ErrorCategory};
pub use settings::TemplateSettings;
pub use value_objects::{COMPILED_ONLY_MARKER, Language, TemplateName};
