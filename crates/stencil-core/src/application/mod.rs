//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateFactory, TemplateLocator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Naming conventions,
//! context keys and directive rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CompiledTemplateRegistry, IncludeScope, MAX_INCLUSION_DEPTH, TemplateFactory,
    TemplateFactoryBuilder, TemplateHandle, TemplateLocator, TextTemplate,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    BundleSource, CompiledTemplate, CompiledTemplateCtor, Filesystem, IncludeResolver,
    LanguageModule, TemplateEngine,
};

pub use error::ApplicationError;
