//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Stencil, the
//! template resolution layer of a code-generation pipeline. Given a target
//! language and a named template slot (`"Class"`, `"Property"`, ...) it finds
//! the template body, renders it against a model, and lets templates include
//! other named templates with indentation carried across the boundary.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Host (code generator)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (TemplateFactory, TemplateLocator,     │
//! │   CompiledTemplateRegistry)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, BundleSource, Engine, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stencil-adapters (Infrastructure)    │
//! │ (LocalFilesystem, EmbeddedBundle,       │
//! │  HandlebarsEngine, ParseCache)          │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Language, TemplateName, Settings,      │
//! │  RenderContext, InclusionDirective)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Resolution order
//!
//! 1. Override directory (`<dir>/<Name>.hbs`), when text templates are enabled
//!    and the name carries no compiled-only marker (`!`)
//! 2. Bundled text template for the language
//! 3. Compiled template registered for `(language, name)`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stencil_core::prelude::*;
//!
//! let factory = TemplateFactory::builder()
//!     .settings(TemplateSettings::default())
//!     .filesystem(filesystem) // impl Filesystem
//!     .bundles(bundles)       // impl BundleSource
//!     .engine(engine)         // impl TemplateEngine
//!     .build()
//!     .unwrap();
//!
//! let language: Language = "Rust".parse().unwrap();
//! let template = factory
//!     .create_template(&language, "Class", &serde_json::json!({ "Name": "Pet" }))
//!     .unwrap();
//! println!("{}", template.render().unwrap());
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CompiledTemplateRegistry, TemplateFactory, TemplateFactoryBuilder, TemplateHandle,
        TemplateLocator,
        ports::{
            BundleSource, CompiledTemplate, Filesystem, IncludeResolver, LanguageModule,
            TemplateEngine,
        },
    };
    pub use crate::domain::{
        InclusionDirective, Language, Model, RenderContext, TemplateName, TemplateSettings,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
