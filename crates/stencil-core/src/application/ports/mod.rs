//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: Override directory access
//!   - `BundleSource`: Bundled per-language templates
//!   - `TemplateEngine`: Text template rendering
//!   - `CompiledTemplate` / `LanguageModule`: Compiled templates
//!
//! - **Callback Ports**: Implemented by application, called by adapters
//!   - `IncludeResolver`: Inclusion directives reached during a render

pub mod output;

pub use output::{
    BundleSource, CompiledTemplate, CompiledTemplateCtor, Filesystem, IncludeResolver,
    LanguageModule, TemplateEngine,
};

#[cfg(test)]
pub use output::{MockBundleSource, MockFilesystem};
