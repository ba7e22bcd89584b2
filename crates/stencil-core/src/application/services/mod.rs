//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve a template" or "render an inclusion".

pub mod compiled_registry;
pub mod template_factory;
pub mod template_locator;

pub use compiled_registry::CompiledTemplateRegistry;
pub use template_factory::{
    IncludeScope, MAX_INCLUSION_DEPTH, TemplateFactory, TemplateFactoryBuilder, TemplateHandle,
    TextTemplate,
};
pub use template_locator::TemplateLocator;
