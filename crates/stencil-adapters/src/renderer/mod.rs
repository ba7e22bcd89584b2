//! Handlebars rendering engine.
//!
//! - [`preprocess`]: rewrites `{% template NAME %}` markers into directive calls
//! - [`ParseCache`]: parsed templates keyed by raw source
//! - [`HandlebarsEngine`]: the `TemplateEngine` port, including the directive helper
//! - [`helpers`]: code-generation helpers (case conversion, indentation)

mod cache;
mod engine;
pub mod helpers;
pub mod preprocess;

pub use cache::ParseCache;
pub use engine::HandlebarsEngine;
