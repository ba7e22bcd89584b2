//! Bundle adapters: per-language template resources.
//!
//! Resources are addressed by `<Language>/Templates/<Name>.hbs`
//! (see `stencil_core::domain::bundle_resource_path`).

mod embedded;
mod memory;

pub use embedded::EmbeddedBundle;
pub use memory::MemoryBundle;
