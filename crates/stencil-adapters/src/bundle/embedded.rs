//! Starter templates compiled into the binary.
//!
//! The `bundles/` directory of this crate is embedded at compile time with
//! `rust-embed`, preserving its `<Language>/Templates/<Name>.hbs` layout.

use std::collections::BTreeSet;

use rust_embed::RustEmbed;
use stencil_core::{
    application::{ApplicationError, ports::BundleSource},
    error::StencilResult,
};
use tracing::trace;

/// Container for all bundled templates.
#[derive(RustEmbed)]
#[folder = "bundles/"]
struct BundledTemplates;

/// Bundle source backed by the embedded starter templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedBundle;

impl EmbeddedBundle {
    pub fn new() -> Self {
        Self
    }

    /// Languages that ship at least one bundled template, sorted.
    pub fn languages(&self) -> Vec<String> {
        BundledTemplates::iter()
            .filter_map(|path| path.split('/').next().map(str::to_owned))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl BundleSource for EmbeddedBundle {
    fn load(&self, path: &str) -> StencilResult<Option<String>> {
        let Some(file) = BundledTemplates::get(path) else {
            trace!(resource = path, "Not in embedded bundle");
            return Ok(None);
        };

        let text = std::str::from_utf8(file.data.as_ref()).map_err(|e| {
            ApplicationError::BundleError {
                resource: path.to_string(),
                reason: format!("not valid UTF-8: {}", e),
            }
        })?;
        Ok(Some(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_rust_and_typescript() {
        let languages = EmbeddedBundle::new().languages();
        assert!(languages.contains(&"Rust".to_string()));
        assert!(languages.contains(&"TypeScript".to_string()));
    }

    #[test]
    fn loads_bundled_template() {
        let text = EmbeddedBundle::new()
            .load("Rust/Templates/Class.hbs")
            .unwrap()
            .unwrap();
        assert!(text.contains("{{uppercamelcase Name}}"));
    }

    #[test]
    fn unknown_resource_is_none() {
        assert_eq!(
            EmbeddedBundle::new()
                .load("Cobol/Templates/Class.hbs")
                .unwrap(),
            None
        );
    }
}
