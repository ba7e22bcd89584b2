//! Application layer errors.
//!
//! These errors represent failures in resolution and rendering, not
//! validation. Validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while resolving or rendering templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Neither a text template nor a compiled template exists.
    #[error("Could not load template '{name}' for language '{language}'")]
    TemplateNotFound { name: String, language: String },

    /// Reading an override file failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Reading a bundled resource failed.
    #[error("Bundle error for {resource}: {reason}")]
    BundleError { resource: String, reason: String },

    /// The engine rejected a template body.
    #[error("Template parsing failed: {reason}")]
    ParseFailed { reason: String },

    /// The engine failed while rendering.
    #[error("Rendering template '{template}' failed: {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Inclusion nested deeper than the supported limit.
    #[error("Template '{template}' exceeded the inclusion depth limit of {limit}")]
    InclusionDepthExceeded { template: String, limit: usize },

    /// The model could not be turned into a render value.
    #[error("Invalid model: {reason}")]
    InvalidModel { reason: String },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// Shared state access failed (lock poisoned).
    #[error("Template cache lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name, language } => vec![
                format!("No '{}' template exists for {}", name, language),
                "Add an override file or register a compiled template".into(),
                format!("Check the bundle contains {}/Templates/{}.hbs", language, name),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to read: {}", path.display()),
                "Check that the override directory is readable".into(),
            ],
            Self::ParseFailed { .. } => vec![
                "Check the template for unbalanced Handlebars blocks".into(),
                "Inclusion markers must sit on their own line".into(),
            ],
            Self::InclusionDepthExceeded { template, .. } => vec![
                format!("'{}' probably includes itself", template),
                "A blank {% template %} inside a bundled template recurses forever".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "Pass it to TemplateFactory::builder() before build()".into(),
            ],
            Self::StoreLockError => vec![
                "A previous render panicked while holding the template cache".into(),
                "Rebuild the engine to recover".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::BundleError { .. } => ErrorCategory::Internal,
            Self::ParseFailed { .. }
            | Self::InclusionDepthExceeded { .. }
            | Self::InvalidModel { .. } => ErrorCategory::Validation,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::RenderingFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
