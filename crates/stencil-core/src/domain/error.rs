// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel back across the template engine)
/// - Categorizable (for display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid language identifier '{value}': {reason}")]
    InvalidLanguage { value: String, reason: String },

    #[error("Invalid template name '{value}': {reason}")]
    InvalidTemplateName { value: String, reason: String },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLanguage { value, .. } => vec![
                format!("'{}' cannot be used as a language identifier", value),
                "Use the language's bundle name, e.g. Rust, TypeScript, CSharp".into(),
            ],
            Self::InvalidTemplateName { value, .. } => vec![
                format!("'{}' cannot be used as a template name", value),
                "Template names are plain identifiers, optionally ending in '!'".into(),
            ],
            Self::InvalidSettings(msg) => vec![
                "Check your template settings".into(),
                format!("Details: {}", msg),
            ],
        }
    }

    /// Error category for display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLanguage { .. }
            | Self::InvalidTemplateName { .. }
            | Self::InvalidSettings(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
