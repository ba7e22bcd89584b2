//! Naming conventions shared by every resolution path.

use std::path::{Path, PathBuf};

use crate::domain::{Language, TemplateName};

/// File extension of text templates, both on disk and in bundles.
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Bundle segment between the language and the template file.
pub const BUNDLE_NAMESPACE: &str = "Templates";

/// Prefix of every compiled template type identifier.
pub const COMPILED_TYPE_PREFIX: &str = "Stencil.CodeGeneration.";

/// `<dir>/<Name>.hbs`. The name is used as given.
pub fn override_path(dir: &Path, name: &TemplateName) -> PathBuf {
    dir.join(format!("{}.{}", name.as_str(), TEMPLATE_EXTENSION))
}

/// `<Language>/Templates/<Name>.hbs`, marker stripped.
pub fn bundle_resource_path(language: &Language, name: &TemplateName) -> String {
    format!(
        "{}/{}/{}.{}",
        language,
        BUNDLE_NAMESPACE,
        name.without_marker(),
        TEMPLATE_EXTENSION
    )
}

/// `Stencil.CodeGeneration.<Language>.Templates.<Name>Template`, marker stripped.
pub fn compiled_type_name(language: &Language, name: &TemplateName) -> String {
    format!(
        "{}{}.{}.{}Template",
        COMPILED_TYPE_PREFIX,
        language,
        BUNDLE_NAMESPACE,
        name.without_marker()
    )
}
