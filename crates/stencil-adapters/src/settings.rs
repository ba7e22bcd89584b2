//! Layered settings loading.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables (`STENCIL_USE_TEXT_TEMPLATES`,
//!    `STENCIL_TEMPLATE_DIRECTORY`, `STENCIL_TOOL_VERSION`)
//! 2. Settings file (TOML), when given
//! 3. Built-in defaults ([`TemplateSettings::default`])
//!
//! ```toml
//! use_text_templates = true
//! template_directory = "codegen/templates"
//! tool_version = "my-generator 2.1"
//!
//! [options]
//! nullable = true
//! ```

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use stencil_core::{
    domain::TemplateSettings,
    error::{StencilError, StencilResult},
};
use tracing::debug;

/// Prefix of the environment variables read by [`load_settings`].
pub const ENV_PREFIX: &str = "STENCIL";

/// Load settings from defaults, an optional TOML file and `STENCIL_*` variables.
///
/// A missing or malformed file is a configuration error.
pub fn load_settings(file: Option<&Path>) -> StencilResult<TemplateSettings> {
    load_settings_with_prefix(file, ENV_PREFIX)
}

/// Same as [`load_settings`] with a custom environment variable prefix.
pub fn load_settings_with_prefix(
    file: Option<&Path>,
    env_prefix: &str,
) -> StencilResult<TemplateSettings> {
    let defaults = TemplateSettings::default();

    let mut builder = Config::builder()
        .set_default("use_text_templates", defaults.use_text_templates)
        .map_err(config_error)?
        .set_default("tool_version", defaults.tool_version)
        .map_err(config_error)?;

    if let Some(path) = file {
        debug!(path = %path.display(), "Reading settings file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let settings: TemplateSettings = builder
        .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
        .build()
        .map_err(config_error)?
        .try_deserialize()
        .map_err(config_error)?;

    settings.validate()?;
    Ok(settings)
}

fn config_error(e: ConfigError) -> StencilError {
    StencilError::Configuration {
        message: e.to_string(),
    }
}
