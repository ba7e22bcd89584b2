//! Render context construction.
//!
//! A render context is the flat, ordered key-value scope handed to the engine:
//! the model's own fields plus a handful of reserved keys describing the
//! ambient render (language, template, settings, tool stamp).

use serde_json::{Map, Value};

use crate::{
    domain::{Language, TemplateName, TemplateSettings},
    error::{StencilError, StencilResult},
};

/// The caller-supplied data model. Objects contribute their fields to the
/// render context; any other value contributes nothing.
pub type Model = Value;

/// Reserved key holding the active language.
pub const LANGUAGE_KEY: &str = "__language";
/// Reserved key holding the active template name.
pub const TEMPLATE_KEY: &str = "__template";
/// Reserved key holding the serialized settings.
pub const SETTINGS_KEY: &str = "__settings";
/// Reserved key holding the tool stamp. Only a default: models may supply it.
pub const TOOLCHAIN_VERSION_KEY: &str = "ToolchainVersion";

/// Flat key-value scope for one render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderContext {
    values: Map<String, Value>,
}

impl RenderContext {
    /// Build the context for rendering `template` in `language`.
    ///
    /// Language, template and settings always overwrite same-named model
    /// fields; the tool stamp is only inserted when the model has none.
    /// Settings that cannot be serialized (a non UTF-8 override directory)
    /// fail the build.
    pub fn build(
        model: &Model,
        language: &Language,
        template: &TemplateName,
        settings: &TemplateSettings,
    ) -> StencilResult<Self> {
        let mut values = match model {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };

        values.insert(LANGUAGE_KEY.into(), Value::from(language.as_str()));
        values.insert(TEMPLATE_KEY.into(), Value::from(template.as_str()));
        values.insert(SETTINGS_KEY.into(), settings_value(settings)?);
        values
            .entry(TOOLCHAIN_VERSION_KEY)
            .or_insert_with(|| Value::from(settings.tool_version.as_str()));

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

fn settings_value(settings: &TemplateSettings) -> StencilResult<Value> {
    serde_json::to_value(settings).map_err(|e| StencilError::Internal {
        message: format!("settings could not be exposed to templates: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lang() -> Language {
        "Rust".parse().unwrap()
    }

    fn name() -> TemplateName {
        "Class".parse().unwrap()
    }

    #[test]
    fn model_fields_are_kept_in_order() {
        let model = json!({ "Name": "Pet", "Abstract": false });
        let ctx =
            RenderContext::build(&model, &lang(), &name(), &TemplateSettings::default()).unwrap();

        let keys: Vec<&str> = ctx.as_map().keys().map(String::as_str).collect();
        assert_eq!(&keys[..2], &["Name", "Abstract"]);
        assert_eq!(ctx.get("Name"), Some(&json!("Pet")));
    }

    #[test]
    fn reserved_keys_overwrite_model_fields() {
        let model = json!({ "__language": "Go", "__template": "Other", "__settings": 1 });
        let ctx =
            RenderContext::build(&model, &lang(), &name(), &TemplateSettings::default()).unwrap();

        assert_eq!(ctx.get(LANGUAGE_KEY), Some(&json!("Rust")));
        assert_eq!(ctx.get(TEMPLATE_KEY), Some(&json!("Class")));
        assert_eq!(
            ctx.get(SETTINGS_KEY).and_then(|s| s.get("use_text_templates")),
            Some(&json!(true))
        );
    }

    #[test]
    fn toolchain_version_is_only_a_default() {
        let settings = TemplateSettings {
            tool_version: "stencil 9.9".into(),
            ..TemplateSettings::default()
        };

        let ctx = RenderContext::build(&json!({}), &lang(), &name(), &settings).unwrap();
        assert_eq!(ctx.get(TOOLCHAIN_VERSION_KEY), Some(&json!("stencil 9.9")));

        let ctx = RenderContext::build(
            &json!({ "ToolchainVersion": "custom" }),
            &lang(),
            &name(),
            &settings,
        )
        .unwrap();
        assert_eq!(ctx.get(TOOLCHAIN_VERSION_KEY), Some(&json!("custom")));
    }

    #[test]
    fn non_object_models_contribute_nothing() {
        let ctx =
            RenderContext::build(&json!(42), &lang(), &name(), &TemplateSettings::default()).unwrap();
        assert_eq!(ctx.as_map().len(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn unserializable_settings_fail_the_build() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let settings = TemplateSettings::default()
            .with_template_directory(OsStr::from_bytes(b"templates-\xff"));
        let err = RenderContext::build(&json!({}), &lang(), &name(), &settings).unwrap_err();

        assert!(matches!(err, StencilError::Internal { .. }));
        assert_eq!(err.category(), crate::error::ErrorCategory::Internal);
    }
}
