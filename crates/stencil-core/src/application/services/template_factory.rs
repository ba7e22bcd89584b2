//! Template Factory - the entry point hosts call.
//!
//! Resolves `(language, name)` to a renderable handle: text templates first
//! (see [`TemplateLocator`]), compiled templates second. Text templates are
//! rendered through the [`TemplateEngine`] port with an [`IncludeScope`]
//! that resolves inclusion directives back through this factory.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{BundleSource, CompiledTemplate, Filesystem, IncludeResolver, TemplateEngine},
        services::{CompiledTemplateRegistry, TemplateLocator},
    },
    domain::{InclusionDirective, Language, Model, RenderContext, TemplateName, TemplateSettings},
    error::StencilResult,
};

/// How many inclusions may nest below a top-level template.
pub const MAX_INCLUSION_DEPTH: usize = 64;

/// Resolves and instantiates templates.
///
/// Shareable across threads; every handle borrows the factory it came from.
pub struct TemplateFactory {
    settings: TemplateSettings,
    locator: TemplateLocator,
    compiled: CompiledTemplateRegistry,
    engine: Arc<dyn TemplateEngine>,
}

impl TemplateFactory {
    /// Create a factory from already built parts.
    pub fn new(
        settings: TemplateSettings,
        locator: TemplateLocator,
        compiled: CompiledTemplateRegistry,
        engine: Arc<dyn TemplateEngine>,
    ) -> StencilResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            locator,
            compiled,
            engine,
        })
    }

    pub fn builder() -> TemplateFactoryBuilder {
        TemplateFactoryBuilder::default()
    }

    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    /// The compiled registry, for registering templates after construction.
    pub fn compiled(&self) -> &CompiledTemplateRegistry {
        &self.compiled
    }

    /// Resolve `name` for `language` and bind it to `model`.
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTemplateName` if `name` is not a valid slot name
    /// - `ApplicationError::InvalidModel` if `model` does not serialize
    /// - `ApplicationError::TemplateNotFound` if no text or compiled template exists
    /// - Any adapter error raised while reading template text
    #[instrument(skip(self, language, model), fields(language = %language))]
    pub fn create_template<M>(
        &self,
        language: &Language,
        name: &str,
        model: &M,
    ) -> StencilResult<TemplateHandle<'_>>
    where
        M: Serialize + ?Sized,
    {
        let model = serde_json::to_value(model).map_err(|e| ApplicationError::InvalidModel {
            reason: e.to_string(),
        })?;
        self.create_template_from_value(language, name, model)
    }

    /// Same as [`create_template`](Self::create_template) for a model that is
    /// already a JSON value.
    pub fn create_template_from_value(
        &self,
        language: &Language,
        name: &str,
        model: Model,
    ) -> StencilResult<TemplateHandle<'_>> {
        let name = TemplateName::new(name)?;
        self.try_create_template(language, &name, model)?
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                    language: language.to_string(),
                }
                .into()
            })
    }

    /// Resolve `name` without treating a miss as an error.
    pub fn try_create_template(
        &self,
        language: &Language,
        name: &TemplateName,
        model: Model,
    ) -> StencilResult<Option<TemplateHandle<'_>>> {
        self.resolve(language, name, model, 0)
    }

    /// Create and render in one step.
    pub fn render<M>(&self, language: &Language, name: &str, model: &M) -> StencilResult<String>
    where
        M: Serialize + ?Sized,
    {
        self.create_template(language, name, model)?.render()
    }

    fn resolve(
        &self,
        language: &Language,
        name: &TemplateName,
        model: Model,
        nesting: usize,
    ) -> StencilResult<Option<TemplateHandle<'_>>> {
        if let Some(source) = self.locator.resolve_text(&self.settings, language, name)? {
            return Ok(Some(TemplateHandle::Text(TextTemplate {
                factory: self,
                language: language.clone(),
                name: name.clone(),
                source,
                model,
                nesting,
            })));
        }

        Ok(self
            .compiled
            .resolve(language, name, model)?
            .map(TemplateHandle::Compiled))
    }
}

impl fmt::Debug for TemplateFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateFactory")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TemplateFactory`].
///
/// The filesystem, bundle source and engine are required. Settings default to
/// [`TemplateSettings::default`], the compiled registry to an empty one.
#[derive(Default)]
pub struct TemplateFactoryBuilder {
    settings: Option<TemplateSettings>,
    filesystem: Option<Box<dyn Filesystem>>,
    bundles: Option<Box<dyn BundleSource>>,
    compiled: Option<CompiledTemplateRegistry>,
    engine: Option<Arc<dyn TemplateEngine>>,
}

impl TemplateFactoryBuilder {
    pub fn settings(mut self, settings: TemplateSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn filesystem(mut self, filesystem: impl Filesystem + 'static) -> Self {
        self.filesystem = Some(Box::new(filesystem));
        self
    }

    pub fn bundles(mut self, bundles: impl BundleSource + 'static) -> Self {
        self.bundles = Some(Box::new(bundles));
        self
    }

    pub fn engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Some(Arc::new(engine));
        self
    }

    /// Share one engine (and its parse cache) between factories.
    pub fn shared_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn compiled(mut self, registry: CompiledTemplateRegistry) -> Self {
        self.compiled = Some(registry);
        self
    }

    pub fn build(self) -> StencilResult<TemplateFactory> {
        let filesystem = self
            .filesystem
            .ok_or(ApplicationError::AdapterNotConfigured { name: "filesystem" })?;
        let bundles = self
            .bundles
            .ok_or(ApplicationError::AdapterNotConfigured { name: "bundles" })?;
        let engine = self
            .engine
            .ok_or(ApplicationError::AdapterNotConfigured { name: "engine" })?;

        TemplateFactory::new(
            self.settings.unwrap_or_default(),
            TemplateLocator::new(filesystem, bundles),
            self.compiled.unwrap_or_default(),
            engine,
        )
    }
}

/// A resolved template bound to its model.
pub enum TemplateHandle<'f> {
    Text(TextTemplate<'f>),
    Compiled(Box<dyn CompiledTemplate>),
}

impl TemplateHandle<'_> {
    /// Produce the output text. Rendering twice yields the same text.
    pub fn render(&self) -> StencilResult<String> {
        match self {
            Self::Text(template) => template.render(),
            Self::Compiled(template) => template.render(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Debug for TemplateHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(template) => f.debug_tuple("Text").field(template).finish(),
            Self::Compiled(_) => f.write_str("Compiled(..)"),
        }
    }
}

/// A text template: raw source plus everything needed to render it.
pub struct TextTemplate<'f> {
    factory: &'f TemplateFactory,
    language: Language,
    name: TemplateName,
    source: String,
    model: Model,
    nesting: usize,
}

impl TextTemplate<'_> {
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn name(&self) -> &TemplateName {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn render(&self) -> StencilResult<String> {
        trace!(template = %self.name, nesting = self.nesting, "Rendering text template");
        let context =
            RenderContext::build(&self.model, &self.language, &self.name, &self.factory.settings)?;
        let scope = IncludeScope {
            factory: self.factory,
            language: &self.language,
            template: &self.name,
            nesting: self.nesting,
        };
        self.factory.engine.render(&self.source, &context, &scope)
    }
}

impl fmt::Debug for TextTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextTemplate")
            .field("language", &self.language)
            .field("name", &self.name)
            .field("nesting", &self.nesting)
            .finish_non_exhaustive()
    }
}

/// Resolves the inclusion directives met while rendering one text template.
pub struct IncludeScope<'a> {
    factory: &'a TemplateFactory,
    language: &'a Language,
    template: &'a TemplateName,
    nesting: usize,
}

impl IncludeResolver for IncludeScope<'_> {
    fn include(
        &self,
        directive: &InclusionDirective,
        scope: Model,
    ) -> StencilResult<Option<String>> {
        let target = directive.target(self.template)?;

        let nesting = self.nesting + 1;
        if nesting > MAX_INCLUSION_DEPTH {
            return Err(ApplicationError::InclusionDepthExceeded {
                template: target.to_string(),
                limit: MAX_INCLUSION_DEPTH,
            }
            .into());
        }

        let Some(handle) = self.factory.resolve(self.language, &target, scope, nesting)? else {
            debug!(
                template = %target,
                language = %self.language,
                "Included template not found, emitting nothing"
            );
            return Ok(None);
        };

        let output = handle.render()?;
        Ok(directive.indent(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CompiledTemplateCtor, LanguageModule};
    use crate::error::StencilError;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    /// Line based stand-in for a real engine.
    ///
    /// `@include NAME DEPTH` lines become inclusions (`-` is the blank name),
    /// `$key` is replaced by the string value of `key`.
    struct LineEngine;

    impl TemplateEngine for LineEngine {
        fn render(
            &self,
            source: &str,
            context: &RenderContext,
            includes: &dyn IncludeResolver,
        ) -> StencilResult<String> {
            let mut out = String::new();
            for line in source.lines() {
                if let Some(rest) = line.strip_prefix("@include") {
                    let mut parts = rest.split_whitespace();
                    let name = parts.next().filter(|n| *n != "-").unwrap_or("");
                    let depth = parts.next().and_then(|d| d.parse().ok()).unwrap_or(0);
                    let directive = InclusionDirective::new(name, depth);
                    if let Some(text) = includes.include(&directive, context.clone().into_value())? {
                        out.push_str(&text);
                    }
                    continue;
                }
                let mut line = line.to_string();
                for (key, value) in context.as_map() {
                    if let Some(text) = value.as_str() {
                        line = line.replace(&format!("${key}"), text);
                    }
                }
                out.push_str(&line);
                out.push('\n');
            }
            Ok(out)
        }
    }

    #[derive(Default)]
    struct MapFilesystem(HashMap<PathBuf, String>);

    impl Filesystem for MapFilesystem {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> StencilResult<String> {
            self.0.get(path).cloned().ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "missing".into(),
                }
                .into()
            })
        }
    }

    #[derive(Default)]
    struct MapBundle(HashMap<String, String>);

    impl MapBundle {
        fn with(mut self, path: &str, text: &str) -> Self {
            self.0.insert(path.into(), text.into());
            self
        }
    }

    impl BundleSource for MapBundle {
        fn load(&self, path: &str) -> StencilResult<Option<String>> {
            Ok(self.0.get(path).cloned())
        }
    }

    struct Fixed(&'static str);

    impl CompiledTemplate for Fixed {
        fn render(&self) -> StencilResult<String> {
            Ok(self.0.to_string())
        }
    }

    fn rust() -> Language {
        "Rust".parse().unwrap()
    }

    fn factory(bundles: MapBundle) -> TemplateFactory {
        TemplateFactory::builder()
            .filesystem(MapFilesystem::default())
            .bundles(bundles)
            .engine(LineEngine)
            .build()
            .unwrap()
    }

    #[test]
    fn bundled_text_template_renders_model() {
        let factory = factory(MapBundle::default().with("Rust/Templates/Class.hbs", "struct $Name;"));
        let handle = factory
            .create_template(&rust(), "Class", &json!({ "Name": "Pet" }))
            .unwrap();
        assert!(handle.is_text());
        assert_eq!(handle.render().unwrap(), "struct Pet;\n");
    }

    #[test]
    fn render_is_repeatable() {
        let factory = factory(MapBundle::default().with("Rust/Templates/Class.hbs", "$__template"));
        let handle = factory.create_template(&rust(), "Class", &json!({})).unwrap();
        assert_eq!(handle.render().unwrap(), handle.render().unwrap());
    }

    #[test]
    fn override_directory_beats_bundle() {
        let mut fs = MapFilesystem::default();
        fs.0.insert(PathBuf::from("/custom/Class.hbs"), "custom".into());
        let factory = TemplateFactory::builder()
            .settings(TemplateSettings::default().with_template_directory("/custom"))
            .filesystem(fs)
            .bundles(MapBundle::default().with("Rust/Templates/Class.hbs", "bundled"))
            .engine(LineEngine)
            .build()
            .unwrap();

        assert_eq!(factory.render(&rust(), "Class", &json!({})).unwrap(), "custom\n");
    }

    #[test]
    fn compiled_template_is_the_fallback() {
        let factory = factory(MapBundle::default());
        factory
            .compiled()
            .register(&rust(), &"Enum".parse().unwrap(), |_| Box::new(Fixed("enum E {}")))
            .unwrap();

        let handle = factory.create_template(&rust(), "Enum", &json!({})).unwrap();
        assert!(!handle.is_text());
        assert_eq!(handle.render().unwrap(), "enum E {}");
    }

    #[test]
    fn missing_template_names_slot_and_language() {
        let factory = factory(MapBundle::default());
        let go: Language = "Go".parse().unwrap();
        let err = factory
            .create_template(&go, "Nonexistent", &json!({}))
            .unwrap_err();

        let StencilError::Application(inner) = &err else {
            panic!("expected an application error, got {err:?}");
        };
        assert!(err.is_template_not_found());
        assert_eq!(
            inner.to_string(),
            "Could not load template 'Nonexistent' for language 'Go'"
        );
    }

    #[test]
    fn try_create_template_reports_miss_as_none() {
        let factory = factory(MapBundle::default());
        let found = factory
            .try_create_template(&rust(), &"Nope".parse().unwrap(), json!({}))
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn invalid_name_is_a_domain_error() {
        let factory = factory(MapBundle::default());
        let err = factory
            .create_template(&rust(), "../Class", &json!({}))
            .unwrap_err();
        assert!(matches!(err, StencilError::Domain(_)));
    }

    #[test]
    fn missing_nested_template_emits_nothing() {
        let factory = factory(
            MapBundle::default().with("Rust/Templates/File.hbs", "start\n@include Missing 1\nend"),
        );
        assert_eq!(
            factory.render(&rust(), "File", &json!({})).unwrap(),
            "start\nend\n"
        );
    }

    #[test]
    fn nested_output_is_indented() {
        let factory = factory(
            MapBundle::default()
                .with("Rust/Templates/File.hbs", "mod m {\n@include Class 1\n}")
                .with("Rust/Templates/Class.hbs", "struct $Name;"),
        );
        assert_eq!(
            factory.render(&rust(), "File", &json!({ "Name": "Pet" })).unwrap(),
            "mod m {\n    struct Pet;\n    \n}\n"
        );
    }

    #[test]
    fn nested_template_sees_its_own_name() {
        let factory = factory(
            MapBundle::default()
                .with("Rust/Templates/File.hbs", "$__template\n@include Class 0")
                .with("Rust/Templates/Class.hbs", "$__template"),
        );
        assert_eq!(
            factory.render(&rust(), "File", &json!({})).unwrap(),
            "File\nClass\n\n"
        );
    }

    #[test]
    fn blank_directive_in_override_continues_with_bundle() {
        let mut fs = MapFilesystem::default();
        fs.0.insert(PathBuf::from("/custom/Class.hbs"), "// custom\n@include - 0".into());
        let factory = TemplateFactory::builder()
            .settings(TemplateSettings::default().with_template_directory("/custom"))
            .filesystem(fs)
            .bundles(MapBundle::default().with("Rust/Templates/Class.hbs", "struct $Name;"))
            .engine(LineEngine)
            .build()
            .unwrap();

        assert_eq!(
            factory.render(&rust(), "Class", &json!({ "Name": "Pet" })).unwrap(),
            "// custom\nstruct Pet;\n\n"
        );
    }

    #[test]
    fn self_inclusion_hits_depth_limit() {
        let factory = factory(
            MapBundle::default().with("Rust/Templates/Loop.hbs", "x\n@include Loop 0"),
        );
        let err = factory.render(&rust(), "Loop", &json!({})).unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::InclusionDepthExceeded { limit, .. })
                if limit == MAX_INCLUSION_DEPTH
        ));
    }

    #[test]
    fn nested_compiled_template_is_found_through_module() {
        struct RustModule;

        impl LanguageModule for RustModule {
            fn language(&self) -> Language {
                rust()
            }

            fn templates(&self) -> Vec<(TemplateName, CompiledTemplateCtor)> {
                let ctor: CompiledTemplateCtor =
                    Arc::new(|_: Model| -> Box<dyn CompiledTemplate> { Box::new(Fixed("fn f() {}")) });
                vec![("Method".parse().unwrap(), ctor)]
            }
        }

        let factory = factory(
            MapBundle::default().with("Rust/Templates/Class.hbs", "impl T {\n@include Method 1\n}"),
        );
        factory.compiled().register_module(Arc::new(RustModule)).unwrap();

        assert_eq!(
            factory.render(&rust(), "Class", &json!({})).unwrap(),
            "impl T {\n    fn f() {}\n}\n"
        );
    }

    #[test]
    fn builder_requires_engine() {
        let err = TemplateFactory::builder()
            .filesystem(MapFilesystem::default())
            .bundles(MapBundle::default())
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::AdapterNotConfigured { name: "engine" })
        ));
    }

    #[test]
    fn model_values_reach_the_context() {
        let factory = factory(MapBundle::default().with("Rust/Templates/Class.hbs", "$Kind"));

        #[derive(Serialize)]
        struct ClassModel {
            #[serde(rename = "Kind")]
            kind: &'static str,
        }

        assert_eq!(
            factory
                .render(&rust(), "Class", &ClassModel { kind: "struct" })
                .unwrap(),
            "struct\n"
        );
    }
}
