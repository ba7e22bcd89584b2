//! Compiled Template Registry - the fallback when no text template exists.
//!
//! Compiled templates are registered under the type identifier derived from
//! `(language, name)`. Languages can also contribute a [`LanguageModule`]
//! that is only loaded the first time a lookup for that language misses.
//! Loading runs once per module; concurrent lookups wait for it to finish.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, RwLock},
};

use tracing::debug;

use crate::{
    application::{
        ApplicationError,
        ports::{CompiledTemplate, CompiledTemplateCtor, LanguageModule},
    },
    domain::{Language, Model, TemplateName, compiled_type_name},
    error::StencilResult,
};

/// Thread-safe registry of compiled template constructors.
#[derive(Clone, Default)]
pub struct CompiledTemplateRegistry {
    constructors: Arc<RwLock<HashMap<String, CompiledTemplateCtor>>>,
    modules: Arc<RwLock<HashMap<Language, Arc<ModuleSlot>>>>,
}

struct ModuleSlot {
    module: Arc<dyn LanguageModule>,
    loaded: OnceLock<StencilResult<()>>,
}

impl CompiledTemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for `(language, name)`.
    ///
    /// Registering the same slot twice replaces the earlier constructor.
    pub fn register<F>(&self, language: &Language, name: &TemplateName, ctor: F) -> StencilResult<()>
    where
        F: Fn(Model) -> Box<dyn CompiledTemplate> + Send + Sync + 'static,
    {
        self.register_ctor(language, name, Arc::new(ctor))
    }

    /// Register an already shared constructor.
    pub fn register_ctor(
        &self,
        language: &Language,
        name: &TemplateName,
        ctor: CompiledTemplateCtor,
    ) -> StencilResult<()> {
        let mut constructors = self
            .constructors
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        constructors.insert(compiled_type_name(language, name), ctor);
        Ok(())
    }

    /// Register a module whose templates load on the first miss for its language.
    pub fn register_module(&self, module: Arc<dyn LanguageModule>) -> StencilResult<()> {
        let mut modules = self
            .modules
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        modules.insert(
            module.language(),
            Arc::new(ModuleSlot {
                module,
                loaded: OnceLock::new(),
            }),
        );
        Ok(())
    }

    /// Whether a constructor is registered for `(language, name)` right now.
    pub fn contains(&self, language: &Language, name: &TemplateName) -> bool {
        self.constructors
            .read()
            .map(|c| c.contains_key(&compiled_type_name(language, name)))
            .unwrap_or(false)
    }

    /// Instantiate the compiled template for `(language, name)` with `model`.
    ///
    /// Returns `Ok(None)` when neither a registered constructor nor the
    /// language's module provides one.
    pub fn resolve(
        &self,
        language: &Language,
        name: &TemplateName,
        model: Model,
    ) -> StencilResult<Option<Box<dyn CompiledTemplate>>> {
        let type_name = compiled_type_name(language, name);

        let ctor = match self.lookup(&type_name)? {
            Some(ctor) => Some(ctor),
            None if self.load_module(language)? => self.lookup(&type_name)?,
            None => None,
        };

        Ok(ctor.map(|ctor| {
            debug!(%type_name, "Compiled template found");
            ctor(model)
        }))
    }

    fn lookup(&self, type_name: &str) -> StencilResult<Option<CompiledTemplateCtor>> {
        let constructors = self
            .constructors
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(constructors.get(type_name).cloned())
    }

    /// Load the module for `language` unless already loaded. Returns whether
    /// the language has a module at all.
    fn load_module(&self, language: &Language) -> StencilResult<bool> {
        let slot = {
            let modules = self
                .modules
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?;
            modules.get(language).cloned()
        };

        let Some(slot) = slot else {
            return Ok(false);
        };

        slot.loaded
            .get_or_init(|| self.install(language, slot.module.as_ref()))
            .clone()?;
        Ok(true)
    }

    fn install(&self, language: &Language, module: &dyn LanguageModule) -> StencilResult<()> {
        let templates = module.templates();
        debug!(%language, count = templates.len(), "Loading language module");
        for (name, ctor) in templates {
            self.register_ctor(language, &name, ctor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
        time::Duration,
    };

    struct Echo(Model);

    impl CompiledTemplate for Echo {
        fn render(&self) -> StencilResult<String> {
            Ok(self.0.get("Name").and_then(Value::as_str).unwrap_or("?").to_string())
        }
    }

    struct GoModule {
        loads: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl GoModule {
        fn new(loads: &Arc<AtomicUsize>) -> Self {
            Self {
                loads: Arc::clone(loads),
                delay: Duration::ZERO,
            }
        }
    }

    impl LanguageModule for GoModule {
        fn language(&self) -> Language {
            "Go".parse().unwrap()
        }

        fn templates(&self) -> Vec<(TemplateName, CompiledTemplateCtor)> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(self.delay);
            let ctor: CompiledTemplateCtor =
                Arc::new(|model: Model| -> Box<dyn CompiledTemplate> { Box::new(Echo(model)) });
            vec![("Struct".parse().unwrap(), ctor)]
        }
    }

    fn lang(value: &str) -> Language {
        value.parse().unwrap()
    }

    fn name(value: &str) -> TemplateName {
        value.parse().unwrap()
    }

    #[test]
    fn registered_constructor_receives_model() {
        let registry = CompiledTemplateRegistry::new();
        registry
            .register(&lang("Rust"), &name("Enum"), |model| Box::new(Echo(model)))
            .unwrap();

        let template = registry
            .resolve(&lang("Rust"), &name("Enum"), json!({ "Name": "Color" }))
            .unwrap()
            .unwrap();
        assert_eq!(template.render().unwrap(), "Color");
    }

    #[test]
    fn marker_is_ignored_for_lookup() {
        let registry = CompiledTemplateRegistry::new();
        registry
            .register(&lang("Rust"), &name("Enum"), |model| Box::new(Echo(model)))
            .unwrap();
        assert!(registry.contains(&lang("Rust"), &name("Enum!")));
    }

    #[test]
    fn unknown_template_is_none() {
        let registry = CompiledTemplateRegistry::new();
        assert!(
            registry
                .resolve(&lang("Go"), &name("Nonexistent"), json!({}))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn language_module_loads_once_on_first_miss() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = CompiledTemplateRegistry::new();
        registry
            .register_module(Arc::new(GoModule::new(&loads)))
            .unwrap();
        assert!(!registry.contains(&lang("Go"), &name("Struct")));

        let first = registry
            .resolve(&lang("Go"), &name("Struct"), json!({ "Name": "Pet" }))
            .unwrap();
        assert!(first.is_some());

        let missing = registry
            .resolve(&lang("Go"), &name("Interface"), json!({}))
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn modules_of_other_languages_stay_pending() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = CompiledTemplateRegistry::new();
        registry
            .register_module(Arc::new(GoModule::new(&loads)))
            .unwrap();

        registry
            .resolve(&lang("Rust"), &name("Struct"), json!({}))
            .unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn concurrent_lookups_wait_for_a_slow_module() {
        let loads = Arc::new(AtomicUsize::new(0));
        let registry = CompiledTemplateRegistry::new();
        registry
            .register_module(Arc::new(GoModule {
                delay: Duration::from_millis(300),
                ..GoModule::new(&loads)
            }))
            .unwrap();

        let found: Vec<bool> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let registry = &registry;
                    scope.spawn(move || {
                        thread::sleep(Duration::from_millis(50 * i));
                        registry
                            .resolve(&lang("Go"), &name("Struct"), json!({}))
                            .unwrap()
                            .is_some()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(found, vec![true; 4]);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }
}
