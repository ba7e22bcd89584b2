//! Handlebars implementation of the `TemplateEngine` port.
//!
//! Every render gets its own registry with HTML escaping disabled, the
//! code-generation helpers and an [`IncludeHelper`] bound to the caller's
//! `IncludeResolver`. Parsed templates come from the shared [`ParseCache`].

use std::{collections::VecDeque, sync::Mutex};

use handlebars::{
    BlockContext, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason, Renderable, StringOutput,
};
use serde_json::{Map, Value};
use stencil_core::{
    application::{
        ApplicationError,
        ports::{IncludeResolver, TemplateEngine},
    },
    domain::{InclusionDirective, RenderContext as TemplateContext, TEMPLATE_KEY},
    error::{StencilError, StencilResult},
};
use tracing::instrument;

use super::{ParseCache, helpers, preprocess::DIRECTIVE_HELPER};

/// Text template engine backed by Handlebars.
#[derive(Debug, Clone, Default)]
pub struct HandlebarsEngine {
    cache: ParseCache,
}

impl HandlebarsEngine {
    /// Create an engine with its own empty parse cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that shares `cache` with other engines.
    pub fn with_cache(cache: ParseCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }
}

impl TemplateEngine for HandlebarsEngine {
    #[instrument(skip_all, fields(template = active_template(context)))]
    fn render(
        &self,
        source: &str,
        context: &TemplateContext,
        includes: &dyn IncludeResolver,
    ) -> StencilResult<String> {
        let template = self.cache.get_or_parse(source)?;

        let failure = Mutex::new(None);
        let registry = registry(includes, &failure);
        let data = Context::wraps(context.as_map())
            .map_err(|e| rendering_failed(context, e.to_string()))?;

        let mut render_context = RenderContext::new(None);
        let mut output = StringOutput::new();
        let rendered = template.render(&registry, &data, &mut render_context, &mut output);

        // A failure raised by a nested template wins over the engine's wrapper error.
        if let Some(err) = failure.lock().ok().and_then(|mut slot| slot.take()) {
            return Err(err);
        }
        rendered.map_err(|e| rendering_failed(context, e.to_string()))?;

        output
            .into_string()
            .map_err(|e| rendering_failed(context, e.to_string()))
    }
}

fn registry<'a>(
    includes: &'a dyn IncludeResolver,
    failure: &'a Mutex<Option<StencilError>>,
) -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_helper(DIRECTIVE_HELPER, Box::new(IncludeHelper { includes, failure }));
    helpers::register(&mut registry);
    registry
}

fn active_template(context: &TemplateContext) -> &str {
    context
        .get(TEMPLATE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
}

fn rendering_failed(context: &TemplateContext, reason: String) -> StencilError {
    ApplicationError::RenderingFailed {
        template: active_template(context).to_string(),
        reason,
    }
    .into()
}

/// Renders `{{__include "NAME" DEPTH this}}` directives.
///
/// Every visible scope is flattened into one mapping (root context first,
/// then each enclosing `each`/`with` block outward in, the current `this` on
/// top) and handed to the resolver as the nested template's model. Resolver errors are parked in `failure` so the engine
/// can return them unchanged after Handlebars unwinds.
pub struct IncludeHelper<'a> {
    includes: &'a dyn IncludeResolver,
    failure: &'a Mutex<Option<StencilError>>,
}

impl IncludeHelper<'_> {
    fn fail(&self, err: StencilError) -> HelperResult {
        let message = err.to_string();
        if let Ok(mut slot) = self.failure.lock() {
            slot.get_or_insert(err);
        }
        Err(RenderErrorReason::Other(message).into())
    }
}

impl HelperDef for IncludeHelper<'_> {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper,
        _: &Handlebars,
        ctx: &Context,
        rc: &mut RenderContext,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = h
            .param(0)
            .and_then(|p| p.value().as_str())
            .unwrap_or_default();
        let depth = h
            .param(1)
            .and_then(|p| p.value().as_u64())
            .unwrap_or_default() as usize;
        let directive = InclusionDirective::new(name, depth);

        let mut layers = vec![ctx.data().clone()];
        layers.extend(block_scopes(ctx.data(), rc));
        layers.extend(h.param(2).map(|p| p.value().clone()));
        let scope = flatten_scope(layers);

        match self.includes.include(&directive, scope) {
            Ok(Some(text)) => {
                out.write(&text)?;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(err) => self.fail(err),
        }
    }
}

/// Values of the open block scopes, outermost first.
fn block_scopes(root: &Value, rc: &mut RenderContext) -> Vec<Value> {
    // The stack is only reachable by swapping it out; it goes back untouched.
    let blocks = rc.replace_blocks(VecDeque::new());
    let scopes = blocks
        .iter()
        .rev()
        .filter_map(|block| block_value(root, block))
        .collect();
    rc.replace_blocks(blocks);
    scopes
}

fn block_value(root: &Value, block: &BlockContext) -> Option<Value> {
    if let Some(value) = block.base_value() {
        return Some(value.clone());
    }
    block
        .base_path()
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(fields) => fields.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .cloned()
}

/// Outer scope first, inner scope fields override.
fn flatten_scope(layers: Vec<Value>) -> Value {
    let mut scope = Map::new();
    for layer in layers {
        if let Value::Object(fields) = layer {
            scope.extend(fields);
        }
    }
    Value::Object(scope)
}
