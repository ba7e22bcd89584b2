//! Parse cache: one parsed template per distinct raw source.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use handlebars::Template;
use stencil_core::{application::ApplicationError, error::StencilResult};
use tracing::trace;

use super::preprocess;

/// Thread-safe cache of parsed templates keyed by their raw source.
///
/// Clones share the same entries. Entries are never evicted; the cache lives
/// as long as its last owner.
#[derive(Clone, Default)]
pub struct ParseCache {
    entries: Arc<RwLock<HashMap<String, Arc<Template>>>>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed form of `raw`, preprocessing and parsing it on first use.
    ///
    /// No lock is held while parsing. If two callers race on the same source
    /// the entry inserted first is kept and returned to both.
    pub fn get_or_parse(&self, raw: &str) -> StencilResult<Arc<Template>> {
        if let Some(template) = self.get(raw)? {
            trace!(bytes = raw.len(), "Parse cache hit");
            return Ok(template);
        }

        trace!(bytes = raw.len(), "Parse cache miss");
        let parsed = Arc::new(parse(raw)?);

        let mut entries = self
            .entries
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(Arc::clone(entries.entry(raw.to_string()).or_insert(parsed)))
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(raw))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, raw: &str) -> StencilResult<Option<Arc<Template>>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(entries.get(raw).cloned())
    }
}

impl fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseCache")
            .field("entries", &self.len())
            .finish()
    }
}

fn parse(raw: &str) -> StencilResult<Template> {
    let canonical = preprocess::rewrite(raw);
    Template::compile(&canonical).map_err(|e| {
        ApplicationError::ParseFailed {
            reason: e.to_string(),
        }
        .into()
    })
}
