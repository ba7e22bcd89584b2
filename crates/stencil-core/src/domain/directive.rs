//! Inclusion directives.
//!
//! Template authors write `{% template NAME %}` on its own line; the engine
//! adapter rewrites that marker into an engine directive carrying the target
//! name and the indentation depth observed at the marker, measured in units of
//! [`INDENT_WIDTH`] spaces.

use crate::domain::{DomainError, TemplateName};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// A parsed inclusion directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionDirective {
    name: String,
    depth: usize,
}

impl InclusionDirective {
    /// `name` may be empty: "continue the enclosing template".
    pub fn new(name: impl Into<String>, depth: usize) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }

    /// Directive for a marker preceded by `spaces` spaces.
    ///
    /// Indentation that is not a multiple of [`INDENT_WIDTH`] truncates to the
    /// lower level.
    pub fn from_indentation(name: impl Into<String>, spaces: usize) -> Self {
        Self::new(name, spaces / INDENT_WIDTH)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The template this directive resolves to when found inside `enclosing`.
    pub fn target(&self, enclosing: &TemplateName) -> Result<TemplateName, DomainError> {
        if self.name.trim().is_empty() {
            Ok(enclosing.continuation())
        } else {
            TemplateName::new(self.name.trim())
        }
    }

    /// Indent a nested render for emission at this directive.
    ///
    /// Empty output emits nothing. Otherwise every line, including blank
    /// ones, gets `depth` levels of indentation and one `\n` terminates the
    /// block.
    pub fn indent(&self, output: &str) -> Option<String> {
        if output.is_empty() {
            return None;
        }

        let padding = " ".repeat(self.depth * INDENT_WIDTH);
        let mut indented = String::with_capacity(output.len() + padding.len() * 4 + 1);
        for (i, line) in output.split('\n').enumerate() {
            if i > 0 {
                indented.push('\n');
            }
            indented.push_str(&padding);
            indented.push_str(line);
        }
        indented.push('\n');
        Some(indented)
    }
}
