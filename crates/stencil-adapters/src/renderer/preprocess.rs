//! Inclusion-syntax preprocessor.
//!
//! Template authors write `{% template NAME %}` on a line of its own; the
//! spaces in front of the marker set the indentation of the included text in
//! units of four. Before parsing, every such line becomes a call to the
//! directive helper:
//!
//! ```text
//! impl {{Name}} {                impl {{Name}} {
//!     {% template Method %}  =>  {{__include "Method" 1 this}}}
//! }
//! ```
//!
//! The marker's own line terminator is consumed; the helper writes one after
//! the included text, so a marker never leaves a blank line behind.

use std::sync::OnceLock;

use regex::Regex;
use stencil_core::domain::InclusionDirective;

/// Name of the Handlebars helper that renders inclusion directives.
pub const DIRECTIVE_HELPER: &str = "__include";

fn marker_line() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r#"^( *)\{%[ \t]*template(?:[ \t]+([^%"\r\n]*?))?[ \t]*%\}[ \t]*\r?$"#)
            .expect("inclusion marker pattern is valid")
    })
}

/// Rewrite every inclusion marker in `raw` into a directive helper call.
///
/// Only markers that follow a newline are recognised, so a marker on the very
/// first line stays literal text. Indentation that is not a multiple of four
/// truncates to the lower level.
pub fn rewrite(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_was_marker = false;

    for (i, line) in raw.split('\n').enumerate() {
        if i > 0 && !previous_was_marker {
            out.push('\n');
        }

        let captures = if i > 0 { marker_line().captures(line) } else { None };
        match captures {
            Some(caps) => {
                let spaces = caps.get(1).map_or(0, |m| m.len());
                let name = caps.get(2).map_or("", |m| m.as_str().trim());
                let directive = InclusionDirective::from_indentation(name, spaces);
                out.push_str(&directive_call(&directive));
                previous_was_marker = true;
            }
            None => {
                out.push_str(line);
                previous_was_marker = false;
            }
        }
    }

    out
}

fn directive_call(directive: &InclusionDirective) -> String {
    format!(
        "{{{{{} \"{}\" {} this}}}}",
        DIRECTIVE_HELPER,
        directive.name(),
        directive.depth()
    )
}
