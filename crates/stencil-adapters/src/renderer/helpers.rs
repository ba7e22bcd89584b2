//! Code-generation helpers available to every template.
//!
//! - `{{lowercamelcase Name}}`: `pet_store` → `petStore`
//! - `{{uppercamelcase Name}}`: `pet_store` → `PetStore`
//! - `{{snakecase Name}}`: `PetStore` → `pet_store`
//! - `{{tab Body 1}}`: indents every line after the first by 4 spaces per level

use handlebars::{Handlebars, handlebars_helper};
use stencil_core::domain::INDENT_WIDTH;

handlebars_helper!(lowercamelcase: |s: str| to_lower_camel_case(s));
handlebars_helper!(uppercamelcase: |s: str| to_upper_camel_case(s));
handlebars_helper!(snakecase: |s: str| to_snake_case(s));
handlebars_helper!(tab: |s: str, levels: u64| indent_continuation(s, levels as usize));

/// Register all code-generation helpers on `registry`.
pub fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("lowercamelcase", Box::new(lowercamelcase));
    registry.register_helper("uppercamelcase", Box::new(uppercamelcase));
    registry.register_helper("snakecase", Box::new(snakecase));
    registry.register_helper("tab", Box::new(tab));
}

/// Converts camelCase, PascalCase, kebab-case and spaced words to snake_case.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if matches!(ch, '-' | '_' | ' ') {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_end_matches('_').to_string()
}

/// PascalCase, normalised through [`to_snake_case`].
pub fn to_upper_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

/// camelCase: like [`to_upper_camel_case`] with the first word lowercase.
pub fn to_lower_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(i, word)| if i == 0 { word.to_string() } else { capitalize(word) })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Prefix every line but the first with `levels` indentation levels.
pub fn indent_continuation(s: &str, levels: usize) -> String {
    let padding = " ".repeat(levels * INDENT_WIDTH);
    s.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{padding}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
