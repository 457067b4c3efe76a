//! Markup stripping and entity escaping applied to every answer before validation.
//!
//! Escaping leaves existing entities untouched so that running the sanitizer over its own output
//! is a no-op.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::{FieldValue, FormData};

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

const KNOWN_ENTITIES: &[&str] = &["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"];

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"))
}

/// Sanitize every string (and string list element) in the form. Other values pass through.
pub fn sanitize_form(form: &FormData) -> FormData {
    form.iter()
        .map(|(field, value)| (field.to_string(), sanitize_value(value)))
        .collect()
}

pub fn sanitize_value(value: &FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => FieldValue::Text(sanitize_text(text)),
        FieldValue::List(items) => {
            FieldValue::List(items.iter().map(|item| sanitize_text(item)).collect())
        }
        other => other.clone(),
    }
}

pub fn sanitize_text(raw: &str) -> String {
    let stripped = tag_pattern().replace_all(raw, "");
    escape_entities(&stripped)
}

fn escape_entities(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (index, ch) in text.char_indices() {
        match ch {
            '&' if KNOWN_ENTITIES
                .iter()
                .any(|entity| text[index..].starts_with(entity)) =>
            {
                escaped.push('&')
            }
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
