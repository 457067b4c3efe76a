use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{field, FieldValue, FormData, SessionMetadata};
use super::config::ValidationConfig;

pub const BOT_DETECTION_FLAG: &str = "Bot detection triggered";
pub const IDENTICAL_RESPONSES_FLAG: &str = "Suspicious pattern of identical responses detected";

const MIN_WORDS: usize = 3;
const MAX_CHARACTER_RUN: usize = 10;

static JUNK_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn junk_patterns() -> &'static [Regex] {
    JUNK_PATTERNS.get_or_init(|| {
        [
            r"test\s*test\s*test",
            r"lorem\s*ipsum",
            r"asdf+",
            r"qwer+ty",
            r"zxcv+",
            r"^\s*$",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("junk pattern compiles"))
        .collect()
    })
}

pub(crate) fn anti_gaming_flags(
    form: &FormData,
    session: &SessionMetadata,
    config: &ValidationConfig,
    now_ms: i64,
) -> Vec<String> {
    let mut flags = Vec::new();

    if honeypot_tripped(form, session) {
        flags.push(BOT_DETECTION_FLAG.to_string());
    }

    if let Some(start_time) = session.start_time {
        let elapsed = now_ms.saturating_sub(start_time);
        if elapsed < config.min_completion_ms {
            flags.push(format!(
                "Form completed too quickly ({:.1}s, minimum is {:.1}s)",
                elapsed as f64 / 1000.0,
                config.min_completion_ms as f64 / 1000.0
            ));
        }
    }

    for name in &config.free_text_fields {
        let Some(value) = form.get(name).filter(|value| !value.is_blank()) else {
            continue;
        };
        if is_suspicious_text(&value.to_string()) {
            flags.push(format!("Suspicious content detected in '{name}'"));
        }
    }

    if has_low_entropy_selections(form, config) {
        flags.push(IDENTICAL_RESPONSES_FLAG.to_string());
    }

    flags
}

fn honeypot_tripped(form: &FormData, session: &SessionMetadata) -> bool {
    let form_slot = form.get(field::HONEYPOT).map(is_truthy).unwrap_or(false);
    let session_slot = session
        .honeypot
        .as_deref()
        .map(|value| !value.is_empty())
        .unwrap_or(false);
    form_slot || session_slot
}

/// `false` and `0` leave the trap untouched, like an empty value.
fn is_truthy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Flag(flag) => *flag,
        FieldValue::Number(number) => *number != 0.0,
        other => !other.is_blank(),
    }
}

pub(crate) fn is_suspicious_text(raw: &str) -> bool {
    let text = raw.to_lowercase();

    if junk_patterns().iter().any(|pattern| pattern.is_match(&text)) {
        return true;
    }

    if longest_character_run(&text) > MAX_CHARACTER_RUN {
        return true;
    }

    text.split_whitespace().count() < MIN_WORDS
}

fn longest_character_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;

    for ch in text.chars() {
        if ch.is_whitespace() {
            current = 0;
            previous = None;
            continue;
        }
        current = if previous == Some(ch) { current + 1 } else { 1 };
        previous = Some(ch);
        longest = longest.max(current);
    }

    longest
}

fn is_selection_field(name: &str, config: &ValidationConfig) -> bool {
    if config
        .free_text_suffixes
        .iter()
        .any(|suffix| name.ends_with(suffix.as_str()))
    {
        return false;
    }

    config.selection_fields.iter().any(|field| field == name)
        || config
            .selection_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
}

fn has_low_entropy_selections(form: &FormData, config: &ValidationConfig) -> bool {
    let picks: Vec<&str> = form
        .iter()
        .filter(|(name, _)| !name.starts_with('_'))
        .filter(|(name, _)| is_selection_field(name, config))
        .filter_map(|(_, value)| match value {
            FieldValue::Text(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if picks.is_empty() {
        return false;
    }

    let distinct: BTreeSet<&str> = picks.iter().copied().collect();
    (distinct.len() as f64 / picks.len() as f64) < config.min_distinct_selection_ratio
}
