use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{field, FieldValue, FormData, StartupType};
use super::config::ValidationConfig;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// One error per required field that is absent, empty, or an empty list.
pub(crate) fn required_field_errors(
    form: &FormData,
    config: &ValidationConfig,
    startup_type: StartupType,
) -> Vec<String> {
    config
        .required_fields(startup_type)
        .iter()
        .filter(|name| !form.is_answered(name))
        .map(|name| format!("Field '{name}' is required"))
        .collect()
}

/// Email shape, numeric range, and text length checks. Blank answers are left to the
/// required-field check so a missing field is reported exactly once.
pub(crate) fn format_errors(form: &FormData, config: &ValidationConfig) -> Vec<String> {
    let mut errors = Vec::new();

    for name in &config.email_fields {
        if let Some(value) = answered(form, name) {
            if !email_pattern().is_match(&value.to_string()) {
                errors.push(format!("Invalid email format in '{name}'"));
            }
        }
    }

    for range in &config.numeric_ranges {
        let Some(value) = answered(form, &range.field) else {
            continue;
        };
        match value.as_number() {
            Some(number) if (range.min..=range.max).contains(&number) => {}
            Some(_) => errors.push(format!(
                "Value for '{}' must be between {} and {}",
                range.field, range.min, range.max
            )),
            None => errors.push(format!("Invalid numeric value for '{}'", range.field)),
        }
    }

    for bounds in &config.text_lengths {
        if let Some(value) = answered(form, &bounds.field) {
            let length = value.to_string().chars().count();
            if length < bounds.min || length > bounds.max {
                errors.push(format!(
                    "Text for '{}' must be between {} and {} characters",
                    bounds.field, bounds.min, bounds.max
                ));
            }
        }
    }

    errors
}

/// Cross-field consistency rules.
pub(crate) fn business_logic_errors(form: &FormData) -> Vec<String> {
    let mut errors = Vec::new();
    let number = |name: &str| answered(form, name).and_then(FieldValue::as_number);

    if let (Some(cac), Some(ltv)) = (number(field::CAC), number(field::LTV)) {
        if ltv <= cac {
            errors.push(
                "Lifetime Value (LTV) should be greater than Customer Acquisition Cost (CAC)"
                    .to_string(),
            );
        }
    }

    let tam = form.text(field::MARKET_SIZE_TAM);
    let som = form.text(field::MARKET_SIZE_SOM);
    if tam == Some("under-100m") && matches!(som, Some("100m-500m") | Some("over-500m")) {
        errors.push("Serviceable market cannot be larger than total addressable market".to_string());
    }

    if number(field::GROWTH_RATE).is_some_and(|rate| rate > 150.0) {
        errors.push("Growth rate above 150% seems unrealistic".to_string());
    }

    // Overlaps the churn range check; both messages are reported.
    if number(field::CHURN_RATE).is_some_and(|rate| rate > 100.0) {
        errors.push("Churn rate cannot exceed 100%".to_string());
    }

    errors
}

fn answered<'a>(form: &'a FormData, name: &str) -> Option<&'a FieldValue> {
    form.get(name).filter(|value| !value.is_blank())
}
