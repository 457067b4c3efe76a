use serde::{Deserialize, Serialize};

use super::super::domain::{field, StartupType};

pub const DEFAULT_MIN_COMPLETION_MS: i64 = 180_000;

const IDEA_REQUIRED_FIELDS: &[&str] = &[
    field::TEAM_SIZE,
    field::FOUNDER_EXPERIENCE,
    field::TECHNICAL_EXPERTISE,
    field::DOMAIN_EXPERTISE,
    field::COMMITMENT_LEVEL,
    field::MARKET_SIZE_TAM,
    field::MARKET_SIZE_SOM,
    field::MARKET_GROWTH,
    field::MARKET_TIMING,
    field::CUSTOMER_SEGMENT,
    field::PROBLEM_SEVERITY,
    field::PROBLEM_FREQUENCY,
    field::CURRENT_SOLUTION,
    field::SOLUTION_UNIQUENESS,
    field::VALUE_PROPOSITION,
    field::DEFENSIBILITY,
    field::IP_PROTECTION,
    field::COMPETITIVE_TIMELINE,
    field::REVENUE_MODEL,
    field::PRICING_STRATEGY,
    field::UNIT_ECONOMICS_VISIBILITY,
    field::SCALABILITY,
    field::VALIDATION_TYPE,
    field::CUSTOMER_COUNT,
];

const LAUNCHED_EXTRA_FIELDS: &[&str] = &[
    field::CAC,
    field::LTV,
    field::PAYBACK_PERIOD,
    field::GROSS_MARGIN,
    field::CHURN_RATE,
    field::MRR,
    field::GROWTH_RATE,
    field::RUNWAY,
    field::FUNDING_AMOUNT,
    field::USE_OF_FUNDS,
];

/// Inclusive numeric bounds for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

/// Inclusive character-length bounds for a free-text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLength {
    pub field: String,
    pub min: usize,
    pub max: usize,
}

/// Rule tables consumed by the submission validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub idea_required: Vec<String>,
    pub launched_required: Vec<String>,
    pub email_fields: Vec<String>,
    pub numeric_ranges: Vec<NumericRange>,
    pub text_lengths: Vec<TextLength>,
    /// Free-text answers inspected for junk content.
    pub free_text_fields: Vec<String>,
    pub min_completion_ms: i64,
    /// Fields always treated as pick-one controls by the identical-answer check.
    pub selection_fields: Vec<String>,
    /// Name fragments that mark any other field as a pick-one control.
    pub selection_markers: Vec<String>,
    /// Name suffixes that exclude a field from the identical-answer check.
    pub free_text_suffixes: Vec<String>,
    pub min_distinct_selection_ratio: f64,
}

impl ValidationConfig {
    pub fn required_fields(&self, startup_type: StartupType) -> &[String] {
        match startup_type {
            StartupType::Idea => &self.idea_required,
            StartupType::Launched => &self.launched_required,
        }
    }

    pub fn with_min_completion_ms(mut self, min_completion_ms: i64) -> Self {
        self.min_completion_ms = min_completion_ms.max(0);
        self
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let owned = |fields: &[&str]| {
            fields
                .iter()
                .map(|name| name.to_string())
                .collect::<Vec<_>>()
        };

        let idea_required = owned(IDEA_REQUIRED_FIELDS);
        let mut launched_required = idea_required.clone();
        launched_required.extend(owned(LAUNCHED_EXTRA_FIELDS));

        let range = |name: &str, min: f64, max: f64| NumericRange {
            field: name.to_string(),
            min,
            max,
        };
        let length = |name: &str| TextLength {
            field: name.to_string(),
            min: 20,
            max: 1000,
        };

        let free_text = [
            field::CUSTOMER_SEGMENT,
            field::VALUE_PROPOSITION,
            field::PRICING_STRATEGY,
            field::USE_OF_FUNDS,
        ];

        Self {
            idea_required,
            launched_required,
            email_fields: owned(&[field::FOUNDER_EMAIL, field::CONTACT_EMAIL]),
            numeric_ranges: vec![
                range(field::CAC, 0.0, 10_000.0),
                range(field::LTV, 0.0, 50_000.0),
                range(field::PAYBACK_PERIOD, 0.0, 60.0),
                range(field::GROSS_MARGIN, 0.0, 100.0),
                range(field::CHURN_RATE, 0.0, 100.0),
                range(field::GROWTH_RATE, -50.0, 150.0),
                range(field::RUNWAY, 0.0, 120.0),
            ],
            text_lengths: free_text.iter().map(|name| length(name)).collect(),
            free_text_fields: owned(&free_text),
            min_completion_ms: DEFAULT_MIN_COMPLETION_MS,
            selection_fields: owned(&[
                field::TEAM_SIZE,
                field::MARKET_SIZE_TAM,
                field::MARKET_SIZE_SOM,
            ]),
            selection_markers: owned(&["select", "radio"]),
            free_text_suffixes: owned(&["textarea", "segment", "proposition", "strategy", "funds"]),
            min_distinct_selection_ratio: 0.3,
        }
    }
}
