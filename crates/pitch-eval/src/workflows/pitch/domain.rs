use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field identifiers the pipeline reasons about directly.
pub mod field {
    pub const HONEYPOT: &str = "_bot_field";

    pub const TEAM_SIZE: &str = "team-size";
    pub const FOUNDER_EXPERIENCE: &str = "founder-experience";
    pub const TECHNICAL_EXPERTISE: &str = "technical-expertise";
    pub const DOMAIN_EXPERTISE: &str = "domain-expertise";
    pub const COMMITMENT_LEVEL: &str = "commitment-level";

    pub const MARKET_SIZE_TAM: &str = "market-size-tam";
    pub const MARKET_SIZE_SOM: &str = "market-size-som";
    pub const MARKET_GROWTH: &str = "market-growth";
    pub const MARKET_TIMING: &str = "market-timing";
    pub const CUSTOMER_SEGMENT: &str = "customer-segment";

    pub const PROBLEM_SEVERITY: &str = "problem-severity";
    pub const PROBLEM_FREQUENCY: &str = "problem-frequency";
    pub const CURRENT_SOLUTION: &str = "current-solution";
    pub const SOLUTION_UNIQUENESS: &str = "solution-uniqueness";
    pub const VALUE_PROPOSITION: &str = "value-proposition";

    pub const DEFENSIBILITY: &str = "defensibility";
    pub const IP_PROTECTION: &str = "ip-protection";
    pub const COMPETITIVE_TIMELINE: &str = "competitive-timeline";

    pub const REVENUE_MODEL: &str = "revenue-model";
    pub const PRICING_STRATEGY: &str = "pricing-strategy";
    pub const UNIT_ECONOMICS_VISIBILITY: &str = "unit-economics-visibility";
    pub const SCALABILITY: &str = "scalability";

    pub const VALIDATION_TYPE: &str = "validation-type";
    pub const CUSTOMER_COUNT: &str = "customer-count";

    pub const CAC: &str = "cac";
    pub const LTV: &str = "ltv";
    pub const PAYBACK_PERIOD: &str = "payback-period";
    pub const GROSS_MARGIN: &str = "gross-margin";
    pub const CHURN_RATE: &str = "churn-rate";

    pub const MRR: &str = "mrr";
    pub const GROWTH_RATE: &str = "growth-rate";
    pub const RUNWAY: &str = "runway";
    pub const FUNDING_AMOUNT: &str = "funding-amount";
    pub const USE_OF_FUNDS: &str = "use-of-funds";

    pub const FOUNDER_EMAIL: &str = "founder-email";
    pub const CONTACT_EMAIL: &str = "contact-email";
}

/// Identifier wrapper for persisted evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(pub String);

impl EvaluationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maturity of the startup being pitched; launched startups answer the finance sections too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupType {
    Idea,
    Launched,
}

impl StartupType {
    pub const fn label(self) -> &'static str {
        match self {
            StartupType::Idea => "idea",
            StartupType::Launched => "launched",
        }
    }
}

/// Single questionnaire answer. Dispatch over the variant drives sanitizing and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Flag(bool),
    Empty,
}

impl FieldValue {
    /// Empty strings, empty lists and nulls all count as unanswered.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Empty => true,
            FieldValue::Number(_) | FieldValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numbers, and text that parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{value:.0}")
            }
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Questionnaire answers keyed by field id, kept in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, FieldValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(FieldValue::as_number)
    }

    /// Present and not blank.
    pub fn is_answered(&self, field: &str) -> bool {
        self.get(field).map(|value| !value.is_blank()).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for FormData {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Signals captured by the questionnaire session alongside the answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Epoch milliseconds when the questionnaire was opened.
    #[serde(default, deserialize_with = "deserialize_epoch_millis")]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub honeypot: Option<String>,
    #[serde(default)]
    pub user_uuid: Option<String>,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

fn deserialize_epoch_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value as i64))
            .map(Some)
            .ok_or_else(|| de::Error::custom("start_time is out of range")),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|err| de::Error::custom(format!("start_time '{raw}' is not epoch millis ({err})"))),
        Some(other) => Err(de::Error::custom(format!(
            "start_time must be epoch milliseconds, found {other}"
        ))),
    }
}

/// Inbound questionnaire submission. Transient; only the sanitized answers are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub startup_type: StartupType,
    pub form_data: FormData,
    #[serde(default)]
    pub session_metadata: SessionMetadata,
}

/// Cluster of questionnaire fields scored together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    FoundingTeam,
    MarketOpportunity,
    ProblemSolutionFit,
    CompetitiveAdvantage,
    BusinessModel,
    ValidationTraction,
    UnitEconomics,
    FinancialsCapital,
}

const IDEA_SECTIONS: &[Section] = &[
    Section::FoundingTeam,
    Section::MarketOpportunity,
    Section::ProblemSolutionFit,
    Section::CompetitiveAdvantage,
    Section::BusinessModel,
    Section::ValidationTraction,
];

const LAUNCHED_SECTIONS: &[Section] = &[
    Section::FoundingTeam,
    Section::MarketOpportunity,
    Section::ProblemSolutionFit,
    Section::CompetitiveAdvantage,
    Section::BusinessModel,
    Section::ValidationTraction,
    Section::UnitEconomics,
    Section::FinancialsCapital,
];

impl Section {
    pub fn for_startup(startup_type: StartupType) -> &'static [Section] {
        match startup_type {
            StartupType::Idea => IDEA_SECTIONS,
            StartupType::Launched => LAUNCHED_SECTIONS,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Section::FoundingTeam => "founding-team",
            Section::MarketOpportunity => "market-opportunity",
            Section::ProblemSolutionFit => "problem-solution-fit",
            Section::CompetitiveAdvantage => "competitive-advantage",
            Section::BusinessModel => "business-model",
            Section::ValidationTraction => "validation-traction",
            Section::UnitEconomics => "unit-economics",
            Section::FinancialsCapital => "financials-capital",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Section::FoundingTeam => "Founding Team",
            Section::MarketOpportunity => "Market Opportunity",
            Section::ProblemSolutionFit => "Problem/Solution Fit",
            Section::CompetitiveAdvantage => "Competitive Advantage",
            Section::BusinessModel => "Business Model",
            Section::ValidationTraction => "Validation & Traction",
            Section::UnitEconomics => "Unit Economics",
            Section::FinancialsCapital => "Financials & Capital",
        }
    }

    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Section::FoundingTeam => &[
                field::TEAM_SIZE,
                field::FOUNDER_EXPERIENCE,
                field::TECHNICAL_EXPERTISE,
                field::DOMAIN_EXPERTISE,
                field::COMMITMENT_LEVEL,
            ],
            Section::MarketOpportunity => &[
                field::MARKET_SIZE_TAM,
                field::MARKET_SIZE_SOM,
                field::MARKET_GROWTH,
                field::MARKET_TIMING,
                field::CUSTOMER_SEGMENT,
            ],
            Section::ProblemSolutionFit => &[
                field::PROBLEM_SEVERITY,
                field::PROBLEM_FREQUENCY,
                field::CURRENT_SOLUTION,
                field::SOLUTION_UNIQUENESS,
                field::VALUE_PROPOSITION,
            ],
            Section::CompetitiveAdvantage => &[
                field::DEFENSIBILITY,
                field::IP_PROTECTION,
                field::COMPETITIVE_TIMELINE,
            ],
            Section::BusinessModel => &[
                field::REVENUE_MODEL,
                field::PRICING_STRATEGY,
                field::UNIT_ECONOMICS_VISIBILITY,
                field::SCALABILITY,
            ],
            Section::ValidationTraction => &[field::VALIDATION_TYPE, field::CUSTOMER_COUNT],
            Section::UnitEconomics => &[
                field::CAC,
                field::LTV,
                field::PAYBACK_PERIOD,
                field::GROSS_MARGIN,
                field::CHURN_RATE,
            ],
            Section::FinancialsCapital => &[
                field::MRR,
                field::GROWTH_RATE,
                field::RUNWAY,
                field::FUNDING_AMOUNT,
                field::USE_OF_FUNDS,
            ],
        }
    }
}
