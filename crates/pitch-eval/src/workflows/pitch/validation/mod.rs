mod anti_gaming;
mod config;
mod rules;

pub use anti_gaming::{BOT_DETECTION_FLAG, IDENTICAL_RESPONSES_FLAG};
pub use config::{NumericRange, TextLength, ValidationConfig, DEFAULT_MIN_COMPLETION_MS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{FormData, SessionMetadata, StartupType};

/// Outcome of validating a submission. Correctness errors and gaming signals are kept apart so
/// callers can decide how hard to block on each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub validation_errors: Vec<String>,
    pub anti_gaming_flags: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty() && self.anti_gaming_flags.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} validation error(s), {} anti-gaming flag(s)",
            self.validation_errors.len(),
            self.anti_gaming_flags.len()
        )
    }
}

/// Stateless validator applying the configured rule tables.
#[derive(Debug, Clone, Default)]
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Run every check; failures accumulate and nothing short-circuits. `now` anchors the
    /// dwell-time check so the function stays free of clock reads.
    pub fn validate(
        &self,
        form: &FormData,
        session: &SessionMetadata,
        startup_type: StartupType,
        now: DateTime<Utc>,
    ) -> ValidationReport {
        let mut validation_errors = rules::required_field_errors(form, &self.config, startup_type);
        validation_errors.extend(rules::format_errors(form, &self.config));
        validation_errors.extend(rules::business_logic_errors(form));

        let anti_gaming_flags =
            anti_gaming::anti_gaming_flags(form, session, &self.config, now.timestamp_millis());

        ValidationReport {
            validation_errors,
            anti_gaming_flags,
        }
    }
}
