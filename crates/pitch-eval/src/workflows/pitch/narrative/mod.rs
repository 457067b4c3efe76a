mod deep;
mod recommendations;
mod summary;
mod templates;

pub use recommendations::Recommendations;

use chrono::NaiveDate;

use super::domain::{FormData, StartupType};
use super::scoring::ScoreCard;

/// Turns scores and answers into report text. Never fails outward; rendering problems degrade
/// to fixed fallback strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Narrator;

impl Narrator {
    pub fn new() -> Self {
        Self
    }

    /// Verdict paragraph followed by observations drawn from team, market and traction answers.
    pub fn executive_summary(&self, card: &ScoreCard, form: &FormData) -> String {
        summary::executive_summary(card, form)
    }

    pub fn deep_analysis(
        &self,
        card: &ScoreCard,
        form: &FormData,
        startup_type: StartupType,
        generated_on: NaiveDate,
    ) -> String {
        deep::deep_analysis(card, form, startup_type, generated_on)
    }

    pub fn recommendations(&self, total_score: f64, startup_type: StartupType) -> Recommendations {
        recommendations::recommendations(total_score, startup_type)
    }
}
