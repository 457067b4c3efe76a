use serde::{Deserialize, Serialize};

use super::super::domain::StartupType;
use super::templates::{BASELINE_RECOMMENDATION, RECOMMENDATION_BANDS};

/// Funding-stage guidance returned alongside the deep analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub investment_readiness: String,
    pub valuation_range: String,
    pub recommended_round: String,
    pub next_steps: Vec<String>,
}

pub(crate) fn recommendations(total_score: f64, startup_type: StartupType) -> Recommendations {
    let band = RECOMMENDATION_BANDS
        .iter()
        .find(|band| total_score >= band.floor)
        .unwrap_or(&BASELINE_RECOMMENDATION);
    let terms = match startup_type {
        StartupType::Idea => &band.idea,
        StartupType::Launched => &band.launched,
    };

    Recommendations {
        investment_readiness: terms.investment_readiness.to_string(),
        valuation_range: terms.valuation_range.to_string(),
        recommended_round: terms.recommended_round.to_string(),
        next_steps: band.next_steps.iter().map(|step| step.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_differ_by_startup_type() {
        let idea = recommendations(82.0, StartupType::Idea);
        let launched = recommendations(82.0, StartupType::Launched);

        assert_eq!(idea.recommended_round, "Seed");
        assert_eq!(launched.recommended_round, "Series A");
        assert_eq!(launched.valuation_range, "$10M+");
        assert_eq!(idea.next_steps, launched.next_steps);
        assert_eq!(idea.next_steps.len(), 4);
    }

    #[test]
    fn low_scores_fall_to_the_baseline_band() {
        let idea = recommendations(12.0, StartupType::Idea);
        assert_eq!(idea.investment_readiness, "Bootstrap/Accelerator");
        assert_eq!(idea.next_steps[1], "Develop minimum viable product (MVP)");

        let middle = recommendations(60.0, StartupType::Launched);
        assert_eq!(middle.investment_readiness, "Seed Ready");
    }
}
