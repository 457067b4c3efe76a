mod matrix;
mod rules;
mod verdict;

pub use matrix::{ScoringMatrix, SectionWeights};
pub use rules::NEUTRAL_SCORE;
pub use verdict::{Verdict, VerdictCategory};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use super::domain::{FieldValue, FormData, Section, StartupType};

/// Scores for one submission: a 0-100 total plus a 0-10 score per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total_score: f64,
    pub section_scores: BTreeMap<Section, f64>,
    pub verdict: Verdict,
}

impl ScoreCard {
    /// Returned when scoring cannot produce a finite result.
    pub fn failed() -> Self {
        Self {
            total_score: 0.0,
            section_scores: BTreeMap::new(),
            verdict: Verdict::for_category(VerdictCategory::Error),
        }
    }
}

#[derive(Debug, Error)]
enum ScoringError {
    #[error("section '{0}' produced a non-finite score")]
    NonFiniteSection(&'static str),
    #[error("weighted total is not finite")]
    NonFiniteTotal,
}

/// Deterministic scorer over the static matrix and section weights.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    matrix: &'static ScoringMatrix,
    weights: &'static SectionWeights,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            matrix: ScoringMatrix::standard(),
            weights: SectionWeights::standard(),
        }
    }

    /// Score sanitized answers. Internal failures degrade to [`ScoreCard::failed`].
    pub fn score(&self, form: &FormData, startup_type: StartupType) -> ScoreCard {
        match self.try_score(form, startup_type) {
            Ok(card) => card,
            Err(err) => {
                error!(error = %err, startup_type = startup_type.label(), "scoring failed");
                ScoreCard::failed()
            }
        }
    }

    /// Mean over the fields present in a section, or `None` when none are present.
    /// Null answers count as absent; empty lists and empty text are scored.
    pub fn section_score(&self, form: &FormData, section: Section) -> Option<f64> {
        let scores: Vec<f64> = section
            .fields()
            .iter()
            .filter_map(|name| {
                form.get(name)
                    .filter(|value| !matches!(value, FieldValue::Empty))
                    .map(|value| rules::field_score(self.matrix, name, value))
            })
            .collect();

        if scores.is_empty() {
            return None;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some(mean.clamp(0.0, 10.0))
    }

    fn try_score(
        &self,
        form: &FormData,
        startup_type: StartupType,
    ) -> Result<ScoreCard, ScoringError> {
        let mut section_scores = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for &section in Section::for_startup(startup_type) {
            let Some(score) = self.section_score(form, section) else {
                section_scores.insert(section, 0.0);
                continue;
            };
            if !score.is_finite() {
                return Err(ScoringError::NonFiniteSection(section.key()));
            }

            let weight = f64::from(self.weights.weight(section));
            weighted_sum += score * weight;
            total_weight += weight;
            section_scores.insert(section, round_tenth(score));
        }

        let total = if total_weight > 0.0 {
            (weighted_sum / total_weight * 10.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        if !total.is_finite() {
            return Err(ScoringError::NonFiniteTotal);
        }

        Ok(ScoreCard {
            total_score: round_tenth(total),
            section_scores,
            verdict: Verdict::from_score(total),
        })
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
