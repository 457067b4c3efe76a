use std::collections::HashMap;
use std::sync::OnceLock;

use super::super::domain::{field, Section};

type ValueScores = &'static [(&'static str, u8)];

const STANDARD_MATRIX: &[(&str, ValueScores)] = &[
    // Founding team
    (field::TEAM_SIZE, &[("1", 5), ("2-3", 10), ("4-5", 8), ("6+", 6)]),
    (
        field::FOUNDER_EXPERIENCE,
        &[
            ("first-time", 4),
            ("some-experience", 7),
            ("serial-entrepreneurs", 9),
            ("industry-veterans", 10),
        ],
    ),
    (
        field::TECHNICAL_EXPERTISE,
        &[
            ("no-tech", 3),
            ("outsourced", 5),
            ("tech-cofounder", 9),
            ("tech-team", 10),
        ],
    ),
    (
        field::DOMAIN_EXPERTISE,
        &[
            ("limited", 3),
            ("some-knowledge", 6),
            ("deep-expertise", 9),
            ("industry-insider", 10),
        ],
    ),
    (
        field::COMMITMENT_LEVEL,
        &[
            ("part-time", 3),
            ("mostly-full", 6),
            ("full-time", 9),
            ("bootstrapped", 10),
        ],
    ),
    // Market opportunity
    (
        field::MARKET_SIZE_TAM,
        &[
            ("under-100m", 3),
            ("100m-1b", 6),
            ("1b-10b", 9),
            ("over-10b", 10),
        ],
    ),
    (
        field::MARKET_SIZE_SOM,
        &[
            ("under-10m", 4),
            ("10m-100m", 7),
            ("100m-500m", 9),
            ("over-500m", 10),
        ],
    ),
    (
        field::MARKET_GROWTH,
        &[
            ("declining", 2),
            ("stable", 5),
            ("growing", 8),
            ("exploding", 10),
        ],
    ),
    (
        field::MARKET_TIMING,
        &[
            ("too-early", 4),
            ("emerging", 8),
            ("perfect-timing", 10),
            ("mature", 6),
        ],
    ),
    // Problem / solution fit
    (
        field::PROBLEM_SEVERITY,
        &[
            ("nice-to-have", 3),
            ("moderate-pain", 6),
            ("significant-pain", 8),
            ("critical-pain", 10),
        ],
    ),
    (
        field::PROBLEM_FREQUENCY,
        &[
            ("rare", 3),
            ("occasional", 5),
            ("frequent", 8),
            ("daily", 10),
        ],
    ),
    (
        field::CURRENT_SOLUTION,
        &[
            ("no-solution", 8),
            ("poor-alternatives", 9),
            ("decent-competitors", 6),
            ("strong-incumbents", 4),
        ],
    ),
    (
        field::SOLUTION_UNIQUENESS,
        &[
            ("incremental", 4),
            ("significant-better", 7),
            ("breakthrough", 9),
            ("paradigm-shift", 10),
        ],
    ),
    // Competitive advantage
    (
        field::IP_PROTECTION,
        &[
            ("none", 3),
            ("trade-secrets", 6),
            ("pending-patents", 8),
            ("granted-ip", 10),
        ],
    ),
    (
        field::COMPETITIVE_TIMELINE,
        &[
            ("immediate", 3),
            ("months", 5),
            ("year-plus", 8),
            ("very-difficult", 10),
        ],
    ),
    // Business model
    (
        field::REVENUE_MODEL,
        &[
            ("subscription", 9),
            ("transaction", 8),
            ("marketplace", 8),
            ("advertising", 6),
            ("enterprise", 9),
            ("product-sales", 7),
            ("freemium", 6),
            ("other", 5),
        ],
    ),
    (
        field::UNIT_ECONOMICS_VISIBILITY,
        &[
            ("unclear", 3),
            ("rough-estimates", 5),
            ("solid-projections", 8),
            ("proven-metrics", 10),
        ],
    ),
    (
        field::SCALABILITY,
        &[
            ("linear", 4),
            ("moderate", 6),
            ("high-leverage", 9),
            ("viral-network", 10),
        ],
    ),
    // Validation & traction
    (
        field::CUSTOMER_COUNT,
        &[
            ("none", 2),
            ("1-10", 4),
            ("11-50", 6),
            ("51-100", 7),
            ("101-500", 9),
            ("500+", 10),
        ],
    ),
    // Launched only
    (
        field::MRR,
        &[
            ("under-1k", 3),
            ("1k-10k", 5),
            ("10k-50k", 7),
            ("50k-100k", 8),
            ("100k-500k", 9),
            ("over-500k", 10),
        ],
    ),
    (
        field::FUNDING_AMOUNT,
        &[
            ("under-500k", 6),
            ("500k-1m", 7),
            ("1m-2m", 8),
            ("2m-5m", 9),
            ("over-5m", 10),
        ],
    ),
];

const STANDARD_WEIGHTS: &[(Section, u32)] = &[
    (Section::FoundingTeam, 30),
    (Section::MarketOpportunity, 25),
    (Section::ProblemSolutionFit, 20),
    (Section::CompetitiveAdvantage, 10),
    (Section::BusinessModel, 15),
    (Section::ValidationTraction, 25),
    (Section::UnitEconomics, 20),
    (Section::FinancialsCapital, 15),
];

static MATRIX: OnceLock<ScoringMatrix> = OnceLock::new();
static WEIGHTS: OnceLock<SectionWeights> = OnceLock::new();

/// Immutable lookup from `(field, enumerated answer)` to a 0-10 sub-score.
#[derive(Debug)]
pub struct ScoringMatrix {
    fields: HashMap<&'static str, HashMap<&'static str, f64>>,
}

impl ScoringMatrix {
    pub fn standard() -> &'static ScoringMatrix {
        MATRIX.get_or_init(|| ScoringMatrix {
            fields: STANDARD_MATRIX
                .iter()
                .map(|(name, scores)| {
                    let values = scores
                        .iter()
                        .map(|(value, score)| (*value, f64::from(*score)))
                        .collect();
                    (*name, values)
                })
                .collect(),
        })
    }

    pub fn lookup(&self, field: &str, value: &str) -> Option<f64> {
        self.fields.get(field)?.get(value).copied()
    }
}

/// Relative weight of each section in the total. Weights need not sum to 100.
#[derive(Debug)]
pub struct SectionWeights {
    weights: HashMap<Section, u32>,
}

impl SectionWeights {
    pub fn standard() -> &'static SectionWeights {
        WEIGHTS.get_or_init(|| SectionWeights {
            weights: STANDARD_WEIGHTS.iter().copied().collect(),
        })
    }

    pub fn weight(&self, section: Section) -> u32 {
        self.weights.get(&section).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_enumerated_scores() {
        let matrix = ScoringMatrix::standard();
        assert_eq!(matrix.lookup(field::TEAM_SIZE, "2-3"), Some(10.0));
        assert_eq!(matrix.lookup(field::CUSTOMER_COUNT, "500+"), Some(10.0));
        assert_eq!(matrix.lookup(field::TEAM_SIZE, "twelve"), None);
        assert_eq!(matrix.lookup("unknown-field", "2-3"), None);
    }

    #[test]
    fn every_matrix_score_is_within_bounds() {
        for (_, scores) in STANDARD_MATRIX {
            for (_, score) in scores.iter() {
                assert!(*score <= 10);
            }
        }
    }

    #[test]
    fn weights_cover_every_section() {
        let weights = SectionWeights::standard();
        assert_eq!(weights.weight(Section::FoundingTeam), 30);
        assert_eq!(weights.weight(Section::FinancialsCapital), 15);
    }
}
