use serde::{Deserialize, Serialize};

/// Discrete outcome derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictCategory {
    Unicorn,
    Strong,
    Promising,
    Early,
    NotReady,
    /// Scoring failed internally; paired with a zero score.
    Error,
}

/// Lower bounds, checked in descending order; anything below the last band is not ready.
const VERDICT_BANDS: &[(f64, VerdictCategory)] = &[
    (90.0, VerdictCategory::Unicorn),
    (80.0, VerdictCategory::Strong),
    (70.0, VerdictCategory::Promising),
    (60.0, VerdictCategory::Early),
];

impl VerdictCategory {
    pub fn from_score(score: f64) -> Self {
        VERDICT_BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, category)| *category)
            .unwrap_or(VerdictCategory::NotReady)
    }

    pub const fn key(self) -> &'static str {
        match self {
            VerdictCategory::Unicorn => "unicorn",
            VerdictCategory::Strong => "strong",
            VerdictCategory::Promising => "promising",
            VerdictCategory::Early => "early",
            VerdictCategory::NotReady => "not-ready",
            VerdictCategory::Error => "error",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            VerdictCategory::Unicorn => "Unicorn Potential",
            VerdictCategory::Strong => "Strong Candidate",
            VerdictCategory::Promising => "Promising but Needs Work",
            VerdictCategory::Early => "Early Potential",
            VerdictCategory::NotReady => "Not Investment-Ready",
            VerdictCategory::Error => "Error in calculation",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            VerdictCategory::Unicorn => "\u{1F984}",
            VerdictCategory::Strong => "\u{1F680}",
            VerdictCategory::Promising => "\u{1F4C8}",
            VerdictCategory::Early => "\u{1F527}",
            VerdictCategory::NotReady | VerdictCategory::Error => "\u{26A0}\u{FE0F}",
        }
    }
}

/// Verdict as stored with an evaluation and shown to the founder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub category: VerdictCategory,
    pub label: String,
    pub glyph: String,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        Self::for_category(VerdictCategory::from_score(score))
    }

    pub fn for_category(category: VerdictCategory) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            glyph: category.glyph().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive_lower_bounds() {
        assert_eq!(VerdictCategory::from_score(100.0), VerdictCategory::Unicorn);
        assert_eq!(VerdictCategory::from_score(90.0), VerdictCategory::Unicorn);
        assert_eq!(VerdictCategory::from_score(89.99), VerdictCategory::Strong);
        assert_eq!(VerdictCategory::from_score(80.0), VerdictCategory::Strong);
        assert_eq!(VerdictCategory::from_score(79.99), VerdictCategory::Promising);
        assert_eq!(VerdictCategory::from_score(70.0), VerdictCategory::Promising);
        assert_eq!(VerdictCategory::from_score(60.0), VerdictCategory::Early);
        assert_eq!(VerdictCategory::from_score(59.99), VerdictCategory::NotReady);
        assert_eq!(VerdictCategory::from_score(0.0), VerdictCategory::NotReady);
    }

    #[test]
    fn verdict_carries_label_and_glyph() {
        let verdict = Verdict::from_score(91.0);
        assert_eq!(verdict.label, "Unicorn Potential");
        assert_eq!(verdict.glyph, "\u{1F984}");

        let json = serde_json::to_value(Verdict::from_score(10.0)).expect("serializes");
        assert_eq!(json["category"], "not-ready");
    }
}
