//! Canned prose used by the narrator. Selection logic lives next door; this file is data only.

use super::super::domain::{field, Section};
use super::super::scoring::VerdictCategory;

pub(crate) const SUMMARY_FALLBACK: &str =
    "Analysis completed. Please review individual section scores for detailed insights.";

pub(crate) const DEEP_ANALYSIS_FALLBACK: &str =
    "Deep analysis generation encountered an error. Please contact support for assistance.";

pub(crate) const EXECUTIVE_SUMMARIES: &[(VerdictCategory, &str)] = &[
    (
        VerdictCategory::Unicorn,
        "This startup demonstrates exceptional potential across all key metrics. The founding team \
         combines deep domain expertise with proven execution capabilities, addressing a massive \
         market opportunity with breakthrough innovation. Strong competitive moats and validated \
         traction indicate unicorn-scale potential.",
    ),
    (
        VerdictCategory::Strong,
        "A compelling investment opportunity with strong fundamentals. The team shows solid \
         experience and technical capabilities, targeting a substantial market with clear customer \
         pain points. Well-defined business model with promising early validation metrics.",
    ),
    (
        VerdictCategory::Promising,
        "Shows meaningful potential but requires focused execution improvements. Core concept is \
         sound with identifiable market opportunity, though competitive positioning and \
         go-to-market strategy need strengthening. Good foundation for seed-stage investment.",
    ),
    (
        VerdictCategory::Early,
        "Early-stage potential with foundational elements in place. Market opportunity exists but \
         validation is limited. Team capabilities are developing and business model requires \
         refinement. Suitable for pre-seed or accelerator programs.",
    ),
    (
        VerdictCategory::NotReady,
        "Significant foundational work needed before investment readiness. Core assumptions \
         require validation, team composition needs strengthening, and market approach requires \
         substantial refinement. Focus on customer development and product-market fit validation.",
    ),
];

/// Observation appended to the executive summary when `field` holds one of `values`.
pub(crate) struct Observation {
    pub field: &'static str,
    pub values: &'static [&'static str],
    pub sentence: &'static str,
}

/// Checked in order; team observations come first, then market, then traction.
pub(crate) const OBSERVATIONS: &[Observation] = &[
    Observation {
        field: field::FOUNDER_EXPERIENCE,
        values: &["serial-entrepreneurs", "industry-veterans"],
        sentence: "Strong founding team with proven track record.",
    },
    Observation {
        field: field::FOUNDER_EXPERIENCE,
        values: &["first-time"],
        sentence: "First-time entrepreneurs may benefit from experienced advisors.",
    },
    Observation {
        field: field::MARKET_SIZE_TAM,
        values: &["1b-10b", "over-10b"],
        sentence: "Addresses a substantial market opportunity.",
    },
    Observation {
        field: field::MARKET_SIZE_TAM,
        values: &["under-100m"],
        sentence: "Limited market size may constrain scalability.",
    },
    Observation {
        field: field::CUSTOMER_COUNT,
        values: &["101-500", "500+"],
        sentence: "Demonstrates meaningful customer traction.",
    },
];

/// Prose for the three score tiers of a section paragraph (>= 8, >= 6, below).
pub(crate) struct TieredProse {
    pub strong: &'static str,
    pub solid: &'static str,
    pub weak: &'static str,
}

impl TieredProse {
    pub fn for_score(&self, score: f64) -> &'static str {
        if score >= 8.0 {
            self.strong
        } else if score >= 6.0 {
            self.solid
        } else {
            self.weak
        }
    }
}

pub(crate) struct SectionTemplate {
    pub section: Section,
    pub heading: &'static str,
    pub prose: TieredProse,
}

/// Report order. Templates whose section is not evaluated for the startup type are skipped.
pub(crate) const SECTION_TEMPLATES: &[SectionTemplate] = &[
    SectionTemplate {
        section: Section::FoundingTeam,
        heading: "FOUNDING TEAM ASSESSMENT",
        prose: TieredProse {
            strong: "The founding team demonstrates strong complementary skills and deep market \
                     understanding. Technical capabilities are well-established and domain \
                     expertise provides significant competitive advantages.",
            solid: "Solid team foundation with room for strategic strengthening. Consider adding \
                    advisors or team members to fill capability gaps, particularly in areas of \
                    limited experience.",
            weak: "Team composition requires significant strengthening before investment \
                   readiness. Focus on recruiting co-founders with complementary skills and proven \
                   industry experience.",
        },
    },
    SectionTemplate {
        section: Section::MarketOpportunity,
        heading: "MARKET OPPORTUNITY ANALYSIS",
        prose: TieredProse {
            strong: "Excellent market positioning with substantial addressable opportunity and \
                     favorable timing. Market dynamics support aggressive growth strategies and \
                     venture-scale returns.",
            solid: "Reasonable market opportunity with moderate growth potential. Market timing \
                    appears favorable, though competitive dynamics require careful navigation.",
            weak: "Limited market opportunity may constrain venture scalability. Consider pivoting \
                   to larger adjacent markets or developing strategies to expand addressable \
                   market size.",
        },
    },
    SectionTemplate {
        section: Section::ProblemSolutionFit,
        heading: "PRODUCT-MARKET FIT EVALUATION",
        prose: TieredProse {
            strong: "Strong product-market fit indicators with clear customer value proposition. \
                     Solution differentiation provides sustainable competitive advantages.",
            solid: "Promising product-market alignment with validation evidence. Continue \
                    iterating based on customer feedback to strengthen value proposition.",
            weak: "Product-market fit requires validation and refinement. Focus on customer \
                   development and rapid experimentation to achieve stronger alignment.",
        },
    },
    SectionTemplate {
        section: Section::CompetitiveAdvantage,
        heading: "COMPETITIVE POSITIONING",
        prose: TieredProse {
            strong: "Strong competitive differentiation with multiple defensible advantages. \
                     Market position should be sustainable against competitive threats.",
            solid: "Moderate competitive advantages requiring continued development. Focus on \
                    strengthening network effects and customer switching costs.",
            weak: "Limited competitive differentiation increases vulnerability to competition. \
                   Urgent need to develop sustainable moats and unique positioning.",
        },
    },
    SectionTemplate {
        section: Section::BusinessModel,
        heading: "BUSINESS MODEL VIABILITY",
        prose: TieredProse {
            strong: "Highly scalable business model with clear path to profitability. Revenue \
                     streams are diversified and unit economics support venture-scale growth.",
            solid: "Viable business model with good scalability potential. Unit economics \
                    projections are reasonable though require real-world validation.",
            weak: "Business model requires fundamental refinement for venture viability. Focus on \
                   improving unit economics and developing scalable revenue streams.",
        },
    },
    SectionTemplate {
        section: Section::UnitEconomics,
        heading: "UNIT ECONOMICS ANALYSIS",
        prose: TieredProse {
            strong: "Excellent unit economics with strong LTV:CAC ratio and low churn rates. \
                     Financial metrics support aggressive growth investment and scaling \
                     strategies.",
            solid: "Solid unit economics foundation with room for optimization. Focus on improving \
                    customer retention and reducing acquisition costs.",
            weak: "Unit economics require significant improvement for sustainable growth. Critical \
                   to optimize CAC and LTV before scaling marketing investments.",
        },
    },
];

/// Investment recommendation bands keyed by minimum total score, highest first.
pub(crate) const INVESTMENT_BANDS: &[(f64, &str)] = &[
    (
        85.0,
        "**STRONG BUY RECOMMENDATION** - This startup merits immediate consideration for lead or \
         co-lead investment. All key metrics indicate venture-scale potential with experienced \
         team and validated market opportunity.",
    ),
    (
        75.0,
        "**QUALIFIED RECOMMENDATION** - Suitable for investment consideration with standard due \
         diligence. Strong fundamentals with minor areas for improvement during growth phase.",
    ),
    (
        65.0,
        "**CONDITIONAL RECOMMENDATION** - Consider for seed investment with active engagement and \
         milestone tracking. Good potential but requires hands-on support to achieve \
         venture-scale outcomes.",
    ),
    (
        55.0,
        "**WATCH LIST** - Monitor progress over 6-12 months before investment consideration. \
         Foundational elements present but significant execution risk remains.",
    ),
];

pub(crate) const PASS_RECOMMENDATION: &str =
    "**PASS RECOMMENDATION** - Not suitable for venture investment in current form. Fundamental \
     issues require resolution before considering any investment.";

pub(crate) const IDEA_NEXT_STEPS: &str =
    "**Next Steps**: Focus on customer validation, MVP development, and early traction metrics \
     before Series A readiness.";

pub(crate) const LAUNCHED_NEXT_STEPS: &str =
    "**Next Steps**: Optimize unit economics, scale customer acquisition, and prepare for growth \
     stage metrics tracking.";

/// Round labels for one startup type within a recommendation band.
pub(crate) struct StageTerms {
    pub investment_readiness: &'static str,
    pub valuation_range: &'static str,
    pub recommended_round: &'static str,
}

pub(crate) struct RecommendationBand {
    pub floor: f64,
    pub idea: StageTerms,
    pub launched: StageTerms,
    pub next_steps: [&'static str; 4],
}

/// Highest floor first. Scores below every floor use [`BASELINE_RECOMMENDATION`].
pub(crate) const RECOMMENDATION_BANDS: &[RecommendationBand] = &[
    RecommendationBand {
        floor: 80.0,
        idea: StageTerms {
            investment_readiness: "Seed Ready",
            valuation_range: "$3-10M",
            recommended_round: "Seed",
        },
        launched: StageTerms {
            investment_readiness: "Series A Ready",
            valuation_range: "$10M+",
            recommended_round: "Series A",
        },
        next_steps: [
            "Prepare comprehensive due diligence materials",
            "Develop 18-month growth projections",
            "Build strategic advisor network",
            "Establish key performance metrics dashboard",
        ],
    },
    RecommendationBand {
        floor: 60.0,
        idea: StageTerms {
            investment_readiness: "Pre-Seed Ready",
            valuation_range: "$0.5-3M",
            recommended_round: "Pre-Seed",
        },
        launched: StageTerms {
            investment_readiness: "Seed Ready",
            valuation_range: "$3-10M",
            recommended_round: "Seed",
        },
        next_steps: [
            "Focus on customer validation and early traction",
            "Strengthen competitive moats and IP protection",
            "Prepare detailed financial projections",
            "Build strategic partnerships in target industry",
        ],
    },
];

pub(crate) const BASELINE_RECOMMENDATION: RecommendationBand = RecommendationBand {
    floor: 0.0,
    idea: StageTerms {
        investment_readiness: "Bootstrap/Accelerator",
        valuation_range: "$0.1-1M",
        recommended_round: "Bootstrap",
    },
    launched: StageTerms {
        investment_readiness: "Pre-Seed",
        valuation_range: "$0.5-3M",
        recommended_round: "Pre-Seed",
    },
    next_steps: [
        "Validate product-market fit with target customers",
        "Develop minimum viable product (MVP)",
        "Establish clear value proposition and pricing",
        "Build founding team and advisory board",
    ],
};
