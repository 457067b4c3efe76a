use std::fmt::{self, Write};

use chrono::NaiveDate;
use tracing::error;

use super::super::domain::{field, FieldValue, FormData, Section, StartupType};
use super::super::scoring::ScoreCard;
use super::templates::{
    DEEP_ANALYSIS_FALLBACK, IDEA_NEXT_STEPS, INVESTMENT_BANDS, LAUNCHED_NEXT_STEPS,
    PASS_RECOMMENDATION, SECTION_TEMPLATES,
};

const UNKNOWN: &str = "Unknown";

pub(crate) fn deep_analysis(
    card: &ScoreCard,
    form: &FormData,
    startup_type: StartupType,
    generated_on: NaiveDate,
) -> String {
    match write_report(card, form, startup_type, generated_on) {
        Ok(report) => report,
        Err(err) => {
            error!(error = %err, "deep analysis rendering failed; using fallback");
            DEEP_ANALYSIS_FALLBACK.to_string()
        }
    }
}

fn write_report(
    card: &ScoreCard,
    form: &FormData,
    startup_type: StartupType,
    generated_on: NaiveDate,
) -> Result<String, fmt::Error> {
    let mut report = String::new();
    writeln!(
        report,
        "**COMPREHENSIVE VC ANALYSIS - SCORE: {:.1}/100**",
        card.total_score
    )?;
    writeln!(report)?;
    writeln!(report, "*Evaluation Date: {}*", generated_on.format("%B %d, %Y"))?;

    let evaluated = Section::for_startup(startup_type);
    for template in SECTION_TEMPLATES
        .iter()
        .filter(|template| evaluated.contains(&template.section))
    {
        let score = card
            .section_scores
            .get(&template.section)
            .copied()
            .unwrap_or(0.0);
        writeln!(report)?;
        writeln!(report, "**{} ({score:.1}/10)**", template.heading)?;
        writeln!(report)?;
        write_context(&mut report, template.section, form)?;
        writeln!(report, "{}", template.prose.for_score(score))?;
    }

    writeln!(report)?;
    writeln!(report, "**INVESTMENT RECOMMENDATION**")?;
    writeln!(report)?;
    writeln!(report, "{}", investment_recommendation(card.total_score))?;
    writeln!(report)?;
    write!(
        report,
        "{}",
        match startup_type {
            StartupType::Idea => IDEA_NEXT_STEPS,
            StartupType::Launched => LAUNCHED_NEXT_STEPS,
        }
    )?;

    Ok(report)
}

/// Opening sentence of a section paragraph, built from the founder's own answers.
fn write_context(out: &mut String, section: Section, form: &FormData) -> fmt::Result {
    match section {
        Section::FoundingTeam => write!(
            out,
            "Team composition shows {} founders with {} experience. ",
            answer(form, field::TEAM_SIZE),
            humanize(form, field::FOUNDER_EXPERIENCE),
        ),
        Section::MarketOpportunity => write!(
            out,
            "Target market size ({}) with {} growth trends. ",
            answer(form, field::MARKET_SIZE_TAM).replace('-', " to $"),
            humanize(form, field::MARKET_GROWTH),
        ),
        Section::ProblemSolutionFit => write!(
            out,
            "Addresses {} customer pain points with {} solution approach. ",
            humanize(form, field::PROBLEM_SEVERITY),
            humanize(form, field::SOLUTION_UNIQUENESS),
        ),
        Section::CompetitiveAdvantage => {
            let moats = match form.get(field::DEFENSIBILITY) {
                Some(FieldValue::List(items)) => items.len(),
                _ => 0,
            };
            write!(
                out,
                "Competitive positioning with {moats} identified moats and {} intellectual \
                 property protection. ",
                humanize(form, field::IP_PROTECTION),
            )
        }
        Section::BusinessModel => write!(
            out,
            "Business model based on {} with {} scalability characteristics. ",
            humanize(form, field::REVENUE_MODEL),
            humanize(form, field::SCALABILITY),
        ),
        Section::UnitEconomics => {
            let cac = form.number(field::CAC);
            let ltv = form.number(field::LTV);
            let ratio = match (cac, ltv) {
                (Some(cac), Some(ltv)) if cac > 0.0 => ltv / cac,
                _ => 0.0,
            };
            write!(
                out,
                "Unit economics show ${} CAC, ${} LTV (ratio: {ratio:.1}:1), and {}% monthly \
                 churn. ",
                metric(form, field::CAC),
                metric(form, field::LTV),
                metric(form, field::CHURN_RATE),
            )
        }
        Section::ValidationTraction | Section::FinancialsCapital => Ok(()),
    }
}

fn investment_recommendation(total_score: f64) -> &'static str {
    INVESTMENT_BANDS
        .iter()
        .find(|(floor, _)| total_score >= *floor)
        .map(|(_, text)| *text)
        .unwrap_or(PASS_RECOMMENDATION)
}

fn answer(form: &FormData, name: &str) -> String {
    form.get(name)
        .filter(|value| !value.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| UNKNOWN.to_string())
}

fn humanize(form: &FormData, name: &str) -> String {
    answer(form, name).replace('-', " ")
}

fn metric(form: &FormData, name: &str) -> String {
    form.get(name)
        .filter(|value| !value.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::pitch::scoring::Verdict;
    use std::collections::BTreeMap;

    fn card(total_score: f64, sections: &[(Section, f64)]) -> ScoreCard {
        ScoreCard {
            total_score,
            section_scores: sections.iter().copied().collect::<BTreeMap<_, _>>(),
            verdict: Verdict::from_score(total_score),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
    }

    #[test]
    fn report_opens_with_score_and_date() {
        let report = deep_analysis(&card(87.5, &[]), &FormData::new(), StartupType::Idea, date());

        assert!(report.starts_with("**COMPREHENSIVE VC ANALYSIS - SCORE: 87.5/100**"));
        assert!(report.contains("*Evaluation Date: March 05, 2024*"));
        assert!(report.contains("**STRONG BUY RECOMMENDATION**"));
        assert!(report.ends_with(IDEA_NEXT_STEPS));
    }

    #[test]
    fn section_prose_follows_score_tier() {
        let form = FormData::new()
            .with(field::TEAM_SIZE, "2-3")
            .with(field::FOUNDER_EXPERIENCE, "serial-entrepreneurs");
        let report = deep_analysis(
            &card(
                70.0,
                &[(Section::FoundingTeam, 8.4), (Section::MarketOpportunity, 6.0)],
            ),
            &form,
            StartupType::Idea,
            date(),
        );

        assert!(report.contains("**FOUNDING TEAM ASSESSMENT (8.4/10)**"));
        assert!(report.contains("Team composition shows 2-3 founders with serial entrepreneurs experience."));
        assert!(report.contains("strong complementary skills"));
        assert!(report.contains("Reasonable market opportunity"));
        assert!(report.contains("Target market size (Unknown)"));
        assert!(report.contains("Limited competitive differentiation"));
        assert!(report.contains("**CONDITIONAL RECOMMENDATION**"));
    }

    #[test]
    fn unit_economics_only_for_launched_startups() {
        let form = FormData::new()
            .with(field::CAC, 50.0)
            .with(field::LTV, 600.0)
            .with(field::CHURN_RATE, 2.5);

        let idea = deep_analysis(&card(50.0, &[]), &form, StartupType::Idea, date());
        let launched = deep_analysis(
            &card(50.0, &[(Section::UnitEconomics, 9.0)]),
            &form,
            StartupType::Launched,
            date(),
        );

        assert!(!idea.contains("UNIT ECONOMICS ANALYSIS"));
        assert!(launched.contains("**UNIT ECONOMICS ANALYSIS (9.0/10)**"));
        assert!(launched.contains("$50 CAC, $600 LTV (ratio: 12.0:1), and 2.5% monthly churn"));
        assert!(launched.contains("**PASS RECOMMENDATION**"));
        assert!(launched.ends_with(LAUNCHED_NEXT_STEPS));
    }

    #[test]
    fn investment_bands_are_inclusive() {
        assert!(investment_recommendation(85.0).starts_with("**STRONG BUY"));
        assert!(investment_recommendation(84.9).starts_with("**QUALIFIED"));
        assert!(investment_recommendation(65.0).starts_with("**CONDITIONAL"));
        assert!(investment_recommendation(55.0).starts_with("**WATCH LIST"));
        assert!(investment_recommendation(54.9).starts_with("**PASS"));
    }
}
