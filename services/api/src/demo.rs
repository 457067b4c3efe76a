use crate::infra::build_service;
use chrono::{Duration, Utc};
use clap::Args;
use pitch_eval::config::AppConfig;
use pitch_eval::error::AppError;
use pitch_eval::workflows::pitch::domain::field;
use pitch_eval::workflows::pitch::{
    EvaluationRecord, EvaluationServiceError, FormData, PremiumAnalysis, SessionMetadata,
    StartupType, Submission, ValidationConfig,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a submission JSON document ({startup_type, form_data, session_metadata})
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip the minimum completion time check (useful for hand-written fixtures)
    #[arg(long)]
    pub(crate) no_anti_gaming_clock: bool,
    /// Print the stored evaluation view as JSON instead of the text score card
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Use the launched-startup questionnaire (adds unit economics and financials).
    #[arg(long)]
    pub(crate) launched: bool,
    /// Stop after the free evaluation without paying for the deep analysis.
    #[arg(long)]
    pub(crate) skip_unlock: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        input,
        no_anti_gaming_clock,
        json,
    } = args;

    let raw = std::fs::read_to_string(&input)?;
    let submission: Submission = serde_json::from_str(&raw)?;

    let config = AppConfig::load()?;
    let validation = if no_anti_gaming_clock {
        ValidationConfig::default().with_min_completion_ms(0)
    } else {
        config.evaluation.validation_config()
    };
    let service = build_service(&config, validation);

    match service.evaluate(submission) {
        Ok(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record.public_view())?);
            } else {
                render_score_card(&record);
            }
            Ok(())
        }
        Err(EvaluationServiceError::Rejected(report)) => {
            println!("Submission rejected");
            for error in &report.validation_errors {
                println!("  - {error}");
            }
            for flag in &report.anti_gaming_flags {
                println!("  ! {flag}");
            }
            Err(EvaluationServiceError::Rejected(report).into())
        }
        Err(err) => Err(err.into()),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        launched,
        skip_unlock,
    } = args;

    let config = AppConfig::load()?;
    let service = build_service(&config, config.evaluation.validation_config());
    let startup_type = if launched {
        StartupType::Launched
    } else {
        StartupType::Idea
    };

    println!("Pitch evaluation demo ({} startup)", startup_type.label());
    let record = match service.evaluate(demo_submission(startup_type)) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Err(err.into());
        }
    };
    render_score_card(&record);

    if skip_unlock {
        return Ok(());
    }

    let payment_config = service.payment_config();
    println!(
        "\nPremium analysis: {:.2} {} (publishable key {})",
        payment_config.amount as f64 / 100.0,
        payment_config.currency.to_uppercase(),
        payment_config.publishable_key
    );
    let intent = service.create_payment_intent(&record.id, None, None)?;
    println!(
        "  Payment intent {} created for {} {}",
        intent.payment_intent_id, intent.amount, intent.currency
    );

    let analysis = service.unlock_premium(&record.id, &intent.payment_intent_id)?;
    render_premium(&analysis);

    match service.unlock_premium(&record.id, &intent.payment_intent_id) {
        Ok(_) => println!("\n  Unexpected second unlock accepted"),
        Err(err) => println!("\n  Replaying the payment is refused: {}", err),
    }

    match serde_json::to_string_pretty(&service.get(&record.id)?.public_view()) {
        Ok(json) => println!("\nPublic evaluation payload:\n{}", json),
        Err(err) => println!("\nPublic evaluation payload unavailable: {}", err),
    }

    Ok(())
}

fn render_score_card(record: &EvaluationRecord) {
    println!("Evaluation {}", record.id);
    println!(
        "  Score: {:.1}/100 | {} {}",
        record.total_score, record.verdict.glyph, record.verdict.label
    );
    println!("  Section scores:");
    for (section, score) in &record.section_scores {
        println!("    - {:<28} {:>4.1}/10", section.label(), score);
    }
    println!("\nExecutive summary\n  {}", record.executive_summary);
}

fn render_premium(analysis: &PremiumAnalysis) {
    println!(
        "\nPremium analysis unlocked at {}",
        analysis.unlocked_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", analysis.deep_analysis);

    let recommendations = &analysis.recommendations;
    println!("\nRecommendations");
    println!(
        "  Readiness: {} | Valuation: {} | Round: {}",
        recommendations.investment_readiness,
        recommendations.valuation_range,
        recommendations.recommended_round
    );
    for step in &recommendations.next_steps {
        println!("  - {step}");
    }
}

fn demo_submission(startup_type: StartupType) -> Submission {
    let mut form = FormData::new()
        .with(field::TEAM_SIZE, "2-3")
        .with(field::FOUNDER_EXPERIENCE, "some-experience")
        .with(field::TECHNICAL_EXPERTISE, "tech-cofounder")
        .with(field::DOMAIN_EXPERTISE, "deep-expertise")
        .with(field::COMMITMENT_LEVEL, "full-time")
        .with(field::MARKET_SIZE_TAM, "1b-10b")
        .with(field::MARKET_SIZE_SOM, "10m-100m")
        .with(field::MARKET_GROWTH, "growing")
        .with(field::MARKET_TIMING, "emerging")
        .with(
            field::CUSTOMER_SEGMENT,
            "Regional dental groups with five to forty practices",
        )
        .with(field::PROBLEM_SEVERITY, "significant-pain")
        .with(field::PROBLEM_FREQUENCY, "frequent")
        .with(field::CURRENT_SOLUTION, "decent-competitors")
        .with(field::SOLUTION_UNIQUENESS, "significant-better")
        .with(
            field::VALUE_PROPOSITION,
            "One scheduling and claims workspace for every practice in the group, so office \
             managers fill hygiene cancellations from a shared waitlist and see denied claims \
             before they age past the payer deadline.",
        )
        .with(
            field::DEFENSIBILITY,
            vec!["switching-costs", "proprietary-data"],
        )
        .with(field::IP_PROTECTION, "trade-secrets")
        .with(field::COMPETITIVE_TIMELINE, "year-plus")
        .with(field::REVENUE_MODEL, "subscription")
        .with(
            field::PRICING_STRATEGY,
            "Per practice monthly subscription with volume discounts",
        )
        .with(field::UNIT_ECONOMICS_VISIBILITY, "solid-projections")
        .with(field::SCALABILITY, "high-leverage")
        .with(
            field::VALIDATION_TYPE,
            vec!["customer-interviews", "paid-pilots"],
        )
        .with(field::CUSTOMER_COUNT, "11-50");

    if startup_type == StartupType::Launched {
        form = form
            .with(field::CAC, 120.0)
            .with(field::LTV, 1800.0)
            .with(field::PAYBACK_PERIOD, 9.0)
            .with(field::GROSS_MARGIN, 68.0)
            .with(field::CHURN_RATE, 4.5)
            .with(field::MRR, "10k-50k")
            .with(field::GROWTH_RATE, 9.0)
            .with(field::RUNWAY, 14.0)
            .with(field::FUNDING_AMOUNT, "1m-2m")
            .with(
                field::USE_OF_FUNDS,
                "Two implementation specialists and a payer integrations engineer",
            );
    }

    let now = Utc::now();
    Submission {
        startup_type,
        form_data: form,
        session_metadata: SessionMetadata {
            start_time: Some((now - Duration::minutes(14)).timestamp_millis()),
            honeypot: None,
            user_uuid: Some("demo-founder".to_string()),
            csrf_token: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryEvaluationRepository;
    use pitch_eval::workflows::pitch::{MockPaymentGateway, PitchEvaluationService};
    use std::sync::Arc;

    #[test]
    fn demo_submissions_pass_validation() {
        let service = PitchEvaluationService::new(
            Arc::new(InMemoryEvaluationRepository::default()),
            Arc::new(MockPaymentGateway::default()),
            ValidationConfig::default(),
        );

        for startup_type in [StartupType::Idea, StartupType::Launched] {
            let report = service.validate(&demo_submission(startup_type));
            assert!(report.is_valid(), "{startup_type:?}: {report:?}");
        }
    }

    #[test]
    fn demo_cycle_unlocks_premium_once() {
        let service = PitchEvaluationService::new(
            Arc::new(InMemoryEvaluationRepository::default()),
            Arc::new(MockPaymentGateway::default()),
            ValidationConfig::default(),
        );
        let record = service
            .evaluate(demo_submission(StartupType::Launched))
            .expect("evaluation succeeds");
        let intent = service
            .create_payment_intent(&record.id, None, None)
            .expect("intent created");

        let analysis = service
            .unlock_premium(&record.id, &intent.payment_intent_id)
            .expect("unlock succeeds");
        assert!(analysis.deep_analysis.contains("UNIT ECONOMICS ANALYSIS"));
        assert!(service
            .unlock_premium(&record.id, &intent.payment_intent_id)
            .is_err());
        assert_eq!(service.payments_for(&record.id).expect("payments").len(), 1);
    }
}
