use tracing::error;

use super::super::domain::FormData;
use super::super::scoring::ScoreCard;
use super::templates::{EXECUTIVE_SUMMARIES, OBSERVATIONS, SUMMARY_FALLBACK};

pub(crate) fn executive_summary(card: &ScoreCard, form: &FormData) -> String {
    let category = card.verdict.category;
    let Some(base) = EXECUTIVE_SUMMARIES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, text)| *text)
    else {
        error!(
            category = category.key(),
            total_score = card.total_score,
            "no executive summary for verdict; using fallback"
        );
        return SUMMARY_FALLBACK.to_string();
    };

    let mut summary = base.to_string();
    for sentence in observations(form) {
        summary.push(' ');
        summary.push_str(sentence);
    }
    summary
}

fn observations(form: &FormData) -> impl Iterator<Item = &'static str> + '_ {
    OBSERVATIONS
        .iter()
        .filter(move |observation| {
            form.text(observation.field)
                .is_some_and(|answer| observation.values.contains(&answer))
        })
        .map(|observation| observation.sentence)
}
