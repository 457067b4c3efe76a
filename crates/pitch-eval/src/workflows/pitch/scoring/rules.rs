use super::super::domain::{field, FieldValue};
use super::matrix::ScoringMatrix;

/// Score given to answers no rule recognises.
pub const NEUTRAL_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

/// Three cut points mapping a numeric answer onto 10, 8, 6, or 4.
#[derive(Debug, Clone, Copy)]
struct NumericBands {
    field: &'static str,
    direction: Direction,
    cuts: [f64; 3],
}

const NUMERIC_BANDS: &[NumericBands] = &[
    NumericBands {
        field: field::CAC,
        direction: Direction::LowerIsBetter,
        cuts: [50.0, 100.0, 200.0],
    },
    NumericBands {
        field: field::LTV,
        direction: Direction::HigherIsBetter,
        cuts: [500.0, 300.0, 150.0],
    },
    NumericBands {
        field: field::GROWTH_RATE,
        direction: Direction::HigherIsBetter,
        cuts: [15.0, 10.0, 5.0],
    },
    NumericBands {
        field: field::GROSS_MARGIN,
        direction: Direction::HigherIsBetter,
        cuts: [80.0, 60.0, 40.0],
    },
    NumericBands {
        field: field::CHURN_RATE,
        direction: Direction::LowerIsBetter,
        cuts: [2.0, 5.0, 10.0],
    },
];

const BAND_SCORES: [f64; 4] = [10.0, 8.0, 6.0, 4.0];

/// Score a single answer: matrix lookup first, then the structural heuristic.
pub(crate) fn field_score(matrix: &ScoringMatrix, name: &str, value: &FieldValue) -> f64 {
    value
        .as_text()
        .and_then(|text| matrix.lookup(name, text))
        .unwrap_or_else(|| heuristic_score(name, value))
}

pub(crate) fn heuristic_score(name: &str, value: &FieldValue) -> f64 {
    match value {
        FieldValue::Text(text) if is_long_text_field(name) => word_count_score(text),
        FieldValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|number| numeric_score(name, number))
            .unwrap_or(NEUTRAL_SCORE),
        FieldValue::Number(number) => numeric_score(name, *number).unwrap_or(NEUTRAL_SCORE),
        FieldValue::List(items) => selection_count_score(items.len()),
        FieldValue::Flag(_) | FieldValue::Empty => NEUTRAL_SCORE,
    }
}

fn is_long_text_field(name: &str) -> bool {
    name.ends_with("-textarea") || name.contains("description") || name.contains("proposition")
}

fn word_count_score(text: &str) -> f64 {
    match text.split_whitespace().count() {
        count if count >= 50 => 9.0,
        count if count >= 25 => 7.0,
        count if count >= 10 => 5.0,
        _ => 3.0,
    }
}

fn selection_count_score(count: usize) -> f64 {
    match count {
        0 => 2.0,
        1 => 5.0,
        2 => 7.0,
        _ => 9.0,
    }
}

fn numeric_score(name: &str, value: f64) -> Option<f64> {
    let bands = NUMERIC_BANDS.iter().find(|bands| bands.field == name)?;
    let band = bands
        .cuts
        .iter()
        .position(|cut| match bands.direction {
            Direction::LowerIsBetter => value <= *cut,
            Direction::HigherIsBetter => value >= *cut,
        })
        .unwrap_or(BAND_SCORES.len() - 1);
    Some(BAND_SCORES[band])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn matrix_answers_win_over_heuristics() {
        let matrix = ScoringMatrix::standard();
        assert_eq!(field_score(matrix, field::TEAM_SIZE, &"2-3".into()), 10.0);
        assert_eq!(field_score(matrix, field::TEAM_SIZE, &"eleven".into()), NEUTRAL_SCORE);
    }

    #[test]
    fn long_text_scores_by_word_count() {
        assert_eq!(heuristic_score(field::VALUE_PROPOSITION, &words(50).into()), 9.0);
        assert_eq!(heuristic_score(field::VALUE_PROPOSITION, &words(25).into()), 7.0);
        assert_eq!(heuristic_score("product-description", &words(10).into()), 5.0);
        assert_eq!(heuristic_score("pitch-textarea", &words(9).into()), 3.0);
    }

    #[test]
    fn short_text_outside_the_matrix_is_neutral() {
        assert_eq!(heuristic_score(field::CUSTOMER_SEGMENT, &words(80).into()), NEUTRAL_SCORE);
    }

    #[test]
    fn lists_score_by_selection_count() {
        assert_eq!(heuristic_score(field::DEFENSIBILITY, &FieldValue::List(vec![])), 2.0);
        assert_eq!(heuristic_score(field::DEFENSIBILITY, &vec!["brand"].into()), 5.0);
        assert_eq!(heuristic_score(field::DEFENSIBILITY, &vec!["brand", "data"].into()), 7.0);
        assert_eq!(
            heuristic_score(field::DEFENSIBILITY, &vec!["brand", "data", "network"].into()),
            9.0
        );
    }

    #[test]
    fn numeric_bands_respect_direction() {
        assert_eq!(numeric_score(field::CAC, 50.0), Some(10.0));
        assert_eq!(numeric_score(field::CAC, 100.0), Some(8.0));
        assert_eq!(numeric_score(field::CAC, 150.0), Some(6.0));
        assert_eq!(numeric_score(field::CAC, 500.0), Some(4.0));

        assert_eq!(numeric_score(field::LTV, 500.0), Some(10.0));
        assert_eq!(numeric_score(field::LTV, 149.0), Some(4.0));
        assert_eq!(numeric_score(field::GROWTH_RATE, 12.0), Some(8.0));
        assert_eq!(numeric_score(field::GROSS_MARGIN, 45.0), Some(6.0));
        assert_eq!(numeric_score(field::CHURN_RATE, 1.5), Some(10.0));
        assert_eq!(numeric_score(field::CHURN_RATE, 12.0), Some(4.0));
        assert_eq!(numeric_score(field::RUNWAY, 12.0), None);
    }

    #[test]
    fn numeric_strings_are_scored_as_numbers() {
        assert_eq!(heuristic_score(field::CAC, &"40".into()), 10.0);
        assert_eq!(heuristic_score(field::RUNWAY, &FieldValue::Number(18.0)), NEUTRAL_SCORE);
    }
}
