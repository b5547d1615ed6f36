use analysis_core::stats::{population_variance, round_to};
use analysis_core::{AgreementMatrix, OpinionSet};
use std::collections::HashSet;
use std::hash::Hash;

const SENTIMENT_WEIGHT: f64 = 0.5;
const IMPACT_WEIGHT: f64 = 0.3;
const HORIZON_WEIGHT: f64 = 0.2;

/// Distinct categories over total count: 1/N when everyone agrees, 1.0 when
/// every value differs.
fn distinct_ratio<T, I>(values: I) -> f64
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut total = 0usize;
    let mut seen = HashSet::new();
    for value in values {
        total += 1;
        seen.insert(value);
    }
    if total == 0 {
        return 1.0;
    }
    seen.len() as f64 / total as f64
}

/// Scalar alignment in [0, 1], rounded to 3 decimals.
///
/// Half the score comes from polarity variance, the rest from how few distinct
/// impact and horizon categories were chosen. A 3-2 split and a 4-1 split over
/// two categories score the same.
pub fn consensus_score(opinions: &OpinionSet) -> f64 {
    let sentiment_alignment = 1.0 - population_variance(&opinions.polarities()).min(1.0);
    let impact_alignment = distinct_ratio(opinions.iter().map(|o| o.impact));
    let horizon_alignment = distinct_ratio(opinions.iter().map(|o| o.horizon));

    let score = sentiment_alignment * SENTIMENT_WEIGHT
        + (1.0 - impact_alignment) * IMPACT_WEIGHT
        + (1.0 - horizon_alignment) * HORIZON_WEIGHT;

    round_to(score.clamp(0.0, 1.0), 3)
}

/// Agreement between two polarities: 1 at equal scores, 0 at opposite extremes
pub fn pairwise_agreement(a: f64, b: f64) -> f64 {
    round_to((1.0 - (a - b).abs() / 2.0).clamp(0.0, 1.0), 3)
}

pub fn agreement_matrix(opinions: &OpinionSet) -> AgreementMatrix {
    let polarities = opinions.polarities();
    let n = polarities.len();
    let mut values = vec![vec![1.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let agreement = pairwise_agreement(polarities[i], polarities[j]);
            values[i][j] = agreement;
            values[j][i] = agreement;
        }
    }

    AgreementMatrix {
        perspectives: opinions.perspectives().map(str::to_string).collect(),
        values,
    }
}
