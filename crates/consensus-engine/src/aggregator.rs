use analysis_core::{ImpactLevel, OpinionSet, SentimentSignal};
use serde::Serialize;

use crate::WeightSelection;

/// Weighted blend of the opinions
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    /// Weighted polarity in [-1, 1]
    pub polarity: f64,
    /// Weighted impact ordinal on the 1..5 scale
    pub impact_score: f64,
    pub sentiment: SentimentSignal,
    pub impact: ImpactLevel,
}

pub fn aggregate(opinions: &OpinionSet, selection: &WeightSelection) -> Aggregate {
    let mut polarity = 0.0;
    let mut impact_score = 0.0;

    for opinion in opinions {
        let weight = selection.weight_of(&opinion.perspective);
        polarity += opinion.polarity * weight;
        impact_score += f64::from(opinion.impact.ordinal()) * weight;
    }

    let result = Aggregate {
        polarity,
        impact_score,
        sentiment: SentimentSignal::from_score(polarity),
        impact: ImpactLevel::from_weighted_ordinal(impact_score),
    };

    tracing::debug!(
        "Blended polarity {:.3} -> {}, impact {:.2} -> {}",
        result.polarity,
        result.sentiment.as_str(),
        result.impact_score,
        result.impact.as_str()
    );
    result
}
