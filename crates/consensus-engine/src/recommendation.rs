use analysis_core::stats::{mean, population_variance, round_to};
use analysis_core::{Conflict, OpinionSet, Recommendation, SentimentSignal};
use serde::Serialize;

use crate::conflicts::SENTIMENT_DIVERGENCE_THRESHOLD;
use crate::RoleMap;

/// Conflict count at which the sentiment mapping is abandoned
pub const CAUTION_CONFLICT_COUNT: usize = 3;
pub const CAUTION_CONFIDENCE: f64 = 0.4;

/// Largest share of confidence the polarity variance may remove
const MAX_VARIANCE_PENALTY: f64 = 0.5;
/// Multiplier applied when sentiment and fundamentals diverge
const DIVERGENCE_PENALTY: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActionCall {
    pub recommendation: Recommendation,
    /// In [0, 1], rounded to 3 decimals
    pub confidence: f64,
}

pub fn recommend(
    opinions: &OpinionSet,
    sentiment: SentimentSignal,
    conflicts: &[Conflict],
    roles: &RoleMap,
) -> ActionCall {
    if conflicts.len() >= CAUTION_CONFLICT_COUNT {
        return ActionCall {
            recommendation: Recommendation::HighVolatilityCaution,
            confidence: CAUTION_CONFIDENCE,
        };
    }

    let confidences: Vec<f64> = opinions.iter().map(|o| o.confidence).collect();
    let variance = population_variance(&opinions.polarities());

    let mut confidence = mean(&confidences) * (1.0 - variance.min(MAX_VARIANCE_PENALTY));

    // Stacks with the variance term
    if roles
        .sentiment_fundamental_gap(opinions)
        .is_some_and(|gap| gap > SENTIMENT_DIVERGENCE_THRESHOLD)
    {
        confidence *= DIVERGENCE_PENALTY;
    }

    ActionCall {
        recommendation: Recommendation::from_signal(sentiment),
        confidence: round_to(confidence.clamp(0.0, 1.0), 3),
    }
}
