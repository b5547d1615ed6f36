use analysis_core::{Conflict, ConflictKind, Opinion, OpinionSet};
use std::collections::HashSet;

/// Polarity range above which perspectives are considered divergent
pub const SENTIMENT_DIVERGENCE_THRESHOLD: f64 = 1.0;
/// More distinct horizons than this is a timing disagreement
pub const MAX_AGREEING_HORIZONS: usize = 2;
/// Ordinal impact spread at which magnitudes conflict
pub const IMPACT_SPREAD_THRESHOLD: u8 = 2;

/// Run the three independent disagreement checks, in a fixed order.
pub fn detect_conflicts(opinions: &OpinionSet) -> Vec<Conflict> {
    let conflicts: Vec<Conflict> = [
        sentiment_divergence(opinions),
        timing_disagreement(opinions),
        impact_magnitude_conflict(opinions),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !conflicts.is_empty() {
        tracing::debug!(
            "Detected {} conflict(s): {:?}",
            conflicts.len(),
            conflicts.iter().map(|c| c.kind.as_str()).collect::<Vec<_>>()
        );
    }
    conflicts
}

/// Lowest and highest polarity holders. Ties resolve to the first lowest and
/// the last highest in iteration order.
fn extremes(opinions: &OpinionSet) -> Option<(&Opinion, &Opinion)> {
    let mut iter = opinions.iter();
    let first = iter.next()?;
    let (mut low, mut high) = (first, first);
    for opinion in iter {
        if opinion.polarity < low.polarity {
            low = opinion;
        }
        if opinion.polarity >= high.polarity {
            high = opinion;
        }
    }
    Some((low, high))
}

fn sentiment_divergence(opinions: &OpinionSet) -> Option<Conflict> {
    let (low, high) = extremes(opinions)?;
    if high.polarity - low.polarity <= SENTIMENT_DIVERGENCE_THRESHOLD {
        return None;
    }

    Some(Conflict {
        kind: ConflictKind::SentimentDivergence,
        description: format!(
            "{} sees {:.2} sentiment while {} sees {:.2}",
            low.perspective, low.polarity, high.perspective, high.polarity
        ),
        implication: "High uncertainty in market reaction".to_string(),
    })
}

fn timing_disagreement(opinions: &OpinionSet) -> Option<Conflict> {
    let distinct: HashSet<_> = opinions.iter().map(|o| o.horizon).collect();
    if distinct.len() <= MAX_AGREEING_HORIZONS {
        return None;
    }

    let pairs: Vec<String> = opinions
        .iter()
        .map(|o| format!("{}={}", o.perspective, o.horizon.as_str()))
        .collect();

    Some(Conflict {
        kind: ConflictKind::TimingDisagreement,
        description: format!("Agents disagree on impact timing: {}", pairs.join(", ")),
        implication: "Mixed signals on when impact will materialize".to_string(),
    })
}

fn impact_magnitude_conflict(opinions: &OpinionSet) -> Option<Conflict> {
    let ordinals = opinions.iter().map(|o| o.impact.ordinal());
    let max = ordinals.clone().max()?;
    let min = ordinals.min()?;
    if max - min < IMPACT_SPREAD_THRESHOLD {
        return None;
    }

    Some(Conflict {
        kind: ConflictKind::ImpactMagnitudeConflict,
        description: "Agents disagree on impact severity".to_string(),
        implication: "Uncertainty in reaction magnitude".to_string(),
    })
}
