use analysis_core::{Conflict, OpinionSet, PerspectiveWeight, WeightProfileKind, WeightRationale};
use serde::Serialize;

use crate::conflicts::SENTIMENT_DIVERGENCE_THRESHOLD;
use crate::profiles::WeightProfile;
use crate::{Role, RoleMap};

/// Fundamentals citing any of these is read as a quantitative (earnings) story
const QUANTITATIVE_KEYWORDS: &[&str] = &["earnings", "revenue", "margin", "cash flow"];

/// Conflict count above which the uncertainty profile takes over
const HIGH_CONFLICT_COUNT: usize = 2;

/// The chosen profile and how its weights land on the perspectives present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSelection {
    pub profile: WeightProfileKind,
    pub rationale: WeightRationale,
    /// One entry per input perspective, in iteration order; sums to 1.0
    pub weights: Vec<PerspectiveWeight>,
}

impl WeightSelection {
    pub fn weight_of(&self, perspective: &str) -> f64 {
        self.weights
            .iter()
            .find(|w| w.perspective == perspective)
            .map(|w| w.weight)
            .unwrap_or(0.0)
    }
}

fn mentions_quantitative_metrics(factors: &[String]) -> bool {
    let text = factors.join("; ").to_lowercase();
    QUANTITATIVE_KEYWORDS.iter().any(|kw| text.contains(kw))
}

/// Pick a profile. Rules run in order and the last one that applies wins.
pub fn choose_profile(
    opinions: &OpinionSet,
    conflicts: &[Conflict],
    roles: &RoleMap,
) -> (WeightProfileKind, WeightRationale) {
    let mut choice = (WeightProfileKind::Balanced, WeightRationale::Default);

    if let Some(fundamental) = roles.opinion(Role::Fundamental, opinions) {
        if mentions_quantitative_metrics(&fundamental.primary_factors) {
            choice = (
                WeightProfileKind::EarningsFocused,
                WeightRationale::QuantitativeMetrics,
            );
        }
    }

    if conflicts.len() > HIGH_CONFLICT_COUNT {
        choice = (WeightProfileKind::UncertaintyHigh, WeightRationale::HighConflict);
    }

    if let Some(gap) = roles.sentiment_fundamental_gap(opinions) {
        if gap > SENTIMENT_DIVERGENCE_THRESHOLD {
            choice = (
                WeightProfileKind::UncertaintyHigh,
                WeightRationale::SentimentFundamentalDivergence,
            );
        }
    }

    choice
}

/// Spread a profile over the perspectives actually present.
///
/// Role-bound perspectives take their profile weight, renormalized over the
/// roles present; perspectives bound to no role get 0. With no role-bound
/// perspective at all, every perspective gets an equal share.
pub fn distribute(
    profile: &WeightProfile,
    opinions: &OpinionSet,
    roles: &RoleMap,
) -> Vec<PerspectiveWeight> {
    let raw: Vec<(String, f64)> = opinions
        .perspectives()
        .map(|p| {
            let weight = roles.role_of(p).map(|r| profile.weight(r)).unwrap_or(0.0);
            (p.to_string(), weight)
        })
        .collect();

    let total: f64 = raw.iter().map(|(_, w)| w).sum();

    if total <= 0.0 {
        let share = if raw.is_empty() { 0.0 } else { 1.0 / raw.len() as f64 };
        return raw
            .into_iter()
            .map(|(perspective, _)| PerspectiveWeight { perspective, weight: share })
            .collect();
    }

    let total = if (total - 1.0).abs() < 1e-9 { 1.0 } else { total };
    raw.into_iter()
        .map(|(perspective, weight)| PerspectiveWeight {
            perspective,
            weight: weight / total,
        })
        .collect()
}

pub fn select_weights(
    opinions: &OpinionSet,
    conflicts: &[Conflict],
    roles: &RoleMap,
) -> WeightSelection {
    let (profile, rationale) = choose_profile(opinions, conflicts, roles);
    let weights = distribute(WeightProfile::of(profile), opinions, roles);

    tracing::debug!(
        "Weight profile {} selected ({:?}): {:?}",
        profile.as_str(),
        rationale,
        weights
            .iter()
            .map(|w| format!("{}={:.3}", w.perspective, w.weight))
            .collect::<Vec<_>>()
    );

    WeightSelection {
        profile,
        rationale,
        weights,
    }
}
