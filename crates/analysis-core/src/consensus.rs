use serde::{Deserialize, Serialize};

use crate::{ImpactLevel, OpinionSet, Recommendation, SentimentSignal, VolatilityLevel};

/// Disagreement pattern between perspectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    SentimentDivergence,
    TimingDisagreement,
    ImpactMagnitudeConflict,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::SentimentDivergence => "sentiment_divergence",
            ConflictKind::TimingDisagreement => "timing_disagreement",
            ConflictKind::ImpactMagnitudeConflict => "impact_magnitude_conflict",
        }
    }

    /// Tag rendered as words, e.g. "sentiment divergence"
    pub fn words(&self) -> &'static str {
        match self {
            ConflictKind::SentimentDivergence => "sentiment divergence",
            ConflictKind::TimingDisagreement => "timing disagreement",
            ConflictKind::ImpactMagnitudeConflict => "impact magnitude conflict",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub description: String,
    pub implication: String,
}

/// Pairwise polarity agreement between perspectives.
/// Rows and columns follow `perspectives`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementMatrix {
    pub perspectives: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl AgreementMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.perspectives.iter().position(|p| p == a)?;
        let j = self.perspectives.iter().position(|p| p == b)?;
        self.values.get(i)?.get(j).copied()
    }

    pub fn len(&self) -> usize {
        self.perspectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.perspectives.is_empty()
    }
}

/// Named weighting profile over the three canonical roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfileKind {
    Balanced,
    EarningsFocused,
    MomentumDriven,
    UncertaintyHigh,
}

impl WeightProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightProfileKind::Balanced => "balanced",
            WeightProfileKind::EarningsFocused => "earnings_focused",
            WeightProfileKind::MomentumDriven => "momentum_driven",
            WeightProfileKind::UncertaintyHigh => "uncertainty_high",
        }
    }
}

/// Which selection rule produced the weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRationale {
    /// No escalation rule applied
    Default,
    /// Fundamentals cited earnings/revenue/margin/cash flow
    QuantitativeMetrics,
    /// More than two conflicts were detected
    HighConflict,
    /// Sentiment and fundamentals polarities differ by more than 1.0
    SentimentFundamentalDivergence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveWeight {
    pub perspective: String,
    pub weight: f64,
}

/// Synthesized view of all opinions for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub item_id: String,
    pub opinions: OpinionSet,

    pub overall_sentiment: SentimentSignal,
    pub overall_impact: ImpactLevel,
    /// 0 = total disagreement, 1 = perfect alignment
    pub consensus_score: f64,
    pub agreement_matrix: AgreementMatrix,

    pub unified_factors: Vec<String>,
    pub conflicts: Vec<Conflict>,

    pub weight_profile: WeightProfileKind,
    pub weight_rationale: WeightRationale,
    pub weights: Vec<PerspectiveWeight>,

    pub recommendation: Recommendation,
    pub action_confidence: f64,

    pub volatility: VolatilityLevel,
    pub key_risks: Vec<String>,
    pub key_opportunities: Vec<String>,

    pub executive_summary: String,
    pub detailed_rationale: String,
}

impl Consensus {
    pub fn weight_of(&self, perspective: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.perspective == perspective)
            .map(|w| w.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_lookup_tolerates_ragged_rows() {
        let matrix: AgreementMatrix = serde_json::from_str(
            r#"{"perspectives": ["a", "b", "c"], "values": [[1.0, 0.4], [0.4]]}"#,
        )
        .unwrap();

        assert_eq!(matrix.get("a", "b"), Some(0.4));
        assert_eq!(matrix.get("b", "b"), None);
        assert_eq!(matrix.get("c", "a"), None);
        assert_eq!(matrix.len(), 3);
    }
}
