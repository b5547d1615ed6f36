use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item under analysis (typically a news article)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub item_id: String,
    pub headline: String,
    pub content: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Expected market impact, ordered negligible < ... < very_high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Negligible,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ImpactLevel {
    /// Ordinal on the 1..5 impact scale. Both blending and conflict
    /// detection go through this table.
    pub fn ordinal(&self) -> u8 {
        match self {
            ImpactLevel::Negligible => 1,
            ImpactLevel::Low => 2,
            ImpactLevel::Moderate => 3,
            ImpactLevel::High => 4,
            ImpactLevel::VeryHigh => 5,
        }
    }

    /// Map a weighted ordinal back onto the scale using midpoint cut points.
    pub fn from_weighted_ordinal(value: f64) -> Self {
        if value >= 4.5 {
            ImpactLevel::VeryHigh
        } else if value >= 3.5 {
            ImpactLevel::High
        } else if value >= 2.5 {
            ImpactLevel::Moderate
        } else if value >= 1.5 {
            ImpactLevel::Low
        } else {
            ImpactLevel::Negligible
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Negligible => "negligible",
            ImpactLevel::Low => "low",
            ImpactLevel::Moderate => "moderate",
            ImpactLevel::High => "high",
            ImpactLevel::VeryHigh => "very_high",
        }
    }
}

/// When an opinion expects the impact to materialize (unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeHorizon::Immediate => "immediate",
            TimeHorizon::ShortTerm => "short_term",
            TimeHorizon::MediumTerm => "medium_term",
            TimeHorizon::LongTerm => "long_term",
        }
    }
}

/// Five-level blended sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentSignal {
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    StrongBearish,
}

impl SentimentSignal {
    /// Threshold a polarity in [-1, 1]. Lower bounds are closed.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.6 {
            SentimentSignal::StrongBullish
        } else if score >= 0.2 {
            SentimentSignal::Bullish
        } else if score >= -0.2 {
            SentimentSignal::Neutral
        } else if score >= -0.6 {
            SentimentSignal::Bearish
        } else {
            SentimentSignal::StrongBearish
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, SentimentSignal::StrongBullish | SentimentSignal::StrongBearish)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentSignal::StrongBullish => "strong_bullish",
            SentimentSignal::Bullish => "bullish",
            SentimentSignal::Neutral => "neutral",
            SentimentSignal::Bearish => "bearish",
            SentimentSignal::StrongBearish => "strong_bearish",
        }
    }
}

/// Surfaced action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
    HighVolatilityCaution,
}

impl Recommendation {
    pub fn from_signal(signal: SentimentSignal) -> Self {
        match signal {
            SentimentSignal::StrongBullish => Recommendation::StrongBuy,
            SentimentSignal::Bullish => Recommendation::Buy,
            SentimentSignal::Neutral => Recommendation::Hold,
            SentimentSignal::Bearish => Recommendation::Sell,
            SentimentSignal::StrongBearish => Recommendation::StrongSell,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong_buy",
            Recommendation::Buy => "buy",
            Recommendation::Hold => "hold",
            Recommendation::Sell => "sell",
            Recommendation::StrongSell => "strong_sell",
            Recommendation::HighVolatilityCaution => "high_volatility_caution",
        }
    }

    /// Human-readable label, e.g. "High Volatility Caution"
    pub fn to_label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
            Recommendation::HighVolatilityCaution => "High Volatility Caution",
        }
    }
}

/// Expected volatility of the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLevel {
    VeryHigh,
    High,
    Moderate,
    Low,
}

impl VolatilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityLevel::VeryHigh => "very_high",
            VolatilityLevel::High => "high",
            VolatilityLevel::Moderate => "moderate",
            VolatilityLevel::Low => "low",
        }
    }
}

/// One perspective's structured assessment of an item.
///
/// Range checks (polarity in [-1, 1], confidence in [0, 1], at most five
/// primary factors) belong to whoever produces the opinion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub perspective: String,
    pub polarity: f64,
    pub confidence: f64,
    pub impact: ImpactLevel,
    pub horizon: TimeHorizon,
    pub primary_factors: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub supporting_quotes: Vec<String>,
    #[serde(default)]
    pub specialist_insights: BTreeMap<String, serde_json::Value>,
}

/// Opinions keyed by perspective identifier, in first-insertion order.
///
/// Inserting under an identifier that is already present replaces the
/// existing opinion in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Opinion>", into = "Vec<Opinion>")]
pub struct OpinionSet {
    opinions: Vec<Opinion>,
}

impl OpinionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an opinion, returning the one it replaced (if any).
    pub fn insert(&mut self, opinion: Opinion) -> Option<Opinion> {
        match self.opinions.iter_mut().find(|o| o.perspective == opinion.perspective) {
            Some(slot) => Some(std::mem::replace(slot, opinion)),
            None => {
                self.opinions.push(opinion);
                None
            }
        }
    }

    pub fn get(&self, perspective: &str) -> Option<&Opinion> {
        self.opinions.iter().find(|o| o.perspective == perspective)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opinion> {
        self.opinions.iter()
    }

    pub fn perspectives(&self) -> impl Iterator<Item = &str> {
        self.opinions.iter().map(|o| o.perspective.as_str())
    }

    pub fn polarities(&self) -> Vec<f64> {
        self.opinions.iter().map(|o| o.polarity).collect()
    }

    pub fn len(&self) -> usize {
        self.opinions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opinions.is_empty()
    }
}

impl From<Vec<Opinion>> for OpinionSet {
    fn from(opinions: Vec<Opinion>) -> Self {
        opinions.into_iter().collect()
    }
}

impl From<OpinionSet> for Vec<Opinion> {
    fn from(set: OpinionSet) -> Self {
        set.opinions
    }
}

impl FromIterator<Opinion> for OpinionSet {
    fn from_iter<I: IntoIterator<Item = Opinion>>(iter: I) -> Self {
        let mut set = OpinionSet::new();
        for opinion in iter {
            set.insert(opinion);
        }
        set
    }
}

impl<'a> IntoIterator for &'a OpinionSet {
    type Item = &'a Opinion;
    type IntoIter = std::slice::Iter<'a, Opinion>;

    fn into_iter(self) -> Self::IntoIter {
        self.opinions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opinion(perspective: &str, polarity: f64) -> Opinion {
        Opinion {
            perspective: perspective.to_string(),
            polarity,
            confidence: 0.8,
            impact: ImpactLevel::Moderate,
            horizon: TimeHorizon::ShortTerm,
            primary_factors: vec![],
            risk_factors: vec![],
            opportunities: vec![],
            reasoning: String::new(),
            supporting_quotes: vec![],
            specialist_insights: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sentiment_thresholds() {
        assert_eq!(SentimentSignal::from_score(0.6), SentimentSignal::StrongBullish);
        assert_eq!(SentimentSignal::from_score(0.59), SentimentSignal::Bullish);
        assert_eq!(SentimentSignal::from_score(0.2), SentimentSignal::Bullish);
        assert_eq!(SentimentSignal::from_score(-0.2), SentimentSignal::Neutral);
        assert_eq!(SentimentSignal::from_score(-0.21), SentimentSignal::Bearish);
        assert_eq!(SentimentSignal::from_score(-0.6), SentimentSignal::Bearish);
        assert_eq!(SentimentSignal::from_score(-0.61), SentimentSignal::StrongBearish);
    }

    #[test]
    fn test_impact_scale() {
        assert_eq!(ImpactLevel::Negligible.ordinal(), 1);
        assert_eq!(ImpactLevel::VeryHigh.ordinal(), 5);
        assert_eq!(ImpactLevel::from_weighted_ordinal(4.5), ImpactLevel::VeryHigh);
        assert_eq!(ImpactLevel::from_weighted_ordinal(4.49), ImpactLevel::High);
        assert_eq!(ImpactLevel::from_weighted_ordinal(2.5), ImpactLevel::Moderate);
        assert_eq!(ImpactLevel::from_weighted_ordinal(1.49), ImpactLevel::Negligible);
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&Recommendation::HighVolatilityCaution).unwrap();
        assert_eq!(json, "\"high_volatility_caution\"");
        let horizon: TimeHorizon = serde_json::from_str("\"short_term\"").unwrap();
        assert_eq!(horizon, TimeHorizon::ShortTerm);
    }

    #[test]
    fn test_opinion_set_replaces_in_place() {
        let mut set = OpinionSet::new();
        set.insert(opinion("a", 0.1));
        set.insert(opinion("b", 0.2));
        let replaced = set.insert(opinion("a", -0.5));

        assert_eq!(replaced.map(|o| o.polarity), Some(0.1));
        assert_eq!(set.len(), 2);
        assert_eq!(set.perspectives().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(set.get("a").map(|o| o.polarity), Some(-0.5));
    }

    #[test]
    fn test_opinion_set_json_is_an_array() {
        let set: OpinionSet = vec![opinion("a", 0.1), opinion("b", 0.2)].into();
        let value = serde_json::to_value(&set).unwrap();
        assert!(value.is_array());

        let back: OpinionSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, set);
    }
}
