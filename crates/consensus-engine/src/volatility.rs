use analysis_core::{OpinionSet, VolatilityLevel};

/// Stems that mark a risk factor as volatility-related
const VOLATILITY_STEMS: &[&str] = &["volatil", "uncertain", "swing", "fluctuat"];

const VERY_HIGH_CONFLICTS: usize = 3;
const MODERATE_CONFLICTS: usize = 2;
const HIGH_MENTIONS: usize = 3;

/// Number of risk factors (across all opinions) mentioning a volatility stem
pub fn volatility_mentions(opinions: &OpinionSet) -> usize {
    opinions
        .iter()
        .flat_map(|o| o.risk_factors.iter())
        .filter(|risk| {
            let risk = risk.to_lowercase();
            VOLATILITY_STEMS.iter().any(|stem| risk.contains(stem))
        })
        .count()
}

pub fn assess_volatility(opinions: &OpinionSet, conflict_count: usize) -> VolatilityLevel {
    if conflict_count >= VERY_HIGH_CONFLICTS {
        return VolatilityLevel::VeryHigh;
    }

    let mentions = volatility_mentions(opinions);
    if mentions >= HIGH_MENTIONS {
        VolatilityLevel::High
    } else if conflict_count >= MODERATE_CONFLICTS || mentions >= 1 {
        VolatilityLevel::Moderate
    } else {
        VolatilityLevel::Low
    }
}
