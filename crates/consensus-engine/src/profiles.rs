use analysis_core::WeightProfileKind;
use serde::Serialize;

use crate::Role;

/// Fixed split of blending weight across the three roles (sums to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightProfile {
    pub kind: WeightProfileKind,
    pub sentiment: f64,
    pub fundamental: f64,
    pub market_dynamics: f64,
}

/// Canonical profiles. Read-only and shared by every synthesis call.
pub static WEIGHT_PROFILES: [WeightProfile; 4] = [
    WeightProfile {
        kind: WeightProfileKind::Balanced,
        sentiment: 0.33,
        fundamental: 0.34,
        market_dynamics: 0.33,
    },
    WeightProfile {
        kind: WeightProfileKind::EarningsFocused,
        sentiment: 0.2,
        fundamental: 0.6,
        market_dynamics: 0.2,
    },
    WeightProfile {
        kind: WeightProfileKind::MomentumDriven,
        sentiment: 0.4,
        fundamental: 0.2,
        market_dynamics: 0.4,
    },
    WeightProfile {
        kind: WeightProfileKind::UncertaintyHigh,
        sentiment: 0.3,
        fundamental: 0.3,
        market_dynamics: 0.4,
    },
];

impl WeightProfile {
    pub fn of(kind: WeightProfileKind) -> &'static WeightProfile {
        match kind {
            WeightProfileKind::Balanced => &WEIGHT_PROFILES[0],
            WeightProfileKind::EarningsFocused => &WEIGHT_PROFILES[1],
            WeightProfileKind::MomentumDriven => &WEIGHT_PROFILES[2],
            WeightProfileKind::UncertaintyHigh => &WEIGHT_PROFILES[3],
        }
    }

    pub fn weight(&self, role: Role) -> f64 {
        match role {
            Role::Sentiment => self.sentiment,
            Role::Fundamental => self.fundamental,
            Role::MarketDynamics => self.market_dynamics,
        }
    }

    pub fn total(&self) -> f64 {
        self.sentiment + self.fundamental + self.market_dynamics
    }
}
