use analysis_core::{AnalysisError, Opinion, OpinionSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SENTIMENT_PERSPECTIVE: &str = "SentimentAnalystAgent";
pub const DEFAULT_FUNDAMENTAL_PERSPECTIVE: &str = "FundamentalAnalystAgent";
pub const DEFAULT_MARKET_PERSPECTIVE: &str = "MarketDynamicsAgent";
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 500;

/// Smallest summary cap accepted; room for the ellipsis plus a few words.
const MIN_SUMMARY_MAX_CHARS: usize = 16;

/// Canonical perspective roles the weight profiles are defined over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Sentiment,
    Fundamental,
    MarketDynamics,
}

impl Role {
    pub fn all() -> [Role; 3] {
        [Role::Sentiment, Role::Fundamental, Role::MarketDynamics]
    }
}

/// Binds each role to the perspective identifier that fills it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMap {
    pub sentiment: String,
    pub fundamental: String,
    pub market_dynamics: String,
}

impl Default for RoleMap {
    fn default() -> Self {
        Self {
            sentiment: DEFAULT_SENTIMENT_PERSPECTIVE.to_string(),
            fundamental: DEFAULT_FUNDAMENTAL_PERSPECTIVE.to_string(),
            market_dynamics: DEFAULT_MARKET_PERSPECTIVE.to_string(),
        }
    }
}

impl RoleMap {
    pub fn perspective(&self, role: Role) -> &str {
        match role {
            Role::Sentiment => &self.sentiment,
            Role::Fundamental => &self.fundamental,
            Role::MarketDynamics => &self.market_dynamics,
        }
    }

    pub fn role_of(&self, perspective: &str) -> Option<Role> {
        Role::all()
            .into_iter()
            .find(|&role| self.perspective(role) == perspective)
    }

    /// The opinion filling `role`, if that perspective is present
    pub fn opinion<'a>(&self, role: Role, opinions: &'a OpinionSet) -> Option<&'a Opinion> {
        opinions.get(self.perspective(role))
    }

    /// Absolute polarity gap between the sentiment and fundamentals roles,
    /// only when both are present.
    pub fn sentiment_fundamental_gap(&self, opinions: &OpinionSet) -> Option<f64> {
        let sentiment = self.opinion(Role::Sentiment, opinions)?;
        let fundamental = self.opinion(Role::Fundamental, opinions)?;
        Some((sentiment.polarity - fundamental.polarity).abs())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub roles: RoleMap,
    /// Hard cap on the executive summary length, in characters
    pub summary_max_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            roles: RoleMap::default(),
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

impl EngineConfig {
    /// Load from `CONSENSUS_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            roles: RoleMap {
                sentiment: lookup("CONSENSUS_SENTIMENT_PERSPECTIVE")
                    .unwrap_or_else(|| DEFAULT_SENTIMENT_PERSPECTIVE.to_string()),
                fundamental: lookup("CONSENSUS_FUNDAMENTAL_PERSPECTIVE")
                    .unwrap_or_else(|| DEFAULT_FUNDAMENTAL_PERSPECTIVE.to_string()),
                market_dynamics: lookup("CONSENSUS_MARKET_PERSPECTIVE")
                    .unwrap_or_else(|| DEFAULT_MARKET_PERSPECTIVE.to_string()),
            },
            summary_max_chars: lookup("CONSENSUS_SUMMARY_MAX_CHARS")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MAX_CHARS.to_string())
                .trim()
                .parse()
                .context("CONSENSUS_SUMMARY_MAX_CHARS must be a positive integer")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        let ids: Vec<&str> = Role::all()
            .into_iter()
            .map(|role| self.roles.perspective(role))
            .collect();

        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(AnalysisError::InvalidConfig(
                "role perspective identifiers must not be empty".to_string(),
            ));
        }
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "perspective '{}' is bound to more than one role",
                    id
                )));
            }
        }
        if self.summary_max_chars < MIN_SUMMARY_MAX_CHARS {
            return Err(AnalysisError::InvalidConfig(format!(
                "summary_max_chars must be at least {}",
                MIN_SUMMARY_MAX_CHARS
            )));
        }
        Ok(())
    }
}
