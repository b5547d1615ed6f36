use analysis_core::{AnalysisError, Consensus, OpinionSet};

use crate::aggregator::aggregate;
use crate::agreement::{agreement_matrix, consensus_score};
use crate::conflicts::detect_conflicts;
use crate::evidence::{key_opportunities, key_risks, unified_factors};
use crate::narrative::{detailed_rationale, executive_summary};
use crate::recommendation::recommend;
use crate::volatility::assess_volatility;
use crate::weights::select_weights;
use crate::EngineConfig;

/// Stateless synthesizer. Holds only read-only configuration, so one engine
/// can serve any number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct ConsensusEngine {
    config: EngineConfig,
}

impl ConsensusEngine {
    pub fn new(config: EngineConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Synthesize one item's opinions into a consensus.
    ///
    /// Fails only on an empty opinion set; missing roles degrade gracefully.
    pub fn synthesize(&self, item_id: &str, opinions: &OpinionSet) -> Result<Consensus, AnalysisError> {
        if opinions.is_empty() {
            return Err(AnalysisError::EmptyOpinionSet);
        }
        let roles = &self.config.roles;

        let consensus_score = consensus_score(opinions);
        let agreement_matrix = agreement_matrix(opinions);
        let conflicts = detect_conflicts(opinions);

        let selection = select_weights(opinions, &conflicts, roles);
        let blend = aggregate(opinions, &selection);

        let action = recommend(opinions, blend.sentiment, &conflicts, roles);
        let volatility = assess_volatility(opinions, conflicts.len());

        let executive_summary = executive_summary(
            blend.sentiment,
            blend.impact,
            action.recommendation,
            &conflicts,
            self.config.summary_max_chars,
        );
        let detailed_rationale = detailed_rationale(opinions, &conflicts, &selection);

        tracing::debug!(
            "Consensus for {}: {} ({:.3}) score={:.3} conflicts={} volatility={}",
            item_id,
            action.recommendation.as_str(),
            action.confidence,
            consensus_score,
            conflicts.len(),
            volatility.as_str()
        );

        Ok(Consensus {
            item_id: item_id.to_string(),
            opinions: opinions.clone(),
            overall_sentiment: blend.sentiment,
            overall_impact: blend.impact,
            consensus_score,
            agreement_matrix,
            unified_factors: unified_factors(opinions),
            conflicts,
            weight_profile: selection.profile,
            weight_rationale: selection.rationale,
            weights: selection.weights,
            recommendation: action.recommendation,
            action_confidence: action.confidence,
            volatility,
            key_risks: key_risks(opinions),
            key_opportunities: key_opportunities(opinions),
            executive_summary,
            detailed_rationale,
        })
    }
}
