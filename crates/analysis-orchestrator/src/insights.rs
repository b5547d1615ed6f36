use analysis_core::Consensus;
use consensus_engine::RoleMap;

/// Highlights worth surfacing next to a consensus
pub fn notable_insights(consensus: &Consensus, roles: &RoleMap) -> Vec<String> {
    let mut insights = Vec::new();

    if consensus.consensus_score > 0.8 && consensus.overall_sentiment.is_strong() {
        insights.push("Strong agent alignment on clear market signal".to_string());
    }

    if consensus.conflicts.len() >= 2 {
        insights.push("Multiple conflicts suggest high uncertainty".to_string());
    }

    if roles
        .sentiment_fundamental_gap(&consensus.opinions)
        .is_some_and(|gap| gap > 1.0)
    {
        insights.push("Major sentiment/fundamentals divergence detected".to_string());
    }

    insights
}
