use analysis_core::{
    AnalysisError, ImpactLevel, NewsItem, Opinion, PerspectiveAnalyzer, Recommendation,
    TimeHorizon,
};
use async_trait::async_trait;
use consensus_engine::{ConsensusEngine, RoleMap};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::{notable_insights, AnalysisOrchestrator};

struct FixedAnalyzer {
    id: &'static str,
    polarity: f64,
    horizon: TimeHorizon,
    delay_ms: u64,
}

#[async_trait]
impl PerspectiveAnalyzer for FixedAnalyzer {
    fn perspective_id(&self) -> &str {
        self.id
    }

    async fn analyze(&self, item: &NewsItem) -> Result<Opinion, AnalysisError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(Opinion {
            perspective: self.id.to_string(),
            polarity: self.polarity,
            confidence: 0.9,
            impact: ImpactLevel::High,
            horizon: self.horizon,
            primary_factors: vec!["Record profits".to_string()],
            risk_factors: vec![],
            opportunities: vec![],
            reasoning: format!("read {}", item.headline),
            supporting_quotes: vec![],
            specialist_insights: BTreeMap::new(),
        })
    }
}

struct FailingAnalyzer;

#[async_trait]
impl PerspectiveAnalyzer for FailingAnalyzer {
    fn perspective_id(&self) -> &str {
        "MarketDynamicsAgent"
    }

    async fn analyze(&self, _item: &NewsItem) -> Result<Opinion, AnalysisError> {
        Err(AnalysisError::Producer("model timed out".to_string()))
    }
}

fn fixed(id: &'static str, polarity: f64, delay_ms: u64) -> Arc<dyn PerspectiveAnalyzer> {
    Arc::new(FixedAnalyzer {
        id,
        polarity,
        horizon: TimeHorizon::ShortTerm,
        delay_ms,
    })
}

fn item() -> NewsItem {
    NewsItem {
        item_id: "FIN-001".to_string(),
        headline: "Tesla crushes Q3 expectations".to_string(),
        content: "Record profits, but turbulent times ahead.".to_string(),
        published_at: Some("2024-10-22T16:00:00Z".to_string()),
    }
}

#[tokio::test]
async fn opinions_keep_registration_order() {
    // Slowest first: completion order must not leak into the result
    let orchestrator = AnalysisOrchestrator::new(ConsensusEngine::default())
        .with_analyzer(fixed("SentimentAnalystAgent", 0.8, 30))
        .with_analyzer(fixed("FundamentalAnalystAgent", 0.75, 10))
        .with_analyzer(fixed("MarketDynamicsAgent", 0.82, 0));

    let report = orchestrator.analyze(&item()).await.unwrap();

    assert_eq!(
        report.consensus.opinions.perspectives().collect::<Vec<_>>(),
        vec!["SentimentAnalystAgent", "FundamentalAnalystAgent", "MarketDynamicsAgent"]
    );
    assert!(report.failed_perspectives.is_empty());
    assert_eq!(report.consensus.unified_factors, vec!["record profits"]);
    assert_eq!(report.consensus.recommendation, Recommendation::StrongBuy);
    assert_eq!(
        report.notable_insights,
        vec!["Strong agent alignment on clear market signal"]
    );
}

#[tokio::test]
async fn failed_producers_are_reported_not_fatal() {
    let orchestrator = AnalysisOrchestrator::new(ConsensusEngine::default())
        .with_analyzer(fixed("SentimentAnalystAgent", 0.6, 0))
        .with_analyzer(fixed("FundamentalAnalystAgent", -0.6, 0))
        .with_analyzer(Arc::new(FailingAnalyzer));

    let report = orchestrator.analyze(&item()).await.unwrap();

    assert_eq!(report.consensus.opinions.len(), 2);
    assert_eq!(report.failed_perspectives.len(), 1);
    assert_eq!(report.failed_perspectives[0].perspective, "MarketDynamicsAgent");
    assert!(report.failed_perspectives[0].error.contains("model timed out"));
    assert!(report
        .notable_insights
        .contains(&"Major sentiment/fundamentals divergence detected".to_string()));
}

#[tokio::test]
async fn no_opinions_is_an_error() {
    let orchestrator =
        AnalysisOrchestrator::new(ConsensusEngine::default()).with_analyzer(Arc::new(FailingAnalyzer));

    let err = orchestrator.analyze(&item()).await.unwrap_err();
    assert!(matches!(err, AnalysisError::NoOpinions { ref item_id } if item_id == "FIN-001"));
}

#[tokio::test]
async fn report_serializes() {
    let orchestrator = AnalysisOrchestrator::new(ConsensusEngine::default())
        .with_analyzer(fixed("SentimentAnalystAgent", 0.1, 0));
    let report = orchestrator.analyze(&item()).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["item_id"], "FIN-001");
    assert_eq!(json["consensus"]["recommendation"], "hold");
}

#[tokio::test]
async fn multiple_conflicts_insight() {
    let orchestrator = AnalysisOrchestrator::new(ConsensusEngine::default())
        .with_analyzer(Arc::new(FixedAnalyzer {
            id: "SentimentAnalystAgent",
            polarity: 0.9,
            horizon: TimeHorizon::Immediate,
            delay_ms: 0,
        }))
        .with_analyzer(Arc::new(FixedAnalyzer {
            id: "FundamentalAnalystAgent",
            polarity: 0.5,
            horizon: TimeHorizon::MediumTerm,
            delay_ms: 0,
        }))
        .with_analyzer(Arc::new(FixedAnalyzer {
            id: "MarketDynamicsAgent",
            polarity: -0.4,
            horizon: TimeHorizon::LongTerm,
            delay_ms: 0,
        }));

    let report = orchestrator.analyze(&item()).await.unwrap();
    assert_eq!(report.consensus.conflicts.len(), 2);

    let insights = notable_insights(&report.consensus, &RoleMap::default());
    assert_eq!(insights, vec!["Multiple conflicts suggest high uncertainty"]);
}
