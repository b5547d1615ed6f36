use analysis_core::{AnalysisError, Consensus, NewsItem, OpinionSet, PerspectiveAnalyzer};
use chrono::{DateTime, Utc};
use consensus_engine::ConsensusEngine;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

pub mod insights;
#[cfg(test)]
mod tests;

pub use insights::notable_insights;

/// A perspective that failed to produce an opinion for an item
#[derive(Debug, Clone, Serialize)]
pub struct ProducerFailure {
    pub perspective: String,
    pub error: String,
}

/// Everything produced for one item
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub item_id: String,
    pub analyzed_at: DateTime<Utc>,
    pub processing_ms: u64,
    pub consensus: Consensus,
    pub notable_insights: Vec<String>,
    pub failed_perspectives: Vec<ProducerFailure>,
}

/// Collects opinions from every registered perspective, then hands them to
/// the consensus engine.
pub struct AnalysisOrchestrator {
    analyzers: Vec<Arc<dyn PerspectiveAnalyzer>>,
    engine: ConsensusEngine,
}

impl AnalysisOrchestrator {
    pub fn new(engine: ConsensusEngine) -> Self {
        Self {
            analyzers: Vec::new(),
            engine,
        }
    }

    /// Register a perspective. Opinions are collected in registration order.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn PerspectiveAnalyzer>) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn engine(&self) -> &ConsensusEngine {
        &self.engine
    }

    /// Run every perspective concurrently. Failures are reported, not fatal.
    pub async fn gather_opinions(&self, item: &NewsItem) -> (OpinionSet, Vec<ProducerFailure>) {
        let futures = self.analyzers.iter().map(|analyzer| analyzer.analyze(item));
        let results = futures_util::future::join_all(futures).await;

        let mut opinions = OpinionSet::new();
        let mut failures = Vec::new();

        for (analyzer, result) in self.analyzers.iter().zip(results) {
            match result {
                Ok(opinion) => {
                    if opinion.perspective != analyzer.perspective_id() {
                        tracing::warn!(
                            "Analyzer {} returned an opinion labelled {}",
                            analyzer.perspective_id(),
                            opinion.perspective
                        );
                    }
                    tracing::debug!(
                        "{}: polarity {:+.2}, impact {}, confidence {:.0}%",
                        opinion.perspective,
                        opinion.polarity,
                        opinion.impact.as_str(),
                        opinion.confidence * 100.0
                    );
                    if opinions.insert(opinion).is_some() {
                        tracing::warn!(
                            "Duplicate perspective from {}; keeping the later opinion",
                            analyzer.perspective_id()
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Perspective {} failed for {}: {}",
                        analyzer.perspective_id(),
                        item.item_id,
                        e
                    );
                    failures.push(ProducerFailure {
                        perspective: analyzer.perspective_id().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        (opinions, failures)
    }

    /// Gather opinions for `item` and synthesize them
    pub async fn analyze(&self, item: &NewsItem) -> Result<AnalysisReport, AnalysisError> {
        let started = Instant::now();
        tracing::info!(
            "Analyzing {} with {} perspective(s)",
            item.item_id,
            self.analyzers.len()
        );

        let (opinions, failed_perspectives) = self.gather_opinions(item).await;
        if opinions.is_empty() {
            return Err(AnalysisError::NoOpinions {
                item_id: item.item_id.clone(),
            });
        }

        let consensus = self.engine.synthesize(&item.item_id, &opinions)?;
        let notable_insights = notable_insights(&consensus, &self.engine.config().roles);
        let processing_ms = started.elapsed().as_millis() as u64;

        tracing::info!(
            "{}: {} at {:.0}% confidence (consensus {:.3}, {} conflict(s), {} ms)",
            item.item_id,
            consensus.recommendation.as_str(),
            consensus.action_confidence * 100.0,
            consensus.consensus_score,
            consensus.conflicts.len(),
            processing_ms
        );

        Ok(AnalysisReport {
            item_id: item.item_id.clone(),
            analyzed_at: Utc::now(),
            processing_ms,
            consensus,
            notable_insights,
            failed_perspectives,
        })
    }
}
