use async_trait::async_trait;
use crate::{AnalysisError, NewsItem, Opinion};

/// A single analytical perspective that turns an item into a structured opinion.
///
/// Implementations are opaque to the consensus engine; only the returned
/// `Opinion` matters. The returned opinion's `perspective` field should equal
/// `perspective_id()`.
#[async_trait]
pub trait PerspectiveAnalyzer: Send + Sync {
    fn perspective_id(&self) -> &str;

    async fn analyze(&self, item: &NewsItem) -> Result<Opinion, AnalysisError>;
}
