use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Empty opinion set: at least one perspective is required")]
    EmptyOpinionSet,

    #[error("No opinions collected for item {item_id}")]
    NoOpinions { item_id: String },

    #[error("Producer error: {0}")]
    Producer(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
