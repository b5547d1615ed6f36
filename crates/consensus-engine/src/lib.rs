//! Consensus Engine
//!
//! Synthesizes the structured opinions of several analytical perspectives into
//! one consensus decision: agreement scoring, conflict detection,
//! conflict-aware weighting, blended verdicts, evidence ranking, an action
//! recommendation and a narrative explanation. Every component is a pure
//! function of its inputs.

pub mod aggregator;
pub mod agreement;
pub mod config;
pub mod conflicts;
pub mod engine;
pub mod evidence;
pub mod narrative;
pub mod profiles;
pub mod recommendation;
pub mod volatility;
pub mod weights;

pub use config::{EngineConfig, Role, RoleMap};
pub use engine::ConsensusEngine;
pub use profiles::{WeightProfile, WEIGHT_PROFILES};
pub use weights::WeightSelection;
