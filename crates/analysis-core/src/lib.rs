pub mod consensus;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;

pub use consensus::*;
pub use error::*;
pub use traits::*;
pub use types::*;
