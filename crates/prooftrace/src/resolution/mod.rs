//! Resolution engine: clause store, literal index, work queue and main loop

pub mod engine;
pub mod index;
pub mod queue;
pub mod store;

pub use engine::{Budget, ResolutionEngine, ResolutionStats, Saturation, StopReason};
pub use index::LiteralIndex;
pub use queue::WorkQueue;
pub use store::{Admission, ClauseStore};
