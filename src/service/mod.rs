//! The orchestration-and-filtering core.

pub mod accuracy;
pub mod filter;
pub mod gate;
pub mod grader;
pub mod orchestrator;
pub mod query;
pub mod rate_limiter;
pub mod retention;

pub use accuracy::AccuracyEvaluator;
pub use filter::{
    Decision, FilterSettings, OutcomeModel, PointsRateModel, Prediction, ProbabilisticFilter,
};
pub use gate::LeagueGate;
pub use grader::{GradeReport, ResultGrader};
pub use orchestrator::{CredentialSlot, SyncOrchestrator, SyncSettings};
pub use query::QueryService;
pub use rate_limiter::{acquire_rotating, Acquire, RateLimiter};
pub use retention::{RetentionPolicy, RetentionSweeper, SweepReport};
