//! Heuristic budget-allocation engine.
//!
//! Given one campaign's targeting selections and total budget, this crate
//! expands the demographic segments, predicts per-segment performance,
//! distributes the budget greedily by ROI rank, and rolls the result up into
//! a portfolio summary with recommendations. It is the local stand-in for
//! the external GA/Tabu-Search optimizer spoken to by `bidder-optimizer`.

pub mod allocator;
pub mod engine;
pub mod predictor;
pub mod recommend;
pub mod segments;
pub mod summary;
pub mod types;

pub use engine::{run_prediction, validate};
pub use types::{
    BudgetAllocation, CampaignSummary, PredictionResponse, RoiLevel, SegmentPrediction,
};
