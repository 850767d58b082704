//! Client for the external GA/Tabu-Search optimizer backend.
//!
//! Covers the three optimization endpoints, the campaign/ad fetch
//! collaborators, the per-submission integer-id handoff, and a local
//! fallback that answers prediction requests when the backend is down.

pub mod client;
pub mod models;
pub mod submission;

pub use client::OptimizerClient;
pub use models::{
    AlgorithmComparison, ComparisonRequest, GaParams, OptimizationOutcome, OptimizationRequest,
    TabuParams, TabuSearchRequest,
};
pub use submission::{CampaignAssignment, ResolvedOptimization, SubmissionBatch};
