//! Infrastructure services

mod pairwise_scoring_service;

pub use pairwise_scoring_service::{
    Coverage, DEFAULT_PAIR_DELAY, PairwiseScoringService, RunSummary,
};
