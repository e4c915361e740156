//! Talk similarity
//!
//! Builds a resumable cache of pairwise semantic similarity scores between
//! conference talks, using an LLM as the scoring oracle:
//! - Retried oracle calls with a bounded attempt budget
//! - Append-only cache persisted after every new pair
//! - Resumes from an existing cache file without re-scoring

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
