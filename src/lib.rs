//! CRM Match - customer-manager matching service for the bank CRM
//!
//! This library provides the matching core used by the CRM: a pure score
//! engine, a ranking/auto-assignment allocator, and the in-memory registry
//! the HTTP layer drives. The core operates on snapshots and returns
//! assignment deltas; all state mutation happens in the registry.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, Allocator, ValidationError};
pub use crate::models::{
    Assignment, AssignmentPolicy, Customer, CustomerClass, Hobby, Manager, MatchResult, Need,
    ScoringWeights,
};
pub use crate::services::Registry;
