// Core algorithm exports
pub mod allocator;
pub mod scoring;
pub mod validate;

pub use allocator::Allocator;
pub use scoring::calculate_match_score;
pub use validate::{validate_customer, validate_manager, ValidationError};
