use crate::models::{Customer, Manager, ParseTagError};
use thiserror::Error;

/// Boundary validation errors for customer and manager profiles
///
/// Raised before any scoring runs. The score engine itself never fails on
/// tag-vocabulary issues; out-of-vocabulary values are rejected here (or
/// structurally by serde at the HTTP boundary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("profile identifier must not be empty")]
    EmptyId,

    #[error("customer {0} has no needs selected")]
    EmptyNeeds(String),

    #[error("customer {0} has no hobbies selected")]
    EmptyHobbies(String),

    #[error("manager {0} has no capabilities selected")]
    EmptyCapabilities(String),

    #[error("manager {0} has no hobbies selected")]
    EmptyManagerHobbies(String),

    #[error(transparent)]
    UnknownTag(#[from] ParseTagError),
}

/// Validate a customer profile before it reaches the score engine
pub fn validate_customer(customer: &Customer) -> Result<(), ValidationError> {
    if customer.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if customer.needs.is_empty() {
        return Err(ValidationError::EmptyNeeds(customer.id.clone()));
    }
    if customer.hobbies.is_empty() {
        return Err(ValidationError::EmptyHobbies(customer.id.clone()));
    }
    Ok(())
}

/// Validate a manager profile before registration
pub fn validate_manager(manager: &Manager) -> Result<(), ValidationError> {
    if manager.id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if manager.capabilities.is_empty() {
        return Err(ValidationError::EmptyCapabilities(manager.id.clone()));
    }
    if manager.hobbies.is_empty() {
        return Err(ValidationError::EmptyManagerHobbies(manager.id.clone()));
    }
    Ok(())
}
