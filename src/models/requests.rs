use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to rank the manager roster for a customer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "customer_id", rename = "customerId")]
    pub customer_id: String,
    /// Result cap; omitted means the configured `matching.default_limit`
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to assign one customer to a chosen manager
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ManualAssignRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "customer_id", rename = "customerId")]
    pub customer_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "manager_id", rename = "managerId")]
    pub manager_id: String,
}
