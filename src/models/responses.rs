use crate::models::domain::{Assignment, CustomerClass, MatchResult};
use serde::{Deserialize, Serialize};

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub customer_id: String,
    pub results: Vec<MatchResult>,
    pub total_managers: usize,
}

/// Response for the bulk auto-assign endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoAssignResponse {
    pub run_id: String,
    pub assigned_count: usize,
    pub assignments: Vec<Assignment>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Response for the manual assign endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAssignResponse {
    pub assignment_id: String,
    pub customer_id: String,
    pub manager_id: String,
    pub match_detail: MatchResult,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Per-class customer count for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCount {
    pub class: CustomerClass,
    pub count: usize,
}

/// Per-manager load for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerLoad {
    pub manager_id: String,
    pub customer_count: u32,
}

/// Response for the admin stats endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_customers: usize,
    pub total_managers: usize,
    pub unassigned_customers: usize,
    pub customer_classes: Vec<ClassCount>,
    pub manager_loads: Vec<ManagerLoad>,
}
