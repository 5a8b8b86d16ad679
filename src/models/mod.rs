// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Assignment, AssignmentPolicy, Customer, CustomerClass, Hobby, Manager, MatchResult, Need,
    ParseTagError, ScoringWeights,
};
pub use requests::{ManualAssignRequest, RankRequest};
pub use responses::{
    AutoAssignResponse, ClassCount, ErrorResponse, HealthResponse, ManagerLoad,
    ManualAssignResponse, RankResponse, StatsResponse,
};
