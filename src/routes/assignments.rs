use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Allocator;
use crate::models::{
    Assignment, AutoAssignResponse, ClassCount, Customer, ErrorResponse, HealthResponse, Manager,
    ManagerLoad, ManualAssignRequest, ManualAssignResponse, RankRequest, RankResponse,
    StatsResponse,
};
use crate::services::{Registry, RegistryError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub allocator: Allocator,
    pub matching: MatchingSettings,
}

/// Configure all matching and assignment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/customers", web::post().to(upsert_customer))
        .route("/customers/{id}", web::get().to(get_customer))
        .route("/managers", web::post().to(upsert_manager))
        .route("/managers/{id}", web::get().to(get_manager))
        .route("/matches/rank", web::post().to(rank_matches))
        .route("/assignments/auto", web::post().to(auto_assign))
        .route("/assignments/manual", web::post().to(manual_assign))
        .route("/admin/stats", web::get().to(admin_stats));
}

/// Resolve a requested result limit against the configured bounds
fn effective_limit(requested: Option<u16>, matching: &MatchingSettings) -> usize {
    requested
        .unwrap_or(matching.default_limit)
        .min(matching.max_limit) as usize
}

fn registry_error_response(err: RegistryError) -> HttpResponse {
    match err {
        RegistryError::CustomerNotFound(_) | RegistryError::ManagerNotFound(_) => {
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message: err.to_string(),
                status_code: 404,
            })
        }
        RegistryError::Invalid(_) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: err.to_string(),
            status_code: 400,
        }),
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Register or update a customer profile
///
/// POST /api/v1/customers
async fn upsert_customer(
    state: web::Data<AppState>,
    req: web::Json<Customer>,
) -> impl Responder {
    match state.registry.upsert_customer(req.into_inner()) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(e) => {
            tracing::info!("Customer upsert rejected: {}", e);
            registry_error_response(e)
        }
    }
}

/// Fetch a customer profile
///
/// GET /api/v1/customers/{id}
async fn get_customer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.registry.get_customer(&path) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(e) => registry_error_response(e),
    }
}

/// Register or update a manager profile
///
/// POST /api/v1/managers
async fn upsert_manager(state: web::Data<AppState>, req: web::Json<Manager>) -> impl Responder {
    match state.registry.upsert_manager(req.into_inner()) {
        Ok(manager) => HttpResponse::Ok().json(manager),
        Err(e) => {
            tracing::info!("Manager upsert rejected: {}", e);
            registry_error_response(e)
        }
    }
}

/// Fetch a manager profile
///
/// GET /api/v1/managers/{id}
async fn get_manager(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.registry.get_manager(&path) {
        Ok(manager) => HttpResponse::Ok().json(manager),
        Err(e) => registry_error_response(e),
    }
}

/// Rank the manager roster for one customer
///
/// POST /api/v1/matches/rank
///
/// Request body:
/// ```json
/// {
///   "customerId": "string",
///   "limit": 20
/// }
/// ```
async fn rank_matches(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = effective_limit(req.limit, &state.matching);

    let customer = match state.registry.get_customer(&req.customer_id) {
        Ok(customer) => customer,
        Err(e) => return registry_error_response(e),
    };

    let managers = state.registry.managers_snapshot();
    let total_managers = managers.len();

    let mut results = state.allocator.rank(&customer, &managers);
    results.truncate(limit);

    tracing::info!(
        "Ranked {} of {} managers for customer {}",
        results.len(),
        total_managers,
        req.customer_id
    );

    HttpResponse::Ok().json(RankResponse {
        customer_id: req.customer_id.clone(),
        results,
        total_managers,
    })
}

/// Bulk auto-assignment of all unassigned customers
///
/// POST /api/v1/assignments/auto
///
/// Runs the allocator over a registry snapshot, then persists the returned
/// deltas. Customers that already have a manager are never touched.
async fn auto_assign(state: web::Data<AppState>) -> impl Responder {
    let customers = state.registry.customers_snapshot();
    let mut managers = state.registry.managers_snapshot();

    let assignments = state.allocator.auto_assign(&customers, &mut managers);

    let applied = match state.registry.apply_assignments(&assignments) {
        Ok(applied) => applied,
        Err(e) => {
            tracing::error!("Failed to apply auto-assignments: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to apply assignments".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    if applied < assignments.len() {
        tracing::warn!(
            "Auto-assign run dropped {} stale deltas for customers assigned mid-run",
            assignments.len() - applied
        );
    }

    tracing::info!("Auto-assign run assigned {} customers", applied);

    HttpResponse::Ok().json(AutoAssignResponse {
        run_id: uuid::Uuid::new_v4().to_string(),
        assigned_count: applied,
        assignments,
        timestamp: chrono::Utc::now(),
    })
}

/// Explicit single assignment of a customer to a chosen manager
///
/// POST /api/v1/assignments/manual
///
/// Unlike auto-assign this may re-point an already-assigned customer; the
/// registry moves the load counter from the previous manager.
async fn manual_assign(
    state: web::Data<AppState>,
    req: web::Json<ManualAssignRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let customer = match state.registry.get_customer(&req.customer_id) {
        Ok(customer) => customer,
        Err(e) => return registry_error_response(e),
    };
    let manager = match state.registry.get_manager(&req.manager_id) {
        Ok(manager) => manager,
        Err(e) => return registry_error_response(e),
    };

    let match_detail = state.allocator.assess(&customer, &manager);

    let assignment = Assignment {
        customer_id: customer.id.clone(),
        manager_id: manager.id.clone(),
        score: match_detail.score,
        auto_assigned: false,
    };

    if let Err(e) = state.registry.apply_assignments(std::slice::from_ref(&assignment)) {
        tracing::error!("Failed to apply manual assignment: {}", e);
        return registry_error_response(e);
    }

    tracing::info!(
        "Manually assigned customer {} to manager {} (score {})",
        assignment.customer_id,
        assignment.manager_id,
        assignment.score
    );

    HttpResponse::Ok().json(ManualAssignResponse {
        assignment_id: uuid::Uuid::new_v4().to_string(),
        customer_id: assignment.customer_id,
        manager_id: assignment.manager_id,
        match_detail,
    })
}

/// Dashboard aggregates
///
/// GET /api/v1/admin/stats
async fn admin_stats(state: web::Data<AppState>) -> impl Responder {
    let stats = state.registry.stats();

    HttpResponse::Ok().json(StatsResponse {
        total_customers: stats.total_customers,
        total_managers: stats.total_managers,
        unassigned_customers: stats.unassigned_customers,
        customer_classes: stats
            .class_counts
            .into_iter()
            .map(|(class, count)| ClassCount { class, count })
            .collect(),
        manager_loads: stats
            .manager_loads
            .into_iter()
            .map(|(manager_id, customer_count)| ManagerLoad {
                manager_id,
                customer_count,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_effective_limit_uses_configured_bounds() {
        let matching = MatchingSettings::default();

        assert_eq!(effective_limit(None, &matching), 20);
        assert_eq!(effective_limit(Some(7), &matching), 7);
        // Requests above max_limit are capped, not rejected
        assert_eq!(effective_limit(Some(500), &matching), 100);

        let tightened = MatchingSettings {
            default_limit: 5,
            max_limit: 10,
            ..MatchingSettings::default()
        };
        assert_eq!(effective_limit(None, &tightened), 5);
        assert_eq!(effective_limit(Some(50), &tightened), 10);
    }

    #[test]
    fn test_registry_error_maps_to_status() {
        let not_found = registry_error_response(RegistryError::CustomerNotFound("x".into()));
        assert_eq!(not_found.status(), actix_web::http::StatusCode::NOT_FOUND);

        let invalid = registry_error_response(RegistryError::Invalid(
            crate::core::ValidationError::EmptyId,
        ));
        assert_eq!(invalid.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
