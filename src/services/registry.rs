use crate::core::{validate_customer, validate_manager, ValidationError};
use crate::models::{Assignment, Customer, CustomerClass, Manager};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors from the in-memory registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("customer not found: {0}")]
    CustomerNotFound(String),

    #[error("manager not found: {0}")]
    ManagerNotFound(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Aggregated registry counters for the admin dashboard
#[derive(Debug, Clone)]
pub struct RegistryStats {
    pub total_customers: usize,
    pub total_managers: usize,
    pub unassigned_customers: usize,
    pub class_counts: Vec<(CustomerClass, usize)>,
    pub manager_loads: Vec<(String, u32)>,
}

/// In-memory customer/manager registry
///
/// The repository seam between the HTTP layer and the pure matching core:
/// profiles go in validated, the core receives snapshots, and assignment
/// deltas come back through `apply_assignments`. Durable persistence is an
/// external collaborator's concern; this registry is the authoritative
/// working copy for one process.
#[derive(Debug, Default)]
pub struct Registry {
    customers: RwLock<HashMap<String, Customer>>,
    managers: RwLock<HashMap<String, Manager>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a customer profile
    ///
    /// Profile edits never change assignment state: for an existing record
    /// the stored `assigned_manager_id` wins over whatever the payload
    /// carries.
    pub fn upsert_customer(&self, mut customer: Customer) -> Result<Customer, RegistryError> {
        validate_customer(&customer)?;

        let mut customers = self.customers.write().expect("registry lock poisoned");
        if let Some(existing) = customers.get(&customer.id) {
            customer.assigned_manager_id = existing.assigned_manager_id.clone();
        }
        customers.insert(customer.id.clone(), customer.clone());

        tracing::debug!(customer_id = %customer.id, "customer profile stored");
        Ok(customer)
    }

    /// Insert or update a manager profile
    ///
    /// `customer_count` is owned by assignment operations: for an existing
    /// record the stored count wins. A brand-new manager may seed a
    /// non-zero count (e.g. when mirroring an upstream book of business).
    pub fn upsert_manager(&self, mut manager: Manager) -> Result<Manager, RegistryError> {
        validate_manager(&manager)?;

        let mut managers = self.managers.write().expect("registry lock poisoned");
        if let Some(existing) = managers.get(&manager.id) {
            manager.customer_count = existing.customer_count;
        }
        managers.insert(manager.id.clone(), manager.clone());

        tracing::debug!(manager_id = %manager.id, "manager profile stored");
        Ok(manager)
    }

    pub fn get_customer(&self, id: &str) -> Result<Customer, RegistryError> {
        self.customers
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::CustomerNotFound(id.to_string()))
    }

    pub fn get_manager(&self, id: &str) -> Result<Manager, RegistryError> {
        self.managers
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::ManagerNotFound(id.to_string()))
    }

    /// Snapshot of all customers, ascending by id
    pub fn customers_snapshot(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> = self
            .customers
            .read()
            .expect("registry lock poisoned")
            .values()
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.id.cmp(&b.id));
        customers
    }

    /// Snapshot of all managers, ascending by id
    pub fn managers_snapshot(&self) -> Vec<Manager> {
        let mut managers: Vec<Manager> = self
            .managers
            .read()
            .expect("registry lock poisoned")
            .values()
            .cloned()
            .collect();
        managers.sort_by(|a, b| a.id.cmp(&b.id));
        managers
    }

    /// Apply assignment deltas produced by the allocator (or a manual
    /// decision); returns the number of deltas actually applied
    ///
    /// Sets the customer's manager reference and maintains manager
    /// counters, including the decrement of a previous manager when an
    /// explicit re-assignment moves a customer.
    ///
    /// Auto-assign deltas are computed from a snapshot. If the customer
    /// picked up a manager between snapshot and apply (e.g. a manual
    /// assignment on another worker), the stale delta is skipped here so
    /// that auto-assignment never re-points an assigned customer.
    pub fn apply_assignments(&self, assignments: &[Assignment]) -> Result<usize, RegistryError> {
        let mut customers = self.customers.write().expect("registry lock poisoned");
        let mut managers = self.managers.write().expect("registry lock poisoned");

        let mut applied = 0;

        for assignment in assignments {
            let customer = customers
                .get_mut(&assignment.customer_id)
                .ok_or_else(|| RegistryError::CustomerNotFound(assignment.customer_id.clone()))?;

            if !managers.contains_key(&assignment.manager_id) {
                return Err(RegistryError::ManagerNotFound(assignment.manager_id.clone()));
            }

            if assignment.auto_assigned && customer.is_assigned() {
                tracing::warn!(
                    customer_id = %assignment.customer_id,
                    "skipping stale auto-assignment for already-assigned customer"
                );
                continue;
            }

            if let Some(previous) = customer.assigned_manager_id.take() {
                if previous != assignment.manager_id {
                    if let Some(old_manager) = managers.get_mut(&previous) {
                        old_manager.customer_count = old_manager.customer_count.saturating_sub(1);
                    }
                } else {
                    // Re-pointing to the same manager is a no-op for the counter
                    customer.assigned_manager_id = Some(previous);
                    applied += 1;
                    continue;
                }
            }

            customer.assigned_manager_id = Some(assignment.manager_id.clone());
            let manager = managers
                .get_mut(&assignment.manager_id)
                .ok_or_else(|| RegistryError::ManagerNotFound(assignment.manager_id.clone()))?;
            manager.customer_count += 1;
            applied += 1;
        }

        Ok(applied)
    }

    /// Dashboard aggregates: totals, unassigned count, class distribution
    /// and per-manager loads (ascending by manager id)
    pub fn stats(&self) -> RegistryStats {
        let customers = self.customers.read().expect("registry lock poisoned");
        let managers = self.managers.read().expect("registry lock poisoned");

        let unassigned_customers = customers.values().filter(|c| !c.is_assigned()).count();

        let class_counts = CustomerClass::ALL
            .into_iter()
            .map(|class| {
                let count = customers
                    .values()
                    .filter(|c| c.customer_class == Some(class))
                    .count();
                (class, count)
            })
            .collect();

        let mut manager_loads: Vec<(String, u32)> = managers
            .values()
            .map(|m| (m.id.clone(), m.customer_count))
            .collect();
        manager_loads.sort_by(|a, b| a.0.cmp(&b.0));

        RegistryStats {
            total_customers: customers.len(),
            total_managers: managers.len(),
            unassigned_customers,
            class_counts,
            manager_loads,
        }
    }
}
