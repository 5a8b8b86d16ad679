use crate::core::scoring::calculate_match_score;
use crate::models::{
    Assignment, AssignmentPolicy, Customer, Manager, MatchResult, ScoringWeights,
};

/// Assignment allocator - ranks manager rosters and performs bulk
/// auto-assignment of unassigned customers
///
/// # Operations
/// 1. `rank`: score one customer against the full roster, best first
/// 2. `auto_assign`: load-balanced batch assignment with a sequential
///    dependency between customers (each assignment raises the chosen
///    manager's load before the next customer is considered)
///
/// The allocator never mutates the registry; it works on snapshots and
/// returns assignment deltas for the caller to persist.
#[derive(Debug, Clone)]
pub struct Allocator {
    weights: ScoringWeights,
    load_cap: u32,
    policy: AssignmentPolicy,
}

impl Allocator {
    pub fn new(weights: ScoringWeights, load_cap: u32, policy: AssignmentPolicy) -> Self {
        Self {
            weights,
            load_cap,
            policy,
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            load_cap: 50,
            policy: AssignmentPolicy::default(),
        }
    }

    /// Score a single pair; used by manual assignment
    pub fn assess(&self, customer: &Customer, manager: &Manager) -> MatchResult {
        calculate_match_score(customer, manager, &self.weights, self.load_cap)
    }

    /// Rank the roster for one customer, descending by score
    ///
    /// Ties break by manager id ascending so the ordering is reproducible.
    /// An empty roster yields an empty list, not an error.
    pub fn rank(&self, customer: &Customer, managers: &[Manager]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = managers
            .iter()
            .map(|manager| calculate_match_score(customer, manager, &self.weights, self.load_cap))
            .collect();

        results.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.manager_id.cmp(&b.manager_id))
        });

        results
    }

    /// Bulk auto-assignment of all unassigned customers
    ///
    /// Customers with an assigned manager are left untouched. Unassigned
    /// customers are processed in ascending id order. Each decision
    /// increments the chosen manager's count in the working snapshot before
    /// the next customer is considered, so the batch load-balances against
    /// its own earlier assignments. Single-threaded by construction; the
    /// read-modify-write on `customer_count` must stay serialized.
    ///
    /// Returns the new assignments; an empty batch returns an empty list.
    pub fn auto_assign(
        &self,
        customers: &[Customer],
        managers: &mut [Manager],
    ) -> Vec<Assignment> {
        let mut pending: Vec<&Customer> =
            customers.iter().filter(|c| !c.is_assigned()).collect();
        pending.sort_by(|a, b| a.id.cmp(&b.id));

        let mut assignments = Vec::with_capacity(pending.len());

        for customer in pending {
            let Some(index) = self.select_manager(customer, managers) else {
                continue;
            };

            let result = calculate_match_score(
                customer,
                &managers[index],
                &self.weights,
                self.load_cap,
            );

            managers[index].customer_count += 1;

            tracing::debug!(
                customer_id = %customer.id,
                manager_id = %managers[index].id,
                score = result.score,
                "auto-assigned customer"
            );

            assignments.push(Assignment {
                customer_id: customer.id.clone(),
                manager_id: managers[index].id.clone(),
                score: result.score,
                auto_assigned: true,
            });
        }

        assignments
    }

    /// Pick the manager for one customer under the configured policy
    ///
    /// `BestFit`: managers with any needs overlap first, lowest load among
    /// them, ties by highest score then manager id. Falls back to the full
    /// roster when nobody overlaps. `LowestLoad`: least-loaded manager over
    /// the full roster, ties by id.
    fn select_manager(&self, customer: &Customer, managers: &[Manager]) -> Option<usize> {
        if managers.is_empty() {
            return None;
        }

        let candidates: Vec<usize> = match self.policy {
            AssignmentPolicy::BestFit => {
                let overlapping: Vec<usize> = (0..managers.len())
                    .filter(|&i| {
                        customer
                            .needs
                            .intersection(&managers[i].capabilities)
                            .next()
                            .is_some()
                    })
                    .collect();

                if overlapping.is_empty() {
                    // No needs overlap anywhere: fall back to pure load balancing
                    (0..managers.len()).collect()
                } else {
                    overlapping
                }
            }
            AssignmentPolicy::LowestLoad => (0..managers.len()).collect(),
        };

        match self.policy {
            AssignmentPolicy::BestFit => {
                let mut scored: Vec<(usize, u8)> = candidates
                    .into_iter()
                    .map(|i| (i, self.assess(customer, &managers[i]).score))
                    .collect();

                scored.sort_by(|&(a, score_a), &(b, score_b)| {
                    managers[a]
                        .customer_count
                        .cmp(&managers[b].customer_count)
                        .then_with(|| score_b.cmp(&score_a))
                        .then_with(|| managers[a].id.cmp(&managers[b].id))
                });

                scored.first().map(|&(i, _)| i)
            }
            AssignmentPolicy::LowestLoad => candidates.into_iter().min_by(|&a, &b| {
                managers[a]
                    .customer_count
                    .cmp(&managers[b].customer_count)
                    .then_with(|| managers[a].id.cmp(&managers[b].id))
            }),
        }
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
