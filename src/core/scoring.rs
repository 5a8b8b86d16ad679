use crate::models::{Customer, Manager, MatchResult, ScoringWeights};

/// Calculate a match score (0-100) for one customer against one manager
///
/// Scoring formula:
/// score = round(
///     needs_ratio   * 60 +    # |needs ∩ capabilities| / |needs|
///     hobbies_ratio * 30 +    # |hobbies ∩ manager hobbies| / |hobbies|
///     load_factor   * 10      # (1 - customer_count / load_cap), clamped
/// )
///
/// Pure and deterministic for a given (customer, manager) snapshot. Empty
/// customer sets contribute a 0 component rather than erroring; callers are
/// expected to validate profiles at the boundary first.
pub fn calculate_match_score(
    customer: &Customer,
    manager: &Manager,
    weights: &ScoringWeights,
    load_cap: u32,
) -> MatchResult {
    let needs_matched: Vec<_> = customer
        .needs
        .intersection(&manager.capabilities)
        .copied()
        .collect();
    let hobbies_matched: Vec<_> = customer
        .hobbies
        .intersection(&manager.hobbies)
        .copied()
        .collect();

    let needs_score = ratio(needs_matched.len(), customer.needs.len()) * weights.needs;
    let hobbies_score = ratio(hobbies_matched.len(), customer.hobbies.len()) * weights.hobbies;
    let load_score = calculate_load_score(manager.customer_count, load_cap, weights.load);

    // Clamp and round rather than trusting float summation to stay in range
    let total = (needs_score + hobbies_score + load_score)
        .round()
        .clamp(0.0, 100.0) as u8;

    MatchResult {
        manager_id: manager.id.clone(),
        score: total,
        needs_matched,
        hobbies_matched,
        needs_score,
        hobbies_score,
        load_score,
    }
}

/// Matched-to-total ratio with the empty-set policy: no tags, no credit
#[inline]
fn ratio(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64
}

/// Load score: linearly rewards spare capacity, zero at or above the cap
#[inline]
fn calculate_load_score(customer_count: u32, load_cap: u32, weight: f64) -> f64 {
    if load_cap == 0 {
        return 0.0;
    }
    let spare = 1.0 - customer_count as f64 / load_cap as f64;
    (spare * weight).clamp(0.0, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hobby, Need};

    fn create_customer(needs: &[Need], hobbies: &[Hobby]) -> Customer {
        Customer {
            id: "c1".to_string(),
            needs: needs.iter().copied().collect(),
            hobbies: hobbies.iter().copied().collect(),
            customer_class: None,
            assigned_manager_id: None,
        }
    }

    fn create_manager(id: &str, capabilities: &[Need], hobbies: &[Hobby], count: u32) -> Manager {
        Manager {
            id: id.to_string(),
            capabilities: capabilities.iter().copied().collect(),
            hobbies: hobbies.iter().copied().collect(),
            customer_count: count,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let customer = create_customer(
            &[Need::Investment, Need::WealthManagement],
            &[Hobby::Travel, Hobby::Art],
        );

        let manager_a = create_manager(
            "a",
            &[Need::Investment, Need::Stock],
            &[Hobby::Travel, Hobby::Food],
            10,
        );
        let manager_b = create_manager(
            "b",
            &[Need::Investment, Need::WealthManagement],
            &[Hobby::Art, Hobby::Travel],
            40,
        );

        let weights = ScoringWeights::default();

        let result_a = calculate_match_score(&customer, &manager_a, &weights, 50);
        assert_eq!(result_a.score, 53);
        assert_eq!(result_a.needs_score, 30.0);
        assert_eq!(result_a.hobbies_score, 15.0);
        assert!((result_a.load_score - 8.0).abs() < 1e-9);

        let result_b = calculate_match_score(&customer, &manager_b, &weights, 50);
        assert_eq!(result_b.score, 92);
        assert_eq!(result_b.needs_score, 60.0);
        assert_eq!(result_b.hobbies_score, 30.0);
        assert!((result_b.load_score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_in_valid_range() {
        let customer = create_customer(&[Need::Savings], &[Hobby::Reading]);
        let manager = create_manager("m", &[Need::Savings], &[Hobby::Reading], 0);

        let result = calculate_match_score(&customer, &manager, &ScoringWeights::default(), 50);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_empty_needs_contribute_zero() {
        let customer = create_customer(&[], &[Hobby::Reading]);
        let manager = create_manager("m", &[Need::Savings], &[Hobby::Reading], 50);

        let result = calculate_match_score(&customer, &manager, &ScoringWeights::default(), 50);
        assert_eq!(result.needs_score, 0.0);
        assert_eq!(result.score, 30);
    }

    #[test]
    fn test_manager_at_load_cap_gets_zero_load_score() {
        let customer = create_customer(&[Need::Loan], &[Hobby::Food]);
        let at_cap = create_manager("m", &[], &[], 50);
        let over_cap = create_manager("m", &[], &[], 80);

        let weights = ScoringWeights::default();
        assert_eq!(calculate_match_score(&customer, &at_cap, &weights, 50).load_score, 0.0);
        // Over the cap clamps to zero, never negative
        assert_eq!(calculate_match_score(&customer, &over_cap, &weights, 50).load_score, 0.0);
    }

    #[test]
    fn test_no_overlap_scores_load_only() {
        let customer = create_customer(&[Need::Loan], &[Hobby::Gaming]);
        let manager = create_manager("m", &[Need::Stock], &[Hobby::Art], 25);

        let result = calculate_match_score(&customer, &manager, &ScoringWeights::default(), 50);
        assert!(result.needs_matched.is_empty());
        assert!(result.hobbies_matched.is_empty());
        assert_eq!(result.score, 5);
    }

    #[test]
    fn test_zero_load_cap_guard() {
        let customer = create_customer(&[Need::Loan], &[Hobby::Gaming]);
        let manager = create_manager("m", &[], &[], 0);

        let result = calculate_match_score(&customer, &manager, &ScoringWeights::default(), 0);
        assert_eq!(result.load_score, 0.0);
    }
}
