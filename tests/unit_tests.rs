// Unit tests for CRM Match

use crm_match::core::{
    calculate_match_score, validate_customer, validate_manager, Allocator, ValidationError,
};
use crm_match::models::{Customer, Hobby, Manager, Need, ScoringWeights};

fn create_customer(id: &str, needs: &[Need], hobbies: &[Hobby]) -> Customer {
    Customer {
        id: id.to_string(),
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
fn test_score_reference_values() {
    let customer = create_customer(
        "c1",
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

    assert_eq!(calculate_match_score(&customer, &manager_a, &weights, 50).score, 53);
    assert_eq!(calculate_match_score(&customer, &manager_b, &weights, 50).score, 92);
}

#[test]
fn test_score_always_in_range() {
    let weights = ScoringWeights::default();

    // Sweep a grid of overlap and load combinations
    for needs in [
        vec![Need::Savings],
        vec![Need::Savings, Need::Loan, Need::Stock],
        Need::ALL.to_vec(),
    ] {
        for count in [0, 1, 25, 49, 50, 200] {
            let customer = create_customer("c", &needs, &[Hobby::Reading, Hobby::Art]);
            let manager = create_manager("m", &needs, &[Hobby::Reading], count);

            let result = calculate_match_score(&customer, &manager, &weights, 50);
            assert!(result.score <= 100, "score {} out of range", result.score);
        }
    }
}

#[test]
fn test_score_is_set_order_invariant() {
    // BTreeSet semantics: construction order and duplicates cannot matter
    let forward = create_customer(
        "c1",
        &[Need::Savings, Need::Investment, Need::Loan],
        &[Hobby::Travel, Hobby::Art],
    );
    let reversed = create_customer(
        "c1",
        &[Need::Loan, Need::Investment, Need::Savings, Need::Savings],
        &[Hobby::Art, Hobby::Travel, Hobby::Art],
    );
    let manager = create_manager(
        "m",
        &[Need::Investment, Need::Loan],
        &[Hobby::Art],
        20,
    );

    let weights = ScoringWeights::default();
    let a = calculate_match_score(&forward, &manager, &weights, 50);
    let b = calculate_match_score(&reversed, &manager, &weights, 50);

    assert_eq!(a.score, b.score);
    assert_eq!(a.needs_matched, b.needs_matched);
    assert_eq!(a.hobbies_matched, b.hobbies_matched);
}

#[test]
fn test_score_deterministic() {
    let customer = create_customer("c1", &[Need::Retirement], &[Hobby::Charity]);
    let manager = create_manager("m", &[Need::Retirement], &[Hobby::Charity], 7);
    let weights = ScoringWeights::default();

    let first = calculate_match_score(&customer, &manager, &weights, 50);
    let second = calculate_match_score(&customer, &manager, &weights, 50);

    assert_eq!(first.score, second.score);
    assert_eq!(first.load_score, second.load_score);
}

#[test]
fn test_load_component_zero_at_cap() {
    let customer = create_customer("c1", &[Need::Savings], &[Hobby::Reading]);
    let weights = ScoringWeights::default();

    for count in [50, 51, 1000] {
        let manager = create_manager("m", &[Need::Savings], &[Hobby::Reading], count);
        let result = calculate_match_score(&customer, &manager, &weights, 50);
        assert_eq!(result.load_score, 0.0, "count {} should zero the load score", count);
    }
}

#[test]
fn test_rank_order_and_tie_break() {
    let allocator = Allocator::with_defaults();
    let customer = create_customer("c1", &[Need::Savings], &[Hobby::Reading]);

    let managers = vec![
        create_manager("m3", &[Need::Savings], &[Hobby::Reading], 10),
        create_manager("m1", &[Need::Savings], &[Hobby::Reading], 10),
        create_manager("m2", &[Need::Loan], &[Hobby::Gaming], 10),
    ];

    let results = allocator.rank(&customer, &managers);

    // m1 and m3 tie on score; id ascending breaks the tie
    assert_eq!(results[0].manager_id, "m1");
    assert_eq!(results[1].manager_id, "m3");
    assert_eq!(results[2].manager_id, "m2");

    for window in results.windows(2) {
        assert!(window[0].score >= window[1].score, "results not sorted");
    }
}

#[test]
fn test_validation_empty_sets() {
    let no_needs = create_customer("c1", &[], &[Hobby::Reading]);
    let no_hobbies = create_customer("c2", &[Need::Savings], &[]);

    assert_eq!(
        validate_customer(&no_needs),
        Err(ValidationError::EmptyNeeds("c1".to_string()))
    );
    assert_eq!(
        validate_customer(&no_hobbies),
        Err(ValidationError::EmptyHobbies("c2".to_string()))
    );

    let no_capabilities = create_manager("m1", &[], &[Hobby::Reading], 0);
    assert_eq!(
        validate_manager(&no_capabilities),
        Err(ValidationError::EmptyCapabilities("m1".to_string()))
    );
}

#[test]
fn test_vocabulary_is_closed() {
    assert_eq!(Need::ALL.len(), 8);
    assert_eq!(Hobby::ALL.len(), 8);
    assert!("mortgage".parse::<Need>().is_err());
    assert!("cooking".parse::<Hobby>().is_err());
}
