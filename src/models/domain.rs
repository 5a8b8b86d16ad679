use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for tag values outside the closed vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} tag: {value}")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

/// Financial-service category a customer can require.
///
/// The same vocabulary doubles as a manager's capability tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Need {
    Savings,
    WealthManagement,
    Investment,
    Retirement,
    Loan,
    Insurance,
    Stock,
    BusinessAssociation,
}

impl Need {
    pub const ALL: [Need; 8] = [
        Need::Savings,
        Need::WealthManagement,
        Need::Investment,
        Need::Retirement,
        Need::Loan,
        Need::Insurance,
        Need::Stock,
        Need::BusinessAssociation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Need::Savings => "savings",
            Need::WealthManagement => "wealthManagement",
            Need::Investment => "investment",
            Need::Retirement => "retirement",
            Need::Loan => "loan",
            Need::Insurance => "insurance",
            Need::Stock => "stock",
            Need::BusinessAssociation => "businessAssociation",
        }
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Need {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Need::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| ParseTagError {
                kind: "need",
                value: s.to_string(),
            })
    }
}

/// Personal-interest tag used as a secondary affinity signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Hobby {
    Billiards,
    Fitness,
    Travel,
    Gaming,
    Charity,
    Food,
    Art,
    Reading,
}

impl Hobby {
    pub const ALL: [Hobby; 8] = [
        Hobby::Billiards,
        Hobby::Fitness,
        Hobby::Travel,
        Hobby::Gaming,
        Hobby::Charity,
        Hobby::Food,
        Hobby::Art,
        Hobby::Reading,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hobby::Billiards => "billiards",
            Hobby::Fitness => "fitness",
            Hobby::Travel => "travel",
            Hobby::Gaming => "gaming",
            Hobby::Charity => "charity",
            Hobby::Food => "food",
            Hobby::Art => "art",
            Hobby::Reading => "reading",
        }
    }
}

impl fmt::Display for Hobby {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hobby {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hobby::ALL
            .into_iter()
            .find(|h| h.as_str() == s)
            .ok_or_else(|| ParseTagError {
                kind: "hobby",
                value: s.to_string(),
            })
    }
}

/// Customer tier label (A is best). Assigned externally, never computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerClass {
    A,
    B,
    C,
    D,
    E,
}

impl CustomerClass {
    pub const ALL: [CustomerClass; 5] = [
        CustomerClass::A,
        CustomerClass::B,
        CustomerClass::C,
        CustomerClass::D,
        CustomerClass::E,
    ];
}

impl fmt::Display for CustomerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerClass::A => "A",
            CustomerClass::B => "B",
            CustomerClass::C => "C",
            CustomerClass::D => "D",
            CustomerClass::E => "E",
        };
        f.write_str(s)
    }
}

/// Customer profile with need and hobby tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub needs: BTreeSet<Need>,
    #[serde(default)]
    pub hobbies: BTreeSet<Hobby>,
    #[serde(rename = "customerClass", default, skip_serializing_if = "Option::is_none")]
    pub customer_class: Option<CustomerClass>,
    #[serde(rename = "assignedManagerId", default)]
    pub assigned_manager_id: Option<String>,
}

impl Customer {
    pub fn is_assigned(&self) -> bool {
        self.assigned_manager_id.is_some()
    }
}

/// Manager profile with capability and hobby tags
///
/// `customer_count` is mutated only by assignment operations, never by
/// profile edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    #[serde(default)]
    pub capabilities: BTreeSet<Need>,
    #[serde(default)]
    pub hobbies: BTreeSet<Hobby>,
    #[serde(rename = "customerCount", default)]
    pub customer_count: u32,
}

/// Compatibility score for one (customer, manager) pair
///
/// Ephemeral by design: recomputed on demand, never cached, because the
/// load component changes after every assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub manager_id: String,
    /// Integer score in [0, 100]
    pub score: u8,
    pub needs_matched: Vec<Need>,
    pub hobbies_matched: Vec<Hobby>,
    pub needs_score: f64,
    pub hobbies_score: f64,
    pub load_score: f64,
}

/// Assignment decision returned by the allocator for the caller to persist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub customer_id: String,
    pub manager_id: String,
    pub score: u8,
    pub auto_assigned: bool,
}

/// Scoring weights; the three components sum to the maximum total score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub needs: f64,
    pub hobbies: f64,
    pub load: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            needs: 60.0,
            hobbies: 30.0,
            load: 10.0,
        }
    }
}

/// Tie-break policy for bulk auto-assignment
///
/// `BestFit` prefers managers with any needs overlap, then lowest load,
/// then highest score, then manager id. `LowestLoad` ignores overlap and
/// picks the least-loaded manager outright, matching the legacy mock
/// behavior of the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssignmentPolicy {
    #[default]
    BestFit,
    LowestLoad,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_need_round_trip() {
        for need in Need::ALL {
            let parsed: Need = need.as_str().parse().unwrap();
            assert_eq!(parsed, need);
        }
    }

    #[test]
    fn test_unknown_need_rejected() {
        let err = "cryptocurrency".parse::<Need>().unwrap_err();
        assert_eq!(err.value, "cryptocurrency");
    }

    #[test]
    fn test_hobby_serde_names() {
        let json = serde_json::to_string(&Hobby::Billiards).unwrap();
        assert_eq!(json, r#""billiards""#);

        let hobby: Hobby = serde_json::from_str(r#""travel""#).unwrap();
        assert_eq!(hobby, Hobby::Travel);
    }

    #[test]
    fn test_out_of_vocabulary_tag_fails_deserialization() {
        let result: Result<Need, _> = serde_json::from_str(r#""gambling""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_customer_needs_deduplicated() {
        let customer: Customer = serde_json::from_str(
            r#"{"id": "c1", "needs": ["savings", "savings", "loan"], "hobbies": ["art"]}"#,
        )
        .unwrap();

        assert_eq!(customer.needs.len(), 2);
        assert!(!customer.is_assigned());
    }
}
