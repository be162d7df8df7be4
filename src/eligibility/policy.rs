//! Eligibility policy deciding whether a revenue edge may be recognised

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::*;

/// Process-wide set of blocked revenue GLs and closed reporting periods
///
/// Immutable once built. To change the rules, build a new policy and swap it
/// in whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityPolicy {
    blocked_gls: BTreeSet<String>,
    closed_periods: BTreeSet<Period>,
}

impl EligibilityPolicy {
    /// Create a policy from the blocked GL set and the closed period set
    pub fn new<B, P>(blocked_gls: B, closed_periods: P) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        P: IntoIterator<Item = Period>,
    {
        Self {
            blocked_gls: blocked_gls.into_iter().map(Into::into).collect(),
            closed_periods: closed_periods.into_iter().collect(),
        }
    }

    /// A policy with nothing blocked and every period open
    pub fn open() -> Self {
        Self::default()
    }

    /// Check whether a GL account is administratively blocked
    pub fn is_blocked(&self, account: &str) -> bool {
        self.blocked_gls.contains(account)
    }

    /// Check whether a period is closed for posting
    pub fn is_period_closed(&self, period: &Period) -> bool {
        self.closed_periods.contains(period)
    }

    /// Revenue may be recognised only on an existing, unblocked account in an open period
    pub fn is_revenue_eligible(&self, account: Option<&str>, period: &Period) -> bool {
        match account {
            Some(account) => !self.is_blocked(account) && !self.is_period_closed(period),
            None => false,
        }
    }

    pub fn blocked_gls(&self) -> impl Iterator<Item = &str> {
        self.blocked_gls.iter().map(String::as_str)
    }

    pub fn closed_periods(&self) -> impl Iterator<Item = &Period> {
        self.closed_periods.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(token: &str) -> Period {
        Period::parse(token).unwrap()
    }

    fn policy() -> EligibilityPolicy {
        EligibilityPolicy::new(["400099"], [period("2025-04")])
    }

    #[test]
    fn test_open_account_in_open_period_is_eligible() {
        assert!(policy().is_revenue_eligible(Some("400010"), &period("2025-03")));
    }

    #[test]
    fn test_closed_period_suppresses_regardless_of_blocking() {
        let policy = policy();
        assert!(policy.is_period_closed(&period("2025-04")));
        assert!(!policy.is_revenue_eligible(Some("400010"), &period("2025-04")));
        assert!(!policy.is_revenue_eligible(Some("400099"), &period("2025-04")));
    }

    #[test]
    fn test_blocked_gl_suppresses_regardless_of_period() {
        let policy = policy();
        assert!(policy.is_blocked("400099"));
        assert!(!policy.is_revenue_eligible(Some("400099"), &period("2025-03")));
    }

    #[test]
    fn test_missing_account_is_never_eligible() {
        assert!(!EligibilityPolicy::open().is_revenue_eligible(None, &period("2025-03")));
    }

    #[test]
    fn test_policy_sets_are_sorted_and_deduplicated() {
        let policy = EligibilityPolicy::new(
            ["400099", "400010", "400099"],
            [period("2025-04"), period("2024-12"), period("2025-04")],
        );
        assert_eq!(policy.blocked_gls().collect::<Vec<_>>(), vec!["400010", "400099"]);
        assert_eq!(
            policy.closed_periods().map(Period::as_str).collect::<Vec<_>>(),
            vec!["2024-12", "2025-04"]
        );
    }
}
