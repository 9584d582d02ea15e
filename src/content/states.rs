use serde::{Deserialize, Serialize};

use super::loan_amounts::{LoanAmount, RepaymentExample};
use super::{CatalogError, ensure_unique_slugs};

const STATES_JSON: &str = include_str!("../../data/states.json");

/// Short-term lending rules for one state. `None` means the state sets no
/// limit for that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInfo {
    pub slug: String,
    pub name: String,
    pub abbreviation: String,
    pub published: bool,
    pub payday_legal: bool,
    pub max_loan_amount: Option<f64>,
    pub max_apr: Option<f64>,
    pub max_fee_per_hundred: Option<f64>,
    pub min_term_days: Option<u32>,
    pub max_term_days: Option<u32>,
    pub cooling_off_period: Option<String>,
    pub rollover_allowed: Option<bool>,
    pub regulator_name: String,
    pub regulator_url: String,
    pub median_income: f64,
    pub cost_of_living_index: f64,
}

impl StateInfo {
    /// The APR ceiling a borrower in this state can see for `loan`.
    pub fn effective_max_apr(&self, loan: &LoanAmount) -> f64 {
        match self.max_apr {
            Some(cap) if cap < loan.max_apr => cap,
            _ => loan.max_apr,
        }
    }

    pub fn exceeds_state_max(&self, loan: &LoanAmount) -> bool {
        self.max_loan_amount
            .is_some_and(|max| f64::from(loan.amount) > max)
    }

    /// Low/mid/high quotes for `loan` with every APR held under the state cap.
    pub fn capped_examples(&self, loan: &LoanAmount) -> [RepaymentExample; 3] {
        let high = self.effective_max_apr(loan);
        let low = loan.min_apr.min(high);
        let mid = ((low + high) / 2.0).round();
        [
            RepaymentExample::new("Low", loan.amount, low, loan.min_term_months),
            RepaymentExample::new("Mid", loan.amount, mid, loan.mid_term_months()),
            RepaymentExample::new("High", loan.amount, high, loan.max_term_months),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct StateCatalog {
    states: Vec<StateInfo>,
}

impl StateCatalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(STATES_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let states: Vec<StateInfo> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                catalog: "states",
                source,
            })?;
        ensure_unique_slugs("states", states.iter().map(|s| s.slug.as_str()))?;
        Ok(Self { states })
    }

    pub fn all(&self) -> &[StateInfo] {
        &self.states
    }

    pub fn published(&self) -> impl Iterator<Item = &StateInfo> {
        self.states.iter().filter(|state| state.published)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&StateInfo> {
        self.states.iter().find(|state| state.slug == slug)
    }

    pub fn published_by_slug(&self, slug: &str) -> Option<&StateInfo> {
        self.by_slug(slug).filter(|state| state.published)
    }

    /// Case-insensitive postal code lookup (`TX`, `ca`).
    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&StateInfo> {
        self.states
            .iter()
            .find(|state| state.abbreviation.eq_ignore_ascii_case(abbreviation))
    }

    pub fn payday_legal(&self) -> impl Iterator<Item = &StateInfo> {
        self.states.iter().filter(|state| state.payday_legal)
    }

    pub fn all_slugs(&self) -> Vec<&str> {
        self.states.iter().map(|state| state.slug.as_str()).collect()
    }

    pub fn published_slugs(&self) -> Vec<&str> {
        self.published().map(|state| state.slug.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loan_amounts::LoanCatalog;

    fn states() -> StateCatalog {
        StateCatalog::bundled().expect("bundled states parse")
    }

    fn loans() -> LoanCatalog {
        LoanCatalog::bundled("FundingZest").expect("bundled loan amounts parse")
    }

    #[test]
    fn bundled_states_have_unique_slugs_and_regulators() {
        let states = states();
        assert!(!states.all().is_empty());
        for state in states.all() {
            assert_eq!(state.abbreviation.len(), 2, "{}", state.slug);
            assert!(state.regulator_url.starts_with("https://"), "{}", state.slug);
        }
    }

    #[test]
    fn filters_published_and_payday_legal() {
        let states = states();
        assert!(states.published().all(|s| s.published));
        assert!(states.payday_legal().all(|s| s.payday_legal));
        assert!(states.payday_legal().any(|s| s.slug == "texas"));
        assert!(!states.payday_legal().any(|s| s.slug == "new-york"));
        assert!(states.published_slugs().contains(&"california"));
        assert!(!states.published_slugs().contains(&"district-of-columbia"));
        assert_eq!(states.all_slugs().len(), states.all().len());
    }

    #[test]
    fn lookup_by_slug() {
        let states = states();
        let california = states.by_slug("california").expect("known state");
        assert_eq!(california.abbreviation, "CA");
        assert_eq!(california.max_loan_amount, Some(300.0));
        assert!(states.by_slug("atlantis").is_none());
        assert!(states.published_by_slug("colorado").is_none());
        assert!(states.by_slug("colorado").is_some());
        assert_eq!(
            states.by_abbreviation("tx").map(|s| s.slug.as_str()),
            Some("texas")
        );
        assert!(states.by_abbreviation("ZZ").is_none());
    }

    #[test]
    fn state_cap_lowers_effective_apr() {
        let states = states();
        let loans = loans();
        let loan = loans.by_slug("500-dollar-loan").expect("known loan");

        let california = states.by_slug("california").expect("known state");
        assert_eq!(california.effective_max_apr(loan), 460.0);

        let texas = states.by_slug("texas").expect("known state");
        assert_eq!(texas.effective_max_apr(loan), loan.max_apr);

        let large = loans.by_slug("10000-dollar-loan").expect("known loan");
        let alabama = states.by_slug("alabama").expect("known state");
        assert_eq!(alabama.effective_max_apr(large), large.max_apr);
    }

    #[test]
    fn detects_amounts_above_state_limit() {
        let states = states();
        let loans = loans();
        let california = states.by_slug("california").expect("known state");
        let texas = states.by_slug("texas").expect("known state");

        let small = loans.by_slug("300-dollar-loan").expect("known loan");
        let large = loans.by_slug("500-dollar-loan").expect("known loan");
        assert!(!california.exceeds_state_max(small));
        assert!(california.exceeds_state_max(large));
        assert!(!texas.exceeds_state_max(large));
    }

    #[test]
    fn capped_examples_stay_under_state_cap() {
        let states = states();
        let loans = loans();
        let loan = loans.by_slug("500-dollar-loan").expect("known loan");

        let illinois = states.by_slug("illinois").expect("known state");
        let examples = illinois.capped_examples(loan);
        assert!(examples.iter().all(|example| example.apr <= 36.0));
        assert_eq!(examples[0].term_months, loan.min_term_months);

        let texas = states.by_slug("texas").expect("known state");
        let [low, _, high] = texas.capped_examples(loan);
        assert_eq!(low.apr, loan.min_apr);
        assert_eq!(high.apr, loan.max_apr);
        assert!(high.result.is_ok());
    }
}
