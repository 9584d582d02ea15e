use serde::{Deserialize, Serialize};

use super::{CatalogError, ensure_unique_slugs};
use crate::core::{InvalidInputError, RepaymentResult, calculate_repayment};

const LOAN_AMOUNTS_JSON: &str = include_str!("../../data/loan-amounts.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoanAmountRecord {
    slug: String,
    amount: u32,
    display_amount: String,
    published: bool,
}

/// A dollar-amount landing page and the APR/term bands lenders quote for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanAmount {
    pub slug: String,
    pub amount: u32,
    pub display_amount: String,
    pub published: bool,
    pub min_apr: f64,
    pub max_apr: f64,
    pub min_term_months: u32,
    pub max_term_months: u32,
    pub description: String,
}

impl LoanAmount {
    fn from_record(record: LoanAmountRecord, site_name: &str) -> Self {
        let amount = record.amount;
        let (min_apr, max_apr) = match amount {
            0..=1_000 => (200.0, 664.0),
            1_001..=5_000 => (36.0, 199.0),
            _ => (6.0, 36.0),
        };
        let min_term_months = match amount {
            0..=500 => 1,
            501..=2_000 => 3,
            _ => 6,
        };
        let max_term_months = match amount {
            0..=500 => 6,
            501..=5_000 => 24,
            _ => 60,
        };
        let description = format!(
            "Compare {} loan options from {site_name}'s lender network. Bad credit considered. Apply in minutes.",
            record.display_amount
        );

        Self {
            slug: record.slug,
            amount,
            display_amount: record.display_amount,
            published: record.published,
            min_apr,
            max_apr,
            min_term_months,
            max_term_months,
            description,
        }
    }

    /// Midpoint APR, halves rounded up.
    pub fn mid_apr(&self) -> f64 {
        ((self.min_apr + self.max_apr) / 2.0).round()
    }

    pub fn mid_term_months(&self) -> u32 {
        (self.min_term_months + self.max_term_months).div_ceil(2)
    }

    /// Cheapest, middle and most expensive quotes for this amount.
    pub fn representative_examples(&self) -> [RepaymentExample; 3] {
        [
            RepaymentExample::new("Low", self.amount, self.min_apr, self.min_term_months),
            RepaymentExample::new("Mid", self.amount, self.mid_apr(), self.mid_term_months()),
            RepaymentExample::new("High", self.amount, self.max_apr, self.max_term_months),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentExample {
    pub label: &'static str,
    pub principal: u32,
    pub apr: f64,
    pub term_months: u32,
    pub result: Result<RepaymentResult, InvalidInputError>,
}

impl RepaymentExample {
    pub fn new(label: &'static str, principal: u32, apr: f64, term_months: u32) -> Self {
        Self {
            label,
            principal,
            apr,
            term_months,
            result: calculate_repayment(f64::from(principal), apr, term_months),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoanCatalog {
    amounts: Vec<LoanAmount>,
}

impl LoanCatalog {
    pub fn bundled(site_name: &str) -> Result<Self, CatalogError> {
        Self::from_json(LOAN_AMOUNTS_JSON, site_name)
    }

    pub fn from_json(json: &str, site_name: &str) -> Result<Self, CatalogError> {
        let records: Vec<LoanAmountRecord> =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                catalog: "loan amounts",
                source,
            })?;
        let amounts: Vec<LoanAmount> = records
            .into_iter()
            .map(|record| LoanAmount::from_record(record, site_name))
            .collect();
        ensure_unique_slugs("loan amounts", amounts.iter().map(|a| a.slug.as_str()))?;
        Ok(Self { amounts })
    }

    /// Every amount regardless of published status.
    pub fn all(&self) -> &[LoanAmount] {
        &self.amounts
    }

    /// Amounts that get pages, sitemap entries and navigation links.
    pub fn published(&self) -> impl Iterator<Item = &LoanAmount> {
        self.amounts.iter().filter(|amount| amount.published)
    }

    pub fn by_slug(&self, slug: &str) -> Option<&LoanAmount> {
        self.amounts.iter().find(|amount| amount.slug == slug)
    }

    pub fn published_by_slug(&self, slug: &str) -> Option<&LoanAmount> {
        self.by_slug(slug).filter(|amount| amount.published)
    }

    pub fn by_amount(&self, dollars: u32) -> Option<&LoanAmount> {
        self.amounts.iter().find(|amount| amount.amount == dollars)
    }

    pub fn published_slugs(&self) -> Vec<&str> {
        self.published().map(|amount| amount.slug.as_str()).collect()
    }

    pub fn all_slugs(&self) -> Vec<&str> {
        self.amounts.iter().map(|amount| amount.slug.as_str()).collect()
    }
}
