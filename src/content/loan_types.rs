use serde::Serialize;

use super::loan_amounts::RepaymentExample;

/// A loan-category pillar page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTypeInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub min_amount: u32,
    pub max_amount: u32,
    pub min_apr: f64,
    pub max_apr: f64,
    pub min_term_months: u32,
    pub max_term_months: u32,
    pub term_label: &'static str,
    pub example_amount: u32,
}

impl LoanTypeInfo {
    /// Mid-band quote on the type's typical amount.
    pub fn example(&self) -> RepaymentExample {
        RepaymentExample::new(
            "Typical",
            self.example_amount,
            ((self.min_apr + self.max_apr) / 2.0).round(),
            (self.min_term_months + self.max_term_months).div_ceil(2),
        )
    }
}

pub static LOAN_TYPES: [LoanTypeInfo; 6] = [
    LoanTypeInfo {
        slug: "payday",
        name: "Payday Loans",
        description: "Short-term loans typically due on your next payday. Amounts usually range from $100 to $1,000 with fast approval.",
        min_amount: 100,
        max_amount: 1_000,
        min_apr: 200.0,
        max_apr: 664.0,
        min_term_months: 1,
        max_term_months: 1,
        term_label: "2 - 4 weeks",
        example_amount: 500,
    },
    LoanTypeInfo {
        slug: "bad-credit",
        name: "Bad Credit Loans",
        description: "Loan options designed for borrowers with poor or limited credit history. Lenders focus on income and ability to repay.",
        min_amount: 100,
        max_amount: 5_000,
        min_apr: 36.0,
        max_apr: 664.0,
        min_term_months: 3,
        max_term_months: 24,
        term_label: "3 - 24 months",
        example_amount: 1_000,
    },
    LoanTypeInfo {
        slug: "same-day",
        name: "Same Day Loans",
        description: "Loans with expedited processing that can deliver funds to your bank account as soon as the same business day you apply.",
        min_amount: 100,
        max_amount: 5_000,
        min_apr: 36.0,
        max_apr: 664.0,
        min_term_months: 1,
        max_term_months: 24,
        term_label: "2 weeks - 24 months",
        example_amount: 500,
    },
    LoanTypeInfo {
        slug: "emergency",
        name: "Emergency Loans",
        description: "Quick-access loans for unexpected expenses like medical bills, car repairs, or urgent home repairs.",
        min_amount: 100,
        max_amount: 5_000,
        min_apr: 36.0,
        max_apr: 664.0,
        min_term_months: 1,
        max_term_months: 24,
        term_label: "1 - 24 months",
        example_amount: 1_000,
    },
    LoanTypeInfo {
        slug: "no-credit-check",
        name: "No Credit Check Loans",
        description: "Some lenders offer loans without performing a traditional hard credit inquiry, using alternative data to assess eligibility.",
        min_amount: 100,
        max_amount: 1_000,
        min_apr: 200.0,
        max_apr: 664.0,
        min_term_months: 1,
        max_term_months: 6,
        term_label: "2 weeks - 6 months",
        example_amount: 500,
    },
    LoanTypeInfo {
        slug: "installment",
        name: "Installment Loans",
        description: "Loans repaid over a set number of scheduled payments. Offers more manageable repayment than lump-sum payday loans.",
        min_amount: 500,
        max_amount: 35_000,
        min_apr: 6.0,
        max_apr: 199.0,
        min_term_months: 3,
        max_term_months: 60,
        term_label: "3 - 60 months",
        example_amount: 5_000,
    },
];

pub fn loan_type_by_slug(slug: &str) -> Option<&'static LoanTypeInfo> {
    LOAN_TYPES.iter().find(|loan_type| loan_type.slug == slug)
}
