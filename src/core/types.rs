use serde::Serialize;

/// A validated request to price a fixed-rate loan.
///
/// Fields are private so every quote in circulation has passed
/// [`LoanQuote::new`]: positive principal, non-negative APR, at least one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub(crate) principal: f64,
    pub(crate) apr_percent: f64,
    pub(crate) term_months: u32,
}

impl LoanQuote {
    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn apr_percent(&self) -> f64 {
        self.apr_percent
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }
}

/// Full-precision amortization figures, before any cent rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amortization {
    pub monthly_payment: f64,
    pub total_cost: f64,
    pub total_interest: f64,
}

/// Cent-rounded repayment figures shown to borrowers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentResult {
    pub monthly_payment: f64,
    pub total_cost: f64,
    pub total_interest: f64,
}

/// Range accepted by one of the calculator sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl InputBounds {
    /// Pulls `value` into `[min, max]`. Non-finite input lands on `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

pub const PRINCIPAL_BOUNDS: InputBounds = InputBounds {
    min: 100.0,
    max: 35_000.0,
    step: 100.0,
};

pub const APR_BOUNDS: InputBounds = InputBounds {
    min: 1.0,
    max: 700.0,
    step: 1.0,
};

pub const TERM_BOUNDS: InputBounds = InputBounds {
    min: 1.0,
    max: 60.0,
    step: 1.0,
};
