mod error;
mod repayment;
mod types;

pub use error::InvalidInputError;
pub use repayment::{calculate_repayment, round_to_cents};
pub use types::{
    APR_BOUNDS, Amortization, InputBounds, LoanQuote, PRINCIPAL_BOUNDS, RepaymentResult,
    TERM_BOUNDS,
};
