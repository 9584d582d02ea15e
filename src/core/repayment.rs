use super::{Amortization, InvalidInputError, LoanQuote, RepaymentResult};

impl LoanQuote {
    pub fn new(
        principal: f64,
        apr_percent: f64,
        term_months: u32,
    ) -> Result<Self, InvalidInputError> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(InvalidInputError::Principal(principal));
        }
        if !apr_percent.is_finite() || apr_percent < 0.0 {
            return Err(InvalidInputError::Apr(apr_percent));
        }
        if term_months == 0 {
            return Err(InvalidInputError::Term(0.0));
        }
        Ok(Self {
            principal,
            apr_percent,
            term_months,
        })
    }

    /// Builds a quote from an untyped term, as received from query strings and
    /// JSON bodies. Fractional, negative and out-of-range terms are rejected.
    pub fn from_raw_term(
        principal: f64,
        apr_percent: f64,
        term_months: f64,
    ) -> Result<Self, InvalidInputError> {
        if !term_months.is_finite()
            || term_months.fract() != 0.0
            || term_months < 1.0
            || term_months > f64::from(u32::MAX)
        {
            return Err(InvalidInputError::Term(term_months));
        }
        Self::new(principal, apr_percent, term_months as u32)
    }

    pub fn monthly_rate(&self) -> f64 {
        self.apr_percent / 100.0 / 12.0
    }

    /// Fixed-rate amortization at full precision.
    ///
    /// Compound growth is taken as `exp_m1(n * ln_1p(r))` so tiny rates keep
    /// their digits. Growth that overflows leaves the interest-only limit
    /// `principal * r`, since `r / growth` goes to zero.
    pub fn amortize(&self) -> Amortization {
        let rate = self.monthly_rate();
        let periods = f64::from(self.term_months);
        let growth_m1 = (periods * rate.ln_1p()).exp_m1();

        if growth_m1 == 0.0 {
            return Amortization {
                monthly_payment: self.principal / periods,
                total_cost: self.principal,
                total_interest: 0.0,
            };
        }

        let monthly_payment = self.principal * (rate / growth_m1 + rate);
        // The schedule never repays less than was borrowed.
        let total_cost = (monthly_payment * periods).max(self.principal);
        Amortization {
            monthly_payment,
            total_cost,
            total_interest: total_cost - self.principal,
        }
    }

    pub fn repayment(&self) -> RepaymentResult {
        self.amortize().to_cents()
    }
}

impl Amortization {
    /// Rounds each figure to cents independently, from full precision.
    pub fn to_cents(&self) -> RepaymentResult {
        RepaymentResult {
            monthly_payment: round_to_cents(self.monthly_payment),
            total_cost: round_to_cents(self.total_cost),
            total_interest: round_to_cents(self.total_interest),
        }
    }
}

/// Half away from zero, to two decimal places.
///
/// Products like `1.005 * 100.0` land a few ulps under the tie, so the scaled
/// value is nudged outward by four ulps before rounding. Zero is never signed.
pub fn round_to_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let nudge = (scaled.abs() * f64::EPSILON * 4.0).copysign(scaled);
    let rounded = (scaled + nudge).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn calculate_repayment(
    principal: f64,
    apr_percent: f64,
    term_months: u32,
) -> Result<RepaymentResult, InvalidInputError> {
    LoanQuote::new(principal, apr_percent, term_months).map(|quote| quote.repayment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn quote(principal: f64, apr: f64, term: u32) -> LoanQuote {
        LoanQuote::new(principal, apr, term).expect("valid quote")
    }

    #[test]
    fn short_term_high_apr_matches_annuity_formula() {
        let result = calculate_repayment(500.0, 200.0, 6).expect("valid inputs");
        assert_approx(result.monthly_payment, 138.10);
        assert_approx(result.total_cost, 828.60);
        assert_approx(result.total_interest, 328.60);
    }

    #[test]
    fn zero_apr_splits_principal_evenly() {
        let result = calculate_repayment(1000.0, 0.0, 10).expect("valid inputs");
        assert_approx(result.monthly_payment, 100.0);
        assert_approx(result.total_cost, 1000.0);
        assert_approx(result.total_interest, 0.0);
    }

    #[test]
    fn zero_apr_keeps_total_at_principal_when_payment_rounds() {
        let result = calculate_repayment(1000.0, 0.0, 3).expect("valid inputs");
        assert_approx(result.monthly_payment, 333.33);
        assert_approx(result.total_cost, 1000.0);
        assert_approx(result.total_interest, 0.0);
    }

    #[test]
    fn two_year_installment_total_follows_unrounded_payment() {
        let quote = quote(5000.0, 36.0, 24);
        let raw = quote.amortize();
        let result = quote.repayment();

        assert!(result.total_cost > 5000.0);
        assert_approx(result.monthly_payment, 295.24);
        assert_approx(result.total_cost, 7085.69);
        assert_approx(result.total_interest, 2085.69);
        assert!((raw.monthly_payment * 24.0 - result.total_cost).abs() <= 0.01);
    }

    #[test]
    fn single_period_is_one_compounding_step() {
        let quote = quote(500.0, 200.0, 1);
        let result = quote.repayment();
        assert_approx(result.total_cost, round_to_cents(500.0 * (1.0 + quote.monthly_rate())));
        assert_approx(result.monthly_payment, result.total_cost);
    }

    #[test]
    fn monthly_rate_is_apr_over_twelve() {
        assert_approx(quote(500.0, 200.0, 6).monthly_rate(), 200.0 / 100.0 / 12.0);
        assert_approx(quote(500.0, 0.0, 6).monthly_rate(), 0.0);
    }

    #[test]
    fn rejects_zero_term() {
        let err = calculate_repayment(1000.0, 10.0, 0).expect_err("zero term must fail");
        assert_eq!(err, InvalidInputError::Term(0.0));
    }

    #[test]
    fn rejects_non_positive_principal() {
        assert_eq!(
            calculate_repayment(0.0, 10.0, 12),
            Err(InvalidInputError::Principal(0.0))
        );
        assert_eq!(
            calculate_repayment(-5.0, 10.0, 12),
            Err(InvalidInputError::Principal(-5.0))
        );
        assert!(calculate_repayment(f64::NAN, 10.0, 12).is_err());
    }

    #[test]
    fn rejects_negative_or_non_finite_apr() {
        assert_eq!(
            calculate_repayment(1000.0, -1.0, 12),
            Err(InvalidInputError::Apr(-1.0))
        );
        assert!(calculate_repayment(1000.0, f64::INFINITY, 12).is_err());
    }

    #[test]
    fn raw_term_must_be_a_positive_whole_number() {
        assert!(LoanQuote::from_raw_term(1000.0, 10.0, 12.0).is_ok());
        assert_eq!(
            LoanQuote::from_raw_term(1000.0, 10.0, 2.5),
            Err(InvalidInputError::Term(2.5))
        );
        assert_eq!(
            LoanQuote::from_raw_term(1000.0, 10.0, -3.0),
            Err(InvalidInputError::Term(-3.0))
        );
        assert!(LoanQuote::from_raw_term(1000.0, 10.0, 0.0).is_err());
        assert!(LoanQuote::from_raw_term(1000.0, 10.0, f64::NAN).is_err());
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_approx(round_to_cents(2.345_000_1), 2.35);
        assert_approx(round_to_cents(-2.345_000_1), -2.35);
        assert_approx(round_to_cents(0.125), 0.13);
    }

    fn assert_covers_principal(principal: f64, result: &RepaymentResult) {
        assert!(result.monthly_payment.is_finite(), "{result:?}");
        assert!(result.total_cost.is_finite(), "{result:?}");
        assert!(result.total_interest.is_finite(), "{result:?}");
        assert!(result.total_interest >= 0.0, "{result:?}");
        assert!(result.total_interest.is_sign_positive(), "{result:?}");
        assert!(result.total_cost >= principal, "{result:?}");
    }

    #[test]
    fn tiny_positive_apr_behaves_like_zero_apr() {
        for apr in [1e-9, 1e-12, 1e-17, f64::MIN_POSITIVE, 5e-324] {
            let result = calculate_repayment(1000.0, apr, 12).expect("valid inputs");
            assert_covers_principal(1000.0, &result);
            assert_approx(result.monthly_payment, 83.33);
            assert_approx(result.total_cost, 1000.0);
            assert_approx(result.total_interest, 0.0);
        }
    }

    #[test]
    fn very_long_term_approaches_interest_only_payment() {
        let quote = LoanQuote::from_raw_term(1000.0, 10.0, 1_000_000.0).expect("valid quote");
        let result = quote.repayment();
        assert_covers_principal(1000.0, &result);
        assert_approx(result.monthly_payment, 8.33);
        assert!((result.total_cost - 1000.0 * quote.monthly_rate() * 1_000_000.0).abs() <= 0.01);
    }

    #[test]
    fn longest_accepted_term_stays_finite() {
        let quote =
            LoanQuote::from_raw_term(1000.0, 700.0, f64::from(u32::MAX)).expect("valid quote");
        assert_covers_principal(1000.0, &quote.repayment());
        let quote = LoanQuote::from_raw_term(1000.0, 1e-12, f64::from(u32::MAX)).expect("valid quote");
        assert_covers_principal(1000.0, &quote.repayment());
    }

    #[test]
    fn decimal_ties_round_away_from_zero() {
        assert_eq!(round_to_cents(1.005), 1.01);
        assert_eq!(round_to_cents(-1.005), -1.01);
        assert_eq!(round_to_cents(2.675), 2.68);
        assert_eq!(round_to_cents(1.004_9), 1.0);
        assert!(round_to_cents(-0.001).is_sign_positive());
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_zero_apr_has_no_interest(
            principal_cents in 1u32..10_000_000,
            term in 1u32..=120
        ) {
            let principal = f64::from(principal_cents) / 100.0;
            let q = quote(principal, 0.0, term);
            let raw = q.amortize();
            prop_assert_eq!(raw.monthly_payment, principal / f64::from(term));
            prop_assert_eq!(raw.total_interest, 0.0);
            prop_assert_eq!(q.repayment().total_interest, 0.0);
        }

        #[test]
        fn prop_totals_are_consistent_and_cover_principal(
            principal_hundreds in 1u32..=350,
            apr in 0u32..=700,
            term in 1u32..=60
        ) {
            let principal = f64::from(principal_hundreds) * 100.0;
            let q = quote(principal, f64::from(apr), term);
            let raw = q.amortize();
            let result = q.repayment();

            prop_assert!((round_to_cents(raw.monthly_payment * f64::from(term)) - result.total_cost).abs() <= 0.01 + EPS);
            prop_assert!(result.total_cost >= principal);
            prop_assert!(result.total_interest >= 0.0);
        }

        #[test]
        fn prop_any_rate_and_term_covers_principal(
            principal_cents in 1u32..10_000_000,
            apr in 0.0f64..1e-3,
            term in 1u32..=2_000_000
        ) {
            let principal = f64::from(principal_cents) / 100.0;
            let result = quote(principal, apr, term).repayment();

            prop_assert!(result.monthly_payment.is_finite());
            prop_assert!(result.total_cost.is_finite());
            prop_assert!(result.total_interest >= 0.0);
            prop_assert!(result.total_interest.is_sign_positive());
            prop_assert!(result.total_cost >= principal);
        }

        #[test]
        fn prop_higher_apr_costs_more(
            principal_hundreds in 1u32..=350,
            apr in 1u32..700,
            term in 1u32..=60
        ) {
            let principal = f64::from(principal_hundreds) * 100.0;
            let lower = quote(principal, f64::from(apr), term).amortize();
            let higher = quote(principal, f64::from(apr + 1), term).amortize();

            prop_assert!(higher.monthly_payment > lower.monthly_payment);
            prop_assert!(higher.total_interest > lower.total_interest);
        }

        #[test]
        fn prop_longer_term_lowers_payment_but_raises_interest(
            principal_hundreds in 1u32..=350,
            apr in 1u32..=700,
            term in 1u32..60
        ) {
            let principal = f64::from(principal_hundreds) * 100.0;
            let shorter = quote(principal, f64::from(apr), term).amortize();
            let longer = quote(principal, f64::from(apr), term + 1).amortize();

            prop_assert!(longer.monthly_payment < shorter.monthly_payment);
            prop_assert!(longer.total_interest > shorter.total_interest);
        }

        #[test]
        fn prop_repeated_calls_are_bit_identical(
            principal_cents in 1u32..10_000_000,
            apr_bp in 0u32..70_000,
            term in 1u32..=360
        ) {
            let principal = f64::from(principal_cents) / 100.0;
            let apr = f64::from(apr_bp) / 100.0;
            let first = calculate_repayment(principal, apr, term).expect("valid inputs");
            let second = calculate_repayment(principal, apr, term).expect("valid inputs");
            prop_assert_eq!(first.monthly_payment.to_bits(), second.monthly_payment.to_bits());
            prop_assert_eq!(first.total_cost.to_bits(), second.total_cost.to_bits());
            prop_assert_eq!(first.total_interest.to_bits(), second.total_interest.to_bits());
        }
    }
}
