use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::schedule::MAX_SCHEDULE_MONTHS;

/// calculate the equated monthly installment for a loan
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1) with r the monthly rate.
/// Zero-rate loans divide the principal evenly across the tenure. Tenures
/// past [`MAX_SCHEDULE_MONTHS`] are rejected.
/// The result carries minor-unit precision; a 50 lakh loan at 8.5% over
/// 240 months comes out at 43,391.16 per month.
pub fn emi_for(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if !principal.is_positive() {
        return Err(LoanError::InvalidTerm {
            message: format!("principal must be positive, got {principal}"),
        });
    }
    if annual_rate.as_decimal() < Decimal::ZERO {
        return Err(LoanError::InvalidTerm {
            message: format!("interest rate must not be negative, got {annual_rate}"),
        });
    }
    if months == 0 {
        return Err(LoanError::InvalidTerm {
            message: "tenure must be at least one month".to_string(),
        });
    }
    // the compound factor grows geometrically and overflows Decimal for
    // tenures in the thousands of months
    if months > MAX_SCHEDULE_MONTHS {
        return Err(LoanError::InvalidTerm {
            message: format!(
                "tenure {months} months exceeds the {MAX_SCHEDULE_MONTHS} month maximum"
            ),
        });
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..months {
        compound *= base;
    }

    let numerator = principal.as_decimal() * r * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reference_home_loan() {
        let emi = emi_for(
            Money::from_major(5_000_000),
            Rate::from_percentage(dec!(8.5)),
            240,
        )
        .unwrap();

        assert_eq!(emi.round_dp(0), Money::from_major(43_391));
    }

    #[test]
    fn test_emi_covers_principal() {
        let cases = [
            (100_000, dec!(12), 12),
            (250_000, dec!(9.25), 60),
            (5_000_000, dec!(8.5), 240),
            (75_000, dec!(18), 36),
        ];

        for (principal, rate, months) in cases {
            let principal = Money::from_major(principal);
            let emi = emi_for(principal, Rate::from_percentage(rate), months).unwrap();
            assert!(
                emi * Decimal::from(months) >= principal,
                "EMI stream must cover principal for {principal} over {months} months"
            );
        }
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let emi = emi_for(Money::from_major(120_000), Rate::ZERO, 12).unwrap();
        assert_eq!(emi, Money::from_major(10_000));
    }

    #[test]
    fn test_higher_rate_costs_more() {
        let principal = Money::from_major(1_000_000);
        let cheap = emi_for(principal, Rate::from_percentage(dec!(7)), 120).unwrap();
        let dear = emi_for(principal, Rate::from_percentage(dec!(11)), 120).unwrap();
        assert!(dear > cheap);
    }

    #[test]
    fn test_rejects_bad_terms() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(10));

        assert!(matches!(
            emi_for(Money::ZERO, rate, 12),
            Err(LoanError::InvalidTerm { .. })
        ));
        assert!(matches!(
            emi_for(principal, Rate::from_decimal(dec!(-0.01)), 12),
            Err(LoanError::InvalidTerm { .. })
        ));
        assert!(matches!(
            emi_for(principal, rate, 0),
            Err(LoanError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_rejects_tenure_past_cap() {
        let principal = Money::from_major(5_000_000);
        let rate = Rate::from_percentage(dec!(8.5));

        assert!(emi_for(principal, rate, MAX_SCHEDULE_MONTHS).is_ok());
        // a 100,000-month tenure must come back as an error, not blow up
        // in the compound loop
        assert!(matches!(
            emi_for(principal, rate, 100_000),
            Err(LoanError::InvalidTerm { .. })
        ));
    }
}
