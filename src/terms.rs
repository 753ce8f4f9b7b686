use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::emi::emi_for;
use crate::errors::{LoanError, Result};
use crate::schedule::{add_months, build_schedule, clamp_to_day, months_to_amortize, Schedule};

/// financial terms a loan runs under
///
/// Terms are the fixed baseline the ledger replays against. The EMI is
/// derived once at construction; only an explicit amendment recomputes it.
/// A term edit swaps the baseline wholesale and replays; nothing here
/// changes in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_months: u32,
    pub disbursal_date: NaiveDate,
    /// day of month installments fall due, clamped to short months
    pub emi_day: u8,
    /// equated monthly installment these terms imply
    pub emi: Money,
}

impl LoanTerms {
    /// validate and construct loan terms
    ///
    /// Construction proves the terms amortize: the derived EMI must clear
    /// the principal within the schedule cap. A loan so large and long that
    /// its rounded EMI only covers interest is rejected here, not when the
    /// first schedule is requested. The due day defaults to the disbursal
    /// day; override it with [`with_emi_day`](Self::with_emi_day).
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        tenure_months: u32,
        disbursal_date: NaiveDate,
    ) -> Result<Self> {
        let emi = emi_for(principal, annual_rate, tenure_months)?;
        months_to_amortize(principal, annual_rate, emi)?;

        Ok(Self {
            principal,
            annual_rate,
            tenure_months,
            disbursal_date,
            emi_day: disbursal_date.day() as u8,
            emi,
        })
    }

    /// override the day of month installments fall due
    pub fn with_emi_day(mut self, emi_day: u8) -> Result<Self> {
        if !(1..=31).contains(&emi_day) {
            return Err(LoanError::InvalidTerm {
                message: format!("emi day must fall in 1..=31, got {emi_day}"),
            });
        }
        self.emi_day = emi_day;
        Ok(self)
    }

    /// monthly interest rate
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// due date of an installment (1-based)
    ///
    /// Months advance from the disbursal date; the day lands on `emi_day`,
    /// clamped to the length of the month.
    pub fn due_date(&self, emi_number: u32) -> NaiveDate {
        clamp_to_day(add_months(self.disbursal_date, emi_number), self.emi_day)
    }

    /// amortization schedule these terms imply, before any payment
    pub fn original_schedule(&self) -> Result<Schedule> {
        build_schedule(self.principal, self.annual_rate, self.emi, self.disbursal_date)
    }

    /// copy of these terms with a new rate and/or tenure
    pub fn amended(&self, annual_rate: Option<Rate>, tenure_months: Option<u32>) -> Result<Self> {
        let mut next = Self::new(
            self.principal,
            annual_rate.unwrap_or(self.annual_rate),
            tenure_months.unwrap_or(self.tenure_months),
            self.disbursal_date,
        )?;
        next.emi_day = self.emi_day;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::MAX_SCHEDULE_MONTHS;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_terms_round_trip() {
        let terms = LoanTerms::new(
            Money::from_major(5_000_000),
            Rate::from_percentage(dec!(8.5)),
            240,
            date(2024, 4, 1),
        )
        .unwrap();

        assert_eq!(terms.emi.round_dp(0), Money::from_major(43_391));
        assert_eq!(terms.emi_day, 1);
        assert_eq!(terms.monthly_rate().as_decimal(), dec!(0.085) / dec!(12));
    }

    #[test]
    fn test_rejects_zero_tenure_and_oversized_tenure() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(10));

        assert!(matches!(
            LoanTerms::new(principal, rate, 0, date(2024, 1, 1)),
            Err(LoanError::InvalidTerm { .. })
        ));
        assert!(matches!(
            LoanTerms::new(principal, rate, MAX_SCHEDULE_MONTHS + 1, date(2024, 1, 1)),
            Err(LoanError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_rejects_terms_whose_emi_rounds_away() {
        // tiny principal over 600 months: the rounded EMI equals the first
        // month's interest and the balance never moves
        let result = LoanTerms::new(
            Money::from_major(100),
            Rate::from_percentage(dec!(12)),
            600,
            date(2024, 1, 1),
        );

        assert!(matches!(
            result,
            Err(LoanError::NonAmortizingSchedule { .. })
        ));
    }

    #[test]
    fn test_emi_day_defaults_to_disbursal_day() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(12)),
            12,
            date(2024, 1, 20),
        )
        .unwrap();

        assert_eq!(terms.emi_day, 20);
        assert_eq!(terms.due_date(1), date(2024, 2, 20));
        assert_eq!(terms.due_date(12), date(2025, 1, 20));
    }

    #[test]
    fn test_emi_day_clamps_to_month_end() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(12)),
            12,
            date(2024, 1, 20),
        )
        .unwrap()
        .with_emi_day(31)
        .unwrap();

        assert_eq!(terms.due_date(1), date(2024, 2, 29));
        assert_eq!(terms.due_date(2), date(2024, 3, 31));
        assert_eq!(terms.due_date(3), date(2024, 4, 30));
    }

    #[test]
    fn test_emi_day_out_of_range_rejected() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(12)),
            12,
            date(2024, 1, 1),
        )
        .unwrap();

        assert!(matches!(
            terms.clone().with_emi_day(0),
            Err(LoanError::InvalidTerm { .. })
        ));
        assert!(matches!(
            terms.with_emi_day(32),
            Err(LoanError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_original_schedule_matches_terms() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(12)),
            12,
            date(2024, 1, 1),
        )
        .unwrap();

        let schedule = terms.original_schedule().unwrap();
        assert_eq!(schedule.months(), 12);
        assert_eq!(schedule.emi, terms.emi);
        assert_eq!(schedule.total_principal, terms.principal);
    }

    #[test]
    fn test_amended_swaps_only_named_fields() {
        let terms = LoanTerms::new(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(12)),
            24,
            date(2024, 1, 1),
        )
        .unwrap()
        .with_emi_day(5)
        .unwrap();

        let cheaper = terms.amended(Some(Rate::from_percentage(dec!(9))), None).unwrap();
        assert_eq!(cheaper.annual_rate, Rate::from_percentage(dec!(9)));
        assert_eq!(cheaper.tenure_months, 24);
        assert_eq!(cheaper.principal, terms.principal);
        assert_eq!(cheaper.disbursal_date, terms.disbursal_date);
        assert_eq!(cheaper.emi_day, 5);
        assert_eq!(
            cheaper.emi,
            emi_for(terms.principal, Rate::from_percentage(dec!(9)), 24).unwrap()
        );

        let shorter = terms.amended(None, Some(18)).unwrap();
        assert_eq!(shorter.tenure_months, 18);
        assert_eq!(shorter.annual_rate, terms.annual_rate);
    }
}
