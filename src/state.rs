use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::LoanStatus;

/// derived snapshot of a loan after replaying its payment ledger
///
/// Never authoritative on its own: any ledger mutation rebuilds the whole
/// snapshot from the origination baseline. Two invariants hold after every
/// replay: `outstanding` never goes negative, and `total_principal_paid`
/// plus `outstanding` equals the original principal to the paisa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanState {
    pub outstanding: Money,
    /// zero once the loan closes
    pub current_emi: Money,
    /// remaining installments; zero once the loan closes
    pub current_tenure_months: u32,
    pub total_interest_paid: Money,
    /// includes prepaid principal; `total_prepaid` tracks that subset
    pub total_principal_paid: Money,
    pub total_prepaid: Money,
    pub emi_count: u32,
    pub prepayment_count: u32,
    pub last_payment_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

impl LoanState {
    /// baseline state before any payment is applied
    pub fn at_origination(principal: Money, emi: Money, tenure_months: u32) -> Self {
        Self {
            outstanding: principal,
            current_emi: emi,
            current_tenure_months: tenure_months,
            total_interest_paid: Money::ZERO,
            total_principal_paid: Money::ZERO,
            total_prepaid: Money::ZERO,
            emi_count: 0,
            prepayment_count: 0,
            last_payment_date: None,
            status: LoanStatus::Active,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn can_accept_payment(&self) -> bool {
        !self.is_closed()
    }

    /// money actually applied to the loan so far
    pub fn total_paid(&self) -> Money {
        self.total_interest_paid + self.total_principal_paid
    }

    /// apply one installment split into its interest and principal parts
    pub(crate) fn apply_emi(&mut self, date: NaiveDate, interest: Money, principal: Money) {
        self.outstanding = (self.outstanding - principal).max(Money::ZERO);
        self.total_interest_paid += interest;
        self.total_principal_paid += principal;
        self.emi_count += 1;
        self.current_tenure_months = self.current_tenure_months.saturating_sub(1);
        self.last_payment_date = Some(date);
    }

    /// apply an extra payment entirely against principal
    pub(crate) fn apply_prepayment(&mut self, date: NaiveDate, amount: Money) {
        self.outstanding = (self.outstanding - amount).max(Money::ZERO);
        self.total_principal_paid += amount;
        self.total_prepaid += amount;
        self.prepayment_count += 1;
        self.last_payment_date = Some(date);
    }

    /// mark the loan fully repaid and zero the forward-looking fields
    pub(crate) fn close(&mut self) {
        self.status = LoanStatus::Closed;
        self.current_emi = Money::ZERO;
        self.current_tenure_months = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_origination_baseline() {
        let state = LoanState::at_origination(Money::from_major(100_000), Money::from_major(8_885), 12);

        assert_eq!(state.outstanding, Money::from_major(100_000));
        assert_eq!(state.current_emi, Money::from_major(8_885));
        assert_eq!(state.current_tenure_months, 12);
        assert_eq!(state.status, LoanStatus::Active);
        assert!(state.can_accept_payment());
        assert_eq!(state.total_paid(), Money::ZERO);
    }

    #[test]
    fn test_emi_application_conserves_debt() {
        let principal = Money::from_major(100_000);
        let mut state = LoanState::at_origination(principal, Money::from_major(8_885), 12);

        state.apply_emi(date(2024, 2, 1), Money::from_major(1_000), Money::from_major(7_885));

        assert_eq!(state.outstanding, Money::from_major(92_115));
        assert_eq!(state.total_principal_paid + state.outstanding, principal);
        assert_eq!(state.current_tenure_months, 11);
        assert_eq!(state.emi_count, 1);
        assert_eq!(state.last_payment_date, Some(date(2024, 2, 1)));
    }

    #[test]
    fn test_prepayment_tracked_as_principal_subset() {
        let mut state = LoanState::at_origination(Money::from_major(100_000), Money::from_major(8_885), 12);

        state.apply_prepayment(date(2024, 3, 10), Money::from_major(20_000));

        assert_eq!(state.outstanding, Money::from_major(80_000));
        assert_eq!(state.total_principal_paid, Money::from_major(20_000));
        assert_eq!(state.total_prepaid, Money::from_major(20_000));
        assert_eq!(state.total_interest_paid, Money::ZERO);
        assert_eq!(state.prepayment_count, 1);
    }

    #[test]
    fn test_close_zeroes_forward_fields() {
        let mut state = LoanState::at_origination(Money::from_major(1_000), Money::from_major(500), 2);

        state.apply_prepayment(date(2024, 2, 1), Money::from_major(1_000));
        state.close();

        assert!(state.is_closed());
        assert!(!state.can_accept_payment());
        assert_eq!(state.current_emi, Money::ZERO);
        assert_eq!(state.current_tenure_months, 0);
        assert_eq!(state.outstanding, Money::ZERO);
    }
}
