use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::Loan;

/// portfolio-level totals across a set of loans
///
/// A pure reduction over each loan's derived state; nothing here is
/// recomputed from schedules or ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_outstanding: Money,
    /// combined current EMI of the active loans only
    pub total_monthly_emi: Money,
    pub total_borrowed: Money,
    pub total_interest_paid: Money,
    pub total_prepaid: Money,
    pub active_count: u32,
    pub closed_count: u32,
}

impl PortfolioSummary {
    pub fn loan_count(&self) -> u32 {
        self.active_count + self.closed_count
    }
}

/// reduce a set of loans to portfolio totals
pub fn summarize<'a>(loans: impl IntoIterator<Item = &'a Loan>) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        total_outstanding: Money::ZERO,
        total_monthly_emi: Money::ZERO,
        total_borrowed: Money::ZERO,
        total_interest_paid: Money::ZERO,
        total_prepaid: Money::ZERO,
        active_count: 0,
        closed_count: 0,
    };

    for loan in loans {
        let state = loan.state();

        summary.total_outstanding += state.outstanding;
        summary.total_borrowed += loan.terms().principal;
        summary.total_interest_paid += state.total_interest_paid;
        summary.total_prepaid += state.total_prepaid;

        if state.is_closed() {
            summary.closed_count += 1;
        } else {
            summary.total_monthly_emi += state.current_emi;
            summary.active_count += 1;
        }
    }

    summary
}
