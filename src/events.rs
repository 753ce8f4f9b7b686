use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{LoanId, PaymentId, PaymentKind};

/// all events a loan can emit
///
/// Events carry the dates of the payments that caused them; the engine
/// itself never reads a clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanEvent {
    LoanOriginated {
        loan_id: LoanId,
        name: String,
        principal: Money,
        annual_rate: Rate,
        tenure_months: u32,
        emi: Money,
        disbursal_date: NaiveDate,
    },
    PaymentRecorded {
        loan_id: LoanId,
        payment_id: PaymentId,
        kind: PaymentKind,
        amount: Money,
        date: NaiveDate,
        interest_component: Money,
        principal_component: Money,
        outstanding_after: Money,
    },
    /// a reduce-EMI prepayment recomputed the installment
    EmiRevised {
        loan_id: LoanId,
        payment_id: PaymentId,
        old_emi: Money,
        new_emi: Money,
    },
    /// a reduce-tenure prepayment shortened the remaining term
    TenureRevised {
        loan_id: LoanId,
        payment_id: PaymentId,
        old_tenure_months: u32,
        new_tenure_months: u32,
    },
    PaymentDeleted {
        loan_id: LoanId,
        payment_id: PaymentId,
        amount: Money,
        date: NaiveDate,
        outstanding_after: Money,
    },
    TermsEdited {
        loan_id: LoanId,
        old_rate: Rate,
        new_rate: Rate,
        old_tenure_months: u32,
        new_tenure_months: u32,
        new_emi: Money,
    },
    LoanClosed {
        loan_id: LoanId,
        closed_on: Option<NaiveDate>,
        total_interest_paid: Money,
    },
    LoanReopened {
        loan_id: LoanId,
        outstanding: Money,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LoanEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LoanEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LoanEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LoanEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
