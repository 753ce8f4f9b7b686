use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{PaymentId, PaymentKind, PrepaymentAction};

/// payment as submitted by the caller, before the ledger applies it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub kind: PaymentKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub action: Option<PrepaymentAction>,
    pub reference: Option<String>,
}

impl PaymentDraft {
    /// scheduled installment payment
    pub fn emi(amount: Money, date: NaiveDate) -> Self {
        Self {
            kind: PaymentKind::Emi,
            amount,
            date,
            action: None,
            reference: None,
        }
    }

    /// extra principal payment with its restructuring choice
    pub fn prepayment(amount: Money, date: NaiveDate, action: PrepaymentAction) -> Self {
        Self {
            kind: PaymentKind::Prepayment,
            amount,
            date,
            action: Some(action),
            reference: None,
        }
    }

    /// partial lump sum toward principal, applied like a prepayment
    pub fn part_payment(amount: Money, date: NaiveDate, action: PrepaymentAction) -> Self {
        Self {
            kind: PaymentKind::PartPayment,
            amount,
            date,
            action: Some(action),
            reference: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// applied payment as it sits in the ledger
///
/// The split into interest and principal, and the balance left afterwards,
/// are derived during replay and belong to the ledger ordering they were
/// computed under. Any mutation of the ledger recomputes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub kind: PaymentKind,
    pub amount: Money,
    pub date: NaiveDate,
    /// insertion sequence; orders same-date payments by arrival
    pub seq: u64,
    pub action: Option<PrepaymentAction>,
    pub interest_component: Money,
    pub principal_component: Money,
    pub outstanding_after: Money,
    pub reference: Option<String>,
}

impl Payment {
    /// ledger position: chronological, arrival order within a date
    pub fn ledger_key(&self) -> (NaiveDate, u64) {
        (self.date, self.seq)
    }

    /// the draft this payment would have been submitted as
    pub fn to_draft(&self) -> PaymentDraft {
        PaymentDraft {
            kind: self.kind,
            amount: self.amount,
            date: self.date,
            action: self.action,
            reference: self.reference.clone(),
        }
    }

    pub(crate) fn new_id() -> PaymentId {
        Uuid::new_v4()
    }
}
