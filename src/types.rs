use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a ledger payment
pub type PaymentId = Uuid;

/// loan lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// outstanding balance remains, payments accepted
    Active,
    /// principal fully repaid
    Closed,
}

impl LoanStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, LoanStatus::Closed)
    }
}

/// kind of ledger payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    /// scheduled installment, split into interest and principal
    Emi,
    /// extra payment applied entirely to principal
    Prepayment,
    /// partial lump sum toward principal; a label only, the ledger
    /// applies it exactly like a prepayment
    PartPayment,
}

/// how a prepayment reshapes the remaining loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentAction {
    /// keep the tenure, reduce future payment amounts
    ReduceEmi,
    /// keep the payment amount, reduce remaining tenure
    ReduceTenure,
}
