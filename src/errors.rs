use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::PaymentId;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid term: {message}")]
    InvalidTerm {
        message: String,
    },

    #[error("non-amortizing schedule: payment {emi} does not exceed monthly interest {interest_due}")]
    NonAmortizingSchedule {
        emi: Money,
        interest_due: Money,
    },

    #[error("schedule does not amortize within {cap} months")]
    ScheduleCapExceeded {
        cap: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("underpayment: {provided} does not cover the {interest_due} interest accrued")]
    Underpayment {
        interest_due: Money,
        provided: Money,
    },

    #[error("overpayment: outstanding {outstanding}, provided {provided}")]
    Overpayment {
        outstanding: Money,
        provided: Money,
    },

    #[error("prepayment requires a reduce-emi or reduce-tenure choice")]
    MissingPrepaymentAction,

    #[error("payment dated {payment_date} predates disbursal on {disbursal_date}")]
    PaymentPredatesLoan {
        disbursal_date: NaiveDate,
        payment_date: NaiveDate,
    },

    #[error("loan is closed; no further payments accepted")]
    LoanClosed,

    #[error("payment not found: {id}")]
    PaymentNotFound {
        id: PaymentId,
    },

    #[error("ledger replay failed at payment {payment_id}: {source}")]
    ReplayFailed {
        payment_id: PaymentId,
        source: Box<LoanError>,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
