/// serialization support for loans
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::payment::Payment;
use crate::types::{LoanId, LoanStatus, PaymentId, PaymentKind, PrepaymentAction};

/// serializable view of a loan's full position
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub name: String,
    pub status: LoanStatus,
    pub terms: TermsView,
    pub position: PositionView,
    pub payments: Vec<PaymentView>,
    pub next_due_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_months: u32,
    pub disbursal_date: NaiveDate,
    pub emi_day: u8,
    pub emi: Money,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionView {
    pub outstanding: Money,
    pub current_emi: Money,
    pub current_tenure_months: u32,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    pub total_prepaid: Money,
    pub total_paid: Money,
    pub emi_count: u32,
    pub prepayment_count: u32,
    pub last_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentView {
    pub id: PaymentId,
    pub kind: PaymentKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub action: Option<PrepaymentAction>,
    pub interest_component: Money,
    pub principal_component: Money,
    pub outstanding_after: Money,
    pub reference: Option<String>,
}

impl LoanView {
    pub fn from_loan(loan: &Loan) -> Self {
        let state = loan.state();
        let terms = loan.terms();

        LoanView {
            id: loan.id,
            name: loan.name().to_string(),
            status: state.status,
            terms: TermsView {
                principal: terms.principal,
                annual_rate: terms.annual_rate,
                tenure_months: terms.tenure_months,
                disbursal_date: terms.disbursal_date,
                emi_day: terms.emi_day,
                emi: terms.emi,
            },
            position: PositionView {
                outstanding: state.outstanding,
                current_emi: state.current_emi,
                current_tenure_months: state.current_tenure_months,
                total_interest_paid: state.total_interest_paid,
                total_principal_paid: state.total_principal_paid,
                total_prepaid: state.total_prepaid,
                total_paid: state.total_paid(),
                emi_count: state.emi_count,
                prepayment_count: state.prepayment_count,
                last_payment_date: state.last_payment_date,
            },
            payments: loan.payments().iter().map(PaymentView::from_payment).collect(),
            next_due_date: loan.next_due_date(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl PaymentView {
    pub fn from_payment(payment: &Payment) -> Self {
        PaymentView {
            id: payment.id,
            kind: payment.kind,
            amount: payment.amount,
            date: payment.date,
            action: payment.action,
            interest_component: payment.interest_component,
            principal_component: payment.principal_component,
            outstanding_after: payment.outstanding_after,
            reference: payment.reference.clone(),
        }
    }
}
