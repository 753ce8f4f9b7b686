use chrono::NaiveDate;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::{EventStore, LoanEvent};
use crate::ledger::{self, PaymentLedger};
use crate::payment::{Payment, PaymentDraft};
use crate::schedule::{add_months, build_schedule, Schedule};
use crate::state::LoanState;
use crate::terms::LoanTerms;
use crate::types::{LoanId, PaymentId, PaymentKind, PrepaymentAction};

/// a loan: its terms, its payment ledger, and the state derived from them
///
/// All mutation goes through the ledger replay, so the cached state is
/// always the fold of the current payments over the current terms. Failed
/// operations leave terms, ledger and state exactly as they were.
///
/// A loan is plain owned data (`Send`); mutators take `&mut self`, so one
/// writer per loan is enforced by the borrow rules. Coordinating writers
/// across processes is the persistence layer's job.
#[derive(Debug)]
pub struct Loan {
    pub id: LoanId,
    name: String,
    terms: LoanTerms,
    ledger: PaymentLedger,
    state: LoanState,
    pub events: EventStore,
}

impl Loan {
    /// originate a new loan under the given terms
    pub fn originate(name: impl Into<String>, terms: LoanTerms) -> Result<Self> {
        let id = Uuid::new_v4();
        let name = name.into();
        let ledger = PaymentLedger::new();
        let state = ledger.state(&terms)?;

        let mut events = EventStore::new();
        events.emit(LoanEvent::LoanOriginated {
            loan_id: id,
            name: name.clone(),
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            tenure_months: terms.tenure_months,
            emi: state.current_emi,
            disbursal_date: terms.disbursal_date,
        });

        Ok(Self {
            id,
            name,
            terms,
            ledger,
            state,
            events,
        })
    }

    /// rebuild a loan from persisted terms and payments
    ///
    /// The stored splits are not trusted; one replay recomputes them and
    /// proves the ledger is coherent. No events are emitted.
    pub fn hydrate(
        id: LoanId,
        name: impl Into<String>,
        terms: LoanTerms,
        payments: Vec<Payment>,
    ) -> Result<Self> {
        let (state, applied) = ledger::replay(&terms, &payments)?;
        let ledger = PaymentLedger::from_payments(applied);

        Ok(Self {
            id,
            name: name.into(),
            terms,
            ledger,
            state,
            events: EventStore::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn state(&self) -> &LoanState {
        &self.state
    }

    pub fn payments(&self) -> &[Payment] {
        self.ledger.payments()
    }

    pub fn payment(&self, id: PaymentId) -> Option<&Payment> {
        self.ledger.get(id)
    }

    /// record a payment, resequencing and replaying the ledger
    pub fn record_payment(&mut self, draft: PaymentDraft) -> Result<Payment> {
        let was_closed = self.state.is_closed();
        let old_emi = self.state.current_emi;
        let old_tenure = self.state.current_tenure_months;

        let (payment, state) = self.ledger.record(&self.terms, draft)?;
        self.state = state;

        self.events.emit(LoanEvent::PaymentRecorded {
            loan_id: self.id,
            payment_id: payment.id,
            kind: payment.kind,
            amount: payment.amount,
            date: payment.date,
            interest_component: payment.interest_component,
            principal_component: payment.principal_component,
            outstanding_after: payment.outstanding_after,
        });

        let restructures = matches!(
            payment.kind,
            PaymentKind::Prepayment | PaymentKind::PartPayment
        );
        if restructures && !self.state.is_closed() {
            match payment.action {
                Some(PrepaymentAction::ReduceEmi) => {
                    self.events.emit(LoanEvent::EmiRevised {
                        loan_id: self.id,
                        payment_id: payment.id,
                        old_emi,
                        new_emi: self.state.current_emi,
                    });
                }
                Some(PrepaymentAction::ReduceTenure) => {
                    self.events.emit(LoanEvent::TenureRevised {
                        loan_id: self.id,
                        payment_id: payment.id,
                        old_tenure_months: old_tenure,
                        new_tenure_months: self.state.current_tenure_months,
                    });
                }
                None => {}
            }
        }

        if !was_closed && self.state.is_closed() {
            self.events.emit(LoanEvent::LoanClosed {
                loan_id: self.id,
                closed_on: self.state.last_payment_date,
                total_interest_paid: self.state.total_interest_paid,
            });
        }

        Ok(payment)
    }

    /// delete a payment, replaying the survivors
    ///
    /// Deleting the payment that closed the loan reopens it.
    pub fn delete_payment(&mut self, id: PaymentId) -> Result<Payment> {
        let was_closed = self.state.is_closed();
        let (removed, state) = self.ledger.remove(&self.terms, id)?;
        self.state = state;

        self.events.emit(LoanEvent::PaymentDeleted {
            loan_id: self.id,
            payment_id: removed.id,
            amount: removed.amount,
            date: removed.date,
            outstanding_after: self.state.outstanding,
        });

        if was_closed && !self.state.is_closed() {
            self.events.emit(LoanEvent::LoanReopened {
                loan_id: self.id,
                outstanding: self.state.outstanding,
            });
        }

        Ok(removed)
    }

    /// change the rate and/or tenure, replaying the ledger over the new baseline
    ///
    /// Every recorded payment must still apply under the new terms; if one
    /// cannot, nothing changes and the failure names it.
    pub fn edit_terms(&mut self, annual_rate: Option<Rate>, tenure_months: Option<u32>) -> Result<()> {
        let new_terms = self.terms.amended(annual_rate, tenure_months)?;

        let was_closed = self.state.is_closed();
        let state = self.ledger.reapply(&new_terms)?;

        let old_rate = self.terms.annual_rate;
        let old_tenure = self.terms.tenure_months;
        self.terms = new_terms;
        self.state = state;

        self.events.emit(LoanEvent::TermsEdited {
            loan_id: self.id,
            old_rate,
            new_rate: self.terms.annual_rate,
            old_tenure_months: old_tenure,
            new_tenure_months: self.terms.tenure_months,
            new_emi: self.state.current_emi,
        });

        if !was_closed && self.state.is_closed() {
            self.events.emit(LoanEvent::LoanClosed {
                loan_id: self.id,
                closed_on: self.state.last_payment_date,
                total_interest_paid: self.state.total_interest_paid,
            });
        }
        if was_closed && !self.state.is_closed() {
            self.events.emit(LoanEvent::LoanReopened {
                loan_id: self.id,
                outstanding: self.state.outstanding,
            });
        }

        Ok(())
    }

    /// the amortization schedule the loan was originated with
    pub fn original_schedule(&self) -> Result<Schedule> {
        self.terms.original_schedule()
    }

    /// projection of the installments still ahead
    ///
    /// Anchored so that due dates continue the original monthly grid: with
    /// `k` EMIs paid, the first remaining installment falls due `k + 1`
    /// months after disbursal. Closed loans project nothing.
    pub fn remaining_schedule(&self) -> Result<Schedule> {
        let anchor = add_months(self.terms.disbursal_date, self.state.emi_count);

        if self.state.is_closed() {
            return Ok(Schedule {
                principal: Money::ZERO,
                annual_rate: self.terms.annual_rate,
                emi: Money::ZERO,
                start_date: anchor,
                rows: Vec::new(),
                total_interest: Money::ZERO,
                total_principal: Money::ZERO,
                total_paid: Money::ZERO,
            });
        }

        build_schedule(
            self.state.outstanding,
            self.terms.annual_rate,
            self.state.current_emi,
            anchor,
        )
    }

    /// due date of the next installment, if the loan is still open
    ///
    /// Lands on the terms' `emi_day`, one month per EMI already paid.
    pub fn next_due_date(&self) -> Option<NaiveDate> {
        if self.state.is_closed() {
            return None;
        }
        Some(self.terms.due_date(self.state.emi_count + 1))
    }

    /// drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<LoanEvent> {
        self.events.take_events()
    }
}
