use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::emi::emi_for;
use crate::errors::{LoanError, Result};
use crate::payment::{Payment, PaymentDraft};
use crate::schedule::months_to_amortize;
use crate::state::LoanState;
use crate::terms::LoanTerms;
use crate::types::{PaymentId, PaymentKind, PrepaymentAction};

/// ordered, replayable log of everything paid against a loan
///
/// The ledger is the source of truth; every balance, EMI and tenure figure
/// is a fold over it. Mutations are atomic: a record or removal that would
/// leave any payment in the ledger invalid is rejected wholesale and the
/// ledger keeps its previous contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLedger {
    /// kept sorted by `(date, seq)`
    payments: Vec<Payment>,
    next_seq: u64,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self {
            payments: Vec::new(),
            next_seq: 0,
        }
    }

    /// rebuild a ledger from persisted payments
    ///
    /// Entries are re-sorted into ledger order; validity is proven by the
    /// next replay, not here.
    pub fn from_payments(mut payments: Vec<Payment>) -> Self {
        payments.sort_by_key(|p| p.ledger_key());
        let next_seq = payments.iter().map(|p| p.seq).max().map_or(0, |s| s + 1);
        Self { payments, next_seq }
    }

    /// payments in ledger order
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn get(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    /// derived state of the loan under the given terms
    pub fn state(&self, terms: &LoanTerms) -> Result<LoanState> {
        match fold(terms, &self.payments) {
            Ok((state, _)) => Ok(state),
            Err((payment_id, source)) => Err(LoanError::ReplayFailed {
                payment_id,
                source: Box::new(source),
            }),
        }
    }

    /// apply a new payment, resequencing and replaying the whole ledger
    ///
    /// A backdated draft slots into its chronological position and every
    /// later payment has its split recomputed. If the draft itself is
    /// invalid its own error comes back; if inserting it strands some later
    /// payment, the rejection is wrapped in [`LoanError::ReplayFailed`]
    /// naming that payment.
    pub fn record(&mut self, terms: &LoanTerms, draft: PaymentDraft) -> Result<(Payment, LoanState)> {
        let candidate = Payment {
            id: Payment::new_id(),
            kind: draft.kind,
            amount: draft.amount,
            date: draft.date,
            seq: self.next_seq,
            action: draft.action,
            interest_component: Money::ZERO,
            principal_component: Money::ZERO,
            outstanding_after: Money::ZERO,
            reference: draft.reference,
        };
        let candidate_id = candidate.id;

        let position = self
            .payments
            .partition_point(|p| p.ledger_key() <= candidate.ledger_key());
        self.payments.insert(position, candidate);

        match fold(terms, &self.payments) {
            Ok((state, applied)) => {
                self.payments = applied;
                self.next_seq += 1;
                Ok((self.payments[position].clone(), state))
            }
            Err((failed_id, source)) => {
                self.payments.remove(position);
                if failed_id == candidate_id {
                    Err(source)
                } else {
                    Err(LoanError::ReplayFailed {
                        payment_id: failed_id,
                        source: Box::new(source),
                    })
                }
            }
        }
    }

    /// replay under the given terms and commit the recomputed splits
    ///
    /// Used when the baseline itself changes, e.g. a rate edit. A payment
    /// the new terms cannot absorb fails the whole operation and the ledger
    /// keeps the splits it had.
    pub fn reapply(&mut self, terms: &LoanTerms) -> Result<LoanState> {
        match fold(terms, &self.payments) {
            Ok((state, applied)) => {
                self.payments = applied;
                Ok(state)
            }
            Err((payment_id, source)) => Err(LoanError::ReplayFailed {
                payment_id,
                source: Box::new(source),
            }),
        }
    }

    /// remove a payment and replay the survivors from the baseline
    ///
    /// Removing a payment can strand a later one, most visibly an EMI that
    /// no longer covers a month's interest on the restored balance. Such
    /// removals are rejected with [`LoanError::ReplayFailed`] and the
    /// ledger is left untouched.
    pub fn remove(&mut self, terms: &LoanTerms, id: PaymentId) -> Result<(Payment, LoanState)> {
        let position = self
            .payments
            .iter()
            .position(|p| p.id == id)
            .ok_or(LoanError::PaymentNotFound { id })?;
        let removed = self.payments.remove(position);

        match fold(terms, &self.payments) {
            Ok((state, applied)) => {
                self.payments = applied;
                Ok((removed, state))
            }
            Err((payment_id, source)) => {
                self.payments.insert(position, removed);
                Err(LoanError::ReplayFailed {
                    payment_id,
                    source: Box::new(source),
                })
            }
        }
    }
}

impl Default for PaymentLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// replay payments against loan terms from the origination baseline
///
/// Input order does not matter; entries are folded in `(date, seq)` order
/// and returned with their recomputed splits. Pure with respect to its
/// inputs: the same terms and payments always produce the same state.
pub fn replay(terms: &LoanTerms, payments: &[Payment]) -> Result<(LoanState, Vec<Payment>)> {
    let mut ordered = payments.to_vec();
    ordered.sort_by_key(|p| p.ledger_key());

    fold(terms, &ordered).map_err(|(payment_id, source)| LoanError::ReplayFailed {
        payment_id,
        source: Box::new(source),
    })
}

type FoldError = (PaymentId, LoanError);

/// the replay fold itself; errors name the payment that failed to apply
fn fold(
    terms: &LoanTerms,
    entries: &[Payment],
) -> std::result::Result<(LoanState, Vec<Payment>), FoldError> {
    let monthly_rate = terms.monthly_rate().as_decimal();
    let mut state = LoanState::at_origination(terms.principal, terms.emi, terms.tenure_months);
    let mut applied = Vec::with_capacity(entries.len());

    for entry in entries {
        if !state.can_accept_payment() {
            return Err((entry.id, LoanError::LoanClosed));
        }
        if !entry.amount.is_positive() {
            return Err((
                entry.id,
                LoanError::InvalidPaymentAmount {
                    amount: entry.amount,
                },
            ));
        }
        if entry.date < terms.disbursal_date {
            return Err((
                entry.id,
                LoanError::PaymentPredatesLoan {
                    disbursal_date: terms.disbursal_date,
                    payment_date: entry.date,
                },
            ));
        }

        let (interest, principal) = match entry.kind {
            PaymentKind::Emi => fold_emi(&mut state, entry, monthly_rate)?,
            PaymentKind::Prepayment | PaymentKind::PartPayment => {
                fold_prepayment(&mut state, entry, terms)?
            }
        };

        if state.outstanding.is_zero() {
            state.close();
        }

        applied.push(Payment {
            interest_component: interest,
            principal_component: principal,
            outstanding_after: state.outstanding,
            reference: entry.reference.clone(),
            ..*entry
        });
    }

    Ok((state, applied))
}

fn fold_emi(
    state: &mut LoanState,
    entry: &Payment,
    monthly_rate: Decimal,
) -> std::result::Result<(Money, Money), FoldError> {
    let interest = Money::from_decimal(state.outstanding.as_decimal() * monthly_rate);

    // an installment must at least cover the month's interest; once it
    // does, short and final installments below the scheduled EMI are fine
    if entry.amount < interest {
        return Err((
            entry.id,
            LoanError::Underpayment {
                interest_due: interest,
                provided: entry.amount,
            },
        ));
    }

    let principal = (entry.amount - interest).min(state.outstanding);
    state.apply_emi(entry.date, interest, principal);

    Ok((interest, principal))
}

fn fold_prepayment(
    state: &mut LoanState,
    entry: &Payment,
    terms: &LoanTerms,
) -> std::result::Result<(Money, Money), FoldError> {
    let action = entry
        .action
        .ok_or((entry.id, LoanError::MissingPrepaymentAction))?;

    if entry.amount > state.outstanding {
        return Err((
            entry.id,
            LoanError::Overpayment {
                outstanding: state.outstanding,
                provided: entry.amount,
            },
        ));
    }

    state.apply_prepayment(entry.date, entry.amount);

    if !state.outstanding.is_zero() {
        match action {
            PrepaymentAction::ReduceEmi => {
                // a nearly cleared loan can outlive its tenure counter;
                // one final month is the floor
                let months = state.current_tenure_months.max(1);
                let new_emi = emi_for(state.outstanding, terms.annual_rate, months)
                    .map_err(|e| (entry.id, e))?;
                months_to_amortize(state.outstanding, terms.annual_rate, new_emi)
                    .map_err(|e| (entry.id, e))?;
                state.current_emi = new_emi;
                state.current_tenure_months = months;
            }
            PrepaymentAction::ReduceTenure => {
                state.current_tenure_months =
                    months_to_amortize(state.outstanding, terms.annual_rate, state.current_emi)
                        .map_err(|e| (entry.id, e))?;
            }
        }
    }

    Ok((Money::ZERO, entry.amount))
}
