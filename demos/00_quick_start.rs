/// quick start - minimal example to get started
use chrono::NaiveDate;
use loan_ledger_rs::{Loan, LoanTerms, LoanView, Money, PaymentDraft, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // a 10,000 personal loan over 12 months at 8%
    let terms = LoanTerms::new(
        Money::from_major(10_000),
        Rate::from_percentage(dec!(8)),
        12,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )?;
    let mut loan = Loan::originate("Personal loan", terms)?;

    // pay the first installment
    let emi = loan.state().current_emi;
    loan.record_payment(PaymentDraft::emi(
        emi,
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    ))?;

    // print current state
    println!("{}", LoanView::from_loan(&loan).to_json_pretty()?);

    Ok(())
}
