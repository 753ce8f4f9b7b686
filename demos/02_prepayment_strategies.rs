/// prepayment strategies - reduce the EMI or shorten the tenure
use chrono::NaiveDate;
use loan_ledger_rs::{Loan, LoanError, LoanTerms, Money, PaymentDraft, PrepaymentAction, Rate};
use rust_decimal_macros::dec;

/// a home loan one year into its term
fn seasoned_loan(name: &str) -> Result<Loan, LoanError> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let terms = LoanTerms::new(Money::from_major(5_000_000), Rate::from_percentage(dec!(8.5)), 240, start)?;
    let mut loan = Loan::originate(name, terms)?;

    let emi = loan.state().current_emi;
    for month in 1..=12 {
        let due = loan.terms().due_date(month);
        loan.record_payment(PaymentDraft::emi(emi, due))?;
    }
    Ok(loan)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== prepayment strategies ===\n");

    let prepayment_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    // strategy 1: keep the tenure, shrink the installment
    println!("1. reduce EMI");
    println!("-------------");
    let mut loan = seasoned_loan("Home loan (reduce EMI)")?;
    let before = loan.state().clone();
    println!("  outstanding: ₹{:.2}", before.outstanding.as_decimal());
    println!("  EMI: ₹{:.2}, {} months left", before.current_emi.as_decimal(), before.current_tenure_months);

    loan.record_payment(PaymentDraft::prepayment(
        Money::from_major(500_000),
        prepayment_date,
        PrepaymentAction::ReduceEmi,
    ))?;
    let after = loan.state();
    println!("  ✓ prepaid ₹500000");
    println!("  EMI: ₹{:.2}, {} months left", after.current_emi.as_decimal(), after.current_tenure_months);
    assert!(after.current_emi < before.current_emi);
    assert_eq!(after.current_tenure_months, before.current_tenure_months);

    // strategy 2: keep the installment, finish earlier
    println!("\n2. reduce tenure");
    println!("----------------");
    let mut loan = seasoned_loan("Home loan (reduce tenure)")?;
    let before = loan.state().clone();

    loan.record_payment(PaymentDraft::prepayment(
        Money::from_major(500_000),
        prepayment_date,
        PrepaymentAction::ReduceTenure,
    ))?;
    let after = loan.state();
    println!("  ✓ prepaid ₹500000");
    println!("  EMI: ₹{:.2}, {} months left", after.current_emi.as_decimal(), after.current_tenure_months);
    assert_eq!(after.current_emi, before.current_emi);
    assert!(after.current_tenure_months < before.current_tenure_months);

    let saved = loan.original_schedule()?.total_interest;
    let remaining = loan.remaining_schedule()?;
    println!(
        "  interest still to pay: ₹{:.2} (of ₹{:.2} originally projected)",
        remaining.total_interest.as_decimal(),
        saved.as_decimal()
    );

    // guard rails
    println!("\n3. rejected payments");
    println!("--------------------");
    let mut loan = seasoned_loan("Home loan (guard rails)")?;

    // interest alone runs close to 35,000 a month at this point
    match loan.record_payment(PaymentDraft::emi(
        Money::from_major(10_000),
        prepayment_date,
    )) {
        Ok(_) => println!("  error: EMI below interest should have been rejected!"),
        Err(e) => println!("  ✗ EMI below interest rejected: {}", e),
    }

    match loan.record_payment(PaymentDraft::prepayment(
        Money::from_major(10_000_000),
        prepayment_date,
        PrepaymentAction::ReduceTenure,
    )) {
        Ok(_) => println!("  error: oversized prepayment should have been rejected!"),
        Err(e) => println!("  ✗ oversized prepayment rejected: {}", e),
    }

    // a full-outstanding prepayment settles the loan
    println!("\n4. settlement");
    println!("-------------");
    let payoff = loan.state().outstanding;
    loan.record_payment(PaymentDraft::prepayment(
        payoff,
        prepayment_date,
        PrepaymentAction::ReduceTenure,
    ))?;
    println!("  ✓ paid off ₹{:.2}", payoff.as_decimal());
    println!("  status: {:?}", loan.state().status);
    println!("  outstanding: ₹{}", loan.state().outstanding.as_decimal());

    match loan.record_payment(PaymentDraft::emi(Money::from_major(43_392), prepayment_date)) {
        Ok(_) => println!("  error: closed loan accepted a payment!"),
        Err(e) => println!("  ✗ further payment rejected: {}", e),
    }

    Ok(())
}
