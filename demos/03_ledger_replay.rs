/// ledger replay - backdated entries, deletion, and recomputed splits
use chrono::NaiveDate;
use loan_ledger_rs::{Loan, LoanTerms, Money, PaymentDraft, PrepaymentAction, Rate};
use rust_decimal_macros::dec;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn print_ledger(loan: &Loan) {
    println!("  {:<12} | {:<10} | {:>9} | {:>9} | {:>9}", "date", "kind", "interest", "principal", "balance");
    for payment in loan.payments() {
        println!(
            "  {:<12} | {:<10} | {:>9.2} | {:>9.2} | {:>9.2}",
            payment.date.to_string(),
            format!("{:?}", payment.kind),
            payment.interest_component.as_decimal(),
            payment.principal_component.as_decimal(),
            payment.outstanding_after.as_decimal(),
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== ledger replay ===\n");

    let terms = LoanTerms::new(
        Money::from_major(100_000),
        Rate::from_percentage(dec!(12)),
        12,
        ymd(2024, 1, 1),
    )?;
    let mut loan = Loan::originate("Car loan", terms)?;
    let emi = loan.state().current_emi;

    // two on-schedule installments
    println!("1. two installments recorded");
    println!("----------------------------");
    loan.record_payment(PaymentDraft::emi(emi, ymd(2024, 2, 1)))?;
    loan.record_payment(PaymentDraft::emi(emi, ymd(2024, 3, 1)))?;
    print_ledger(&loan);

    // a prepayment surfaces later, dated between them; every later
    // split is recomputed from scratch
    println!("\n2. backdated prepayment inserted");
    println!("--------------------------------");
    let prepayment = loan.record_payment(PaymentDraft::prepayment(
        Money::from_major(20_000),
        ymd(2024, 2, 15),
        PrepaymentAction::ReduceTenure,
    ))?;
    print_ledger(&loan);
    println!(
        "  note: the march installment now carries less interest, tenure is {} months",
        loan.state().current_tenure_months
    );

    // deleting it rebuilds the original history
    println!("\n3. prepayment deleted");
    println!("---------------------");
    loan.delete_payment(prepayment.id)?;
    print_ledger(&loan);
    println!("  tenure back to {} months", loan.state().current_tenure_months);

    // the audit trail of everything above
    println!("\n4. events");
    println!("---------");
    for event in loan.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
