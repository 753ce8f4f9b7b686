/// portfolio summary - totals across a mixed book of loans
use chrono::NaiveDate;
use loan_ledger_rs::{summarize, Loan, LoanError, LoanTerms, Money, PaymentDraft, PrepaymentAction, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn originate(name: &str, principal: i64, rate: Decimal, months: u32) -> Result<Loan, LoanError> {
    let terms = LoanTerms::new(
        Money::from_major(principal),
        Rate::from_percentage(rate),
        months,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )?;
    Loan::originate(name, terms)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== portfolio summary ===\n");

    // a home loan three installments in
    let mut home = originate("Home loan", 5_000_000, dec!(8.5), 240)?;
    let emi = home.state().current_emi;
    for month in 1..=3 {
        let due = home.terms().due_date(month);
        home.record_payment(PaymentDraft::emi(emi, due))?;
    }

    // a car loan with one installment and a part payment toward principal
    let mut car = originate("Car loan", 800_000, dec!(9.25), 60)?;
    let emi = car.state().current_emi;
    let due = car.terms().due_date(1);
    car.record_payment(PaymentDraft::emi(emi, due))?;
    car.record_payment(PaymentDraft::part_payment(
        Money::from_major(100_000),
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
        PrepaymentAction::ReduceTenure,
    ))?;

    // a consumer loan already settled in full
    let mut phone = originate("Phone loan", 60_000, dec!(14), 12)?;
    phone.record_payment(PaymentDraft::prepayment(
        Money::from_major(60_000),
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
        PrepaymentAction::ReduceTenure,
    ))?;

    let loans = [&home, &car, &phone];

    println!("loans:");
    for loan in loans {
        let state = loan.state();
        println!(
            "  {:<12} {:>12.2} outstanding, EMI {:>9.2}, {:?}",
            loan.name(),
            state.outstanding.as_decimal(),
            state.current_emi.as_decimal(),
            state.status,
        );
    }

    let summary = summarize(loans);

    println!("\nportfolio:");
    println!("  loans: {} ({} active, {} closed)", summary.loan_count(), summary.active_count, summary.closed_count);
    println!("  borrowed: ₹{:.2}", summary.total_borrowed.as_decimal());
    println!("  outstanding: ₹{:.2}", summary.total_outstanding.as_decimal());
    println!("  monthly outgo: ₹{:.2}", summary.total_monthly_emi.as_decimal());
    println!("  interest paid so far: ₹{:.2}", summary.total_interest_paid.as_decimal());
    println!("  prepaid so far: ₹{:.2}", summary.total_prepaid.as_decimal());

    println!("\nas json:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
