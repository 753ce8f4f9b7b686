/// amortization schedule - EMI computation and full schedule walk
use chrono::NaiveDate;
use loan_ledger_rs::{emi_for, LoanTerms, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== amortization schedule ===\n");

    // live preview before any loan exists
    println!("1. EMI preview");
    println!("--------------");
    let principal = Money::from_major(5_000_000);
    let rate = Rate::from_percentage(dec!(8.5));
    let emi = emi_for(principal, rate, 240)?;
    println!("  principal: ₹{}", principal.as_decimal());
    println!("  rate: {} over 240 months", rate);
    println!("  EMI: ₹{:.2}", emi.as_decimal());

    // the same numbers as a persisted loan's schedule
    println!("\n2. full schedule");
    println!("----------------");
    let terms = LoanTerms::new(
        principal,
        rate,
        240,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )?;
    let schedule = terms.original_schedule()?;

    println!("  months: {}", schedule.months());
    println!("  total interest: ₹{:.2}", schedule.total_interest.as_decimal());
    println!("  total paid: ₹{:.2}", schedule.total_paid.as_decimal());

    println!("\n  first three installments:");
    println!("  month |    due date |  interest | principal |     balance");
    for row in &schedule.rows[..3] {
        println!(
            "  {:>5} | {} | {:>9.2} | {:>9.2} | {:>11.2}",
            row.month,
            row.due_date,
            row.interest_component.as_decimal(),
            row.principal_component.as_decimal(),
            row.closing_balance.as_decimal(),
        );
    }

    println!("\n  last installment:");
    let last = schedule.rows.last().unwrap();
    println!(
        "  {:>5} | {} | {:>9.2} | {:>9.2} | {:>11.2}",
        last.month,
        last.due_date,
        last.interest_component.as_decimal(),
        last.principal_component.as_decimal(),
        last.closing_balance.as_decimal(),
    );
    assert_eq!(last.closing_balance, Money::ZERO);
    assert!(last.payment <= schedule.emi);

    // early months are interest-heavy, late months principal-heavy
    println!("\n3. interest/principal crossover");
    println!("-------------------------------");
    let crossover = schedule
        .rows
        .iter()
        .find(|row| row.principal_component > row.interest_component)
        .unwrap();
    println!(
        "  principal first exceeds interest in month {} ({})",
        crossover.month, crossover.due_date
    );

    Ok(())
}
