use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};

/// hard ceiling on generated schedule length
///
/// An EMI that barely exceeds the monthly interest amortizes in theory but
/// can take thousands of rows of minor-unit principal. Generation fails at
/// the cap instead of producing a schedule nobody asked for.
pub const MAX_SCHEDULE_MONTHS: u32 = 600;

/// one installment row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub due_date: NaiveDate,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest_component: Money,
    pub principal_component: Money,
    pub closing_balance: Money,
}

/// full amortization schedule for a fixed EMI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub emi: Money,
    pub start_date: NaiveDate,
    pub rows: Vec<ScheduleRow>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
}

impl Schedule {
    /// number of installments in the schedule
    pub fn months(&self) -> u32 {
        self.rows.len() as u32
    }

    /// get row for a specific installment (1-based)
    pub fn row(&self, month: u32) -> Option<&ScheduleRow> {
        if month == 0 {
            return None;
        }
        self.rows.get((month - 1) as usize)
    }

    /// due date of the last installment
    pub fn final_due_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.due_date)
    }
}

/// add calendar months to a date, clamping to month end
///
/// Jan 31 + 1 month is Feb 29 in a leap year; offsets are always taken from
/// the anchor date, so Jan 31 + 2 months is Mar 31, not Mar 29.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// move a date to a target day of month, clamping to the month's length
pub fn clamp_to_day(date: NaiveDate, day: u8) -> NaiveDate {
    date.with_day(u32::from(day))
        .or_else(|| date.with_day(days_in_month(date.year(), date.month())))
        .unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// generate the amortization schedule for a principal paid down by a fixed EMI
///
/// Each row charges one month of interest on the opening balance (rounded to
/// minor units), puts the rest of the EMI toward principal, and clamps the
/// final installment to whatever balance remains. Row `i` falls due `i`
/// months after `start_date`.
pub fn build_schedule(
    principal: Money,
    annual_rate: Rate,
    emi: Money,
    start_date: NaiveDate,
) -> Result<Schedule> {
    let monthly_rate = validate_amortization_inputs(principal, annual_rate, emi)?;

    let mut rows = Vec::new();
    let mut balance = principal;
    let mut total_interest = Money::ZERO;
    let mut total_principal = Money::ZERO;
    let mut total_paid = Money::ZERO;
    let mut month = 0u32;

    while balance.is_positive() {
        month += 1;
        if month > MAX_SCHEDULE_MONTHS {
            return Err(LoanError::ScheduleCapExceeded {
                cap: MAX_SCHEDULE_MONTHS,
            });
        }

        let interest = Money::from_decimal(balance.as_decimal() * monthly_rate);
        let principal_part = (emi - interest).min(balance);
        let payment = interest + principal_part;
        let closing = (balance - principal_part).max(Money::ZERO);

        total_interest += interest;
        total_principal += principal_part;
        total_paid += payment;

        rows.push(ScheduleRow {
            month,
            due_date: add_months(start_date, month),
            opening_balance: balance,
            payment,
            interest_component: interest,
            principal_component: principal_part,
            closing_balance: closing,
        });

        balance = closing;
    }

    Ok(Schedule {
        principal,
        annual_rate,
        emi,
        start_date,
        rows,
        total_interest,
        total_principal,
        total_paid,
    })
}

/// number of months a fixed payment needs to clear a principal
///
/// Walks the same minor-unit arithmetic as [`build_schedule`], so the count
/// always equals the length of the schedule it would produce.
pub fn months_to_amortize(principal: Money, annual_rate: Rate, emi: Money) -> Result<u32> {
    let monthly_rate = validate_amortization_inputs(principal, annual_rate, emi)?;

    let mut balance = principal;
    let mut months = 0u32;

    while balance.is_positive() {
        months += 1;
        if months > MAX_SCHEDULE_MONTHS {
            return Err(LoanError::ScheduleCapExceeded {
                cap: MAX_SCHEDULE_MONTHS,
            });
        }

        let interest = Money::from_decimal(balance.as_decimal() * monthly_rate);
        let principal_part = (emi - interest).min(balance);
        balance = (balance - principal_part).max(Money::ZERO);
    }

    Ok(months)
}

fn validate_amortization_inputs(principal: Money, annual_rate: Rate, emi: Money) -> Result<Decimal> {
    if !principal.is_positive() {
        return Err(LoanError::InvalidTerm {
            message: format!("principal must be positive, got {principal}"),
        });
    }
    if annual_rate.as_decimal() < Decimal::ZERO {
        return Err(LoanError::InvalidTerm {
            message: format!("interest rate must not be negative, got {annual_rate}"),
        });
    }
    if !emi.is_positive() {
        return Err(LoanError::InvalidTerm {
            message: format!("emi must be positive, got {emi}"),
        });
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    // interest never grows as the balance falls, so checking the first month
    // is enough to know the whole schedule amortizes
    let first_interest = Money::from_decimal(principal.as_decimal() * monthly_rate);
    if emi <= first_interest {
        return Err(LoanError::NonAmortizingSchedule {
            emi,
            interest_due: first_interest,
        });
    }

    Ok(monthly_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emi::emi_for;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(12));
        let emi = emi_for(principal, rate, 12).unwrap();

        let schedule = build_schedule(principal, rate, emi, date(2024, 1, 1)).unwrap();

        assert_eq!(schedule.months(), 12);
        assert_eq!(schedule.rows.last().unwrap().closing_balance, Money::ZERO);
        assert_eq!(schedule.total_principal, principal);
        assert_eq!(schedule.total_paid, schedule.total_interest + schedule.total_principal);
    }

    #[test]
    fn test_principal_components_sum_exactly() {
        let principal = Money::from_major(5_000_000);
        let rate = Rate::from_percentage(dec!(8.5));
        let emi = emi_for(principal, rate, 240).unwrap();

        let schedule = build_schedule(principal, rate, emi, date(2024, 4, 1)).unwrap();

        let summed = schedule
            .rows
            .iter()
            .map(|r| r.principal_component)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert_eq!(summed, principal);
    }

    #[test]
    fn test_interest_declines_principal_grows() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(12));
        let emi = emi_for(principal, rate, 12).unwrap();

        let schedule = build_schedule(principal, rate, emi, date(2024, 1, 1)).unwrap();

        for pair in schedule.rows.windows(2) {
            assert!(pair[1].interest_component < pair[0].interest_component);
            assert!(pair[1].principal_component > pair[0].principal_component);
        }
    }

    #[test]
    fn test_final_installment_clamped() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(dec!(12));
        let emi = emi_for(principal, rate, 12).unwrap();

        let schedule = build_schedule(principal, rate, emi, date(2024, 1, 1)).unwrap();

        let last = schedule.rows.last().unwrap();
        assert!(last.payment <= emi);
        assert_eq!(last.principal_component, last.opening_balance);

        // every earlier row pays exactly the EMI
        for row in &schedule.rows[..schedule.rows.len() - 1] {
            assert_eq!(row.payment, emi);
        }
    }

    #[test]
    fn test_non_amortizing_payment_rejected() {
        // 2% monthly interest on 100k is 2000; 1500 never touches principal
        let result = build_schedule(
            Money::from_major(100_000),
            Rate::from_percentage(dec!(24)),
            Money::from_major(1_500),
            date(2024, 1, 1),
        );

        assert!(matches!(
            result,
            Err(LoanError::NonAmortizingSchedule { .. })
        ));
    }

    #[test]
    fn test_cap_stops_degenerate_schedules() {
        // one paisa of principal per month amortizes, eventually
        let result = build_schedule(
            Money::from_major(10_000_000),
            Rate::from_percentage(dec!(12)),
            Money::from_str_exact("100000.01").unwrap(),
            date(2024, 1, 1),
        );

        assert!(matches!(result, Err(LoanError::ScheduleCapExceeded { cap }) if cap == MAX_SCHEDULE_MONTHS));
    }

    #[test]
    fn test_months_to_amortize_matches_schedule_length() {
        let cases = [
            (100_000, dec!(12), 12u32),
            (250_000, dec!(9.25), 60),
            (5_000_000, dec!(8.5), 240),
        ];

        for (principal, rate, months) in cases {
            let principal = Money::from_major(principal);
            let rate = Rate::from_percentage(rate);
            let emi = emi_for(principal, rate, months).unwrap();

            let schedule = build_schedule(principal, rate, emi, date(2024, 1, 1)).unwrap();
            let counted = months_to_amortize(principal, rate, emi).unwrap();
            assert_eq!(counted, schedule.months());
        }
    }

    #[test]
    fn test_due_dates_clamp_to_month_end() {
        let principal = Money::from_major(30_000);
        let rate = Rate::from_percentage(dec!(12));
        let emi = emi_for(principal, rate, 3).unwrap();

        let schedule = build_schedule(principal, rate, emi, date(2024, 1, 31)).unwrap();

        assert_eq!(schedule.rows[0].due_date, date(2024, 2, 29));
        assert_eq!(schedule.rows[1].due_date, date(2024, 3, 31));
        assert_eq!(schedule.rows[2].due_date, date(2024, 4, 30));
    }

    #[test]
    fn test_clamp_to_day_respects_short_months() {
        assert_eq!(clamp_to_day(date(2024, 2, 1), 31), date(2024, 2, 29));
        assert_eq!(clamp_to_day(date(2023, 2, 10), 30), date(2023, 2, 28));
        assert_eq!(clamp_to_day(date(2024, 4, 30), 15), date(2024, 4, 15));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = build_schedule(
            Money::from_major(120_000),
            Rate::ZERO,
            Money::from_major(10_000),
            date(2024, 1, 1),
        )
        .unwrap();

        assert_eq!(schedule.months(), 12);
        assert_eq!(schedule.total_interest, Money::ZERO);
        for row in &schedule.rows {
            assert_eq!(row.principal_component, Money::from_major(10_000));
        }
    }

    #[test]
    fn test_oversized_emi_clears_in_one_row() {
        let schedule = build_schedule(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(12)),
            Money::from_major(10_000),
            date(2024, 1, 1),
        )
        .unwrap();

        assert_eq!(schedule.months(), 1);
        let only = &schedule.rows[0];
        assert_eq!(only.principal_component, Money::from_major(1_000));
        assert_eq!(only.payment, Money::from_major(1_010));
        assert_eq!(only.closing_balance, Money::ZERO);
    }
}
