use super::*;
use rust_decimal::Decimal;

// Fixed base instant for shift timestamps (fixtures only care about
// differences, not the calendar position)
const BASE: i64 = 1_750_000_000_000;
const HOUR: i64 = 3_600_000;

fn hourly(id: i64, name: &str, rate: f64) -> Employee {
    Employee {
        id,
        display_name: name.to_string(),
        pay_unit: PayUnit::Hourly,
        pay_rate: rate,
        is_active: true,
        created_at: 0,
        updated_at: 0,
    }
}

fn daily(id: i64, name: &str, rate: f64) -> Employee {
    Employee {
        pay_unit: PayUnit::Daily,
        ..hourly(id, name, rate)
    }
}

fn shift(id: i64, employee_id: i64, day: i64, hours: i64) -> ShiftRecord {
    let started_at = BASE + day * 24 * HOUR;
    ShiftRecord {
        id,
        employee_id,
        shift_date: format!("2025-07-{:02}", day + 1),
        started_at,
        ended_at: started_at + hours * HOUR,
        shift_type: "evening".to_string(),
        created_at: 0,
    }
}

fn debt(id: i64, employee_id: i64, quantity: i64, unit_price: f64) -> DebtRecord {
    DebtRecord {
        id,
        employee_id,
        product_id: 900 + id,
        quantity,
        unit_price,
        incurred_at: BASE,
        note: None,
    }
}

fn adjustment(id: i64, employee_id: i64, kind: AdjustmentKind, amount: f64) -> ShiftAdjustment {
    ShiftAdjustment {
        id,
        shift_id: 100 + id,
        employee_id,
        kind,
        amount,
        reason: None,
        quantity: None,
        created_at: 0,
    }
}

fn inputs<'a>(
    employees: &'a [Employee],
    shifts: &'a [ShiftRecord],
    debts: &'a [DebtRecord],
    adjustments: &'a [ShiftAdjustment],
    participant_ids: &'a [i64],
    shortage_total: Decimal,
) -> PayrollInputs<'a> {
    PayrollInputs {
        period_start: "2025-07-01",
        period_end: "2025-07-31",
        employees,
        shifts,
        debts,
        adjustments,
        participant_ids,
        shortage_total,
        shortage_overridden: false,
    }
}

#[test]
fn test_hourly_worked_example() {
    // Two 8-hour shifts at hourly rate 200, one debt of 3 × 50, penalty of
    // 100, no bonuses, no shortage participation.
    let employees = vec![hourly(1, "Aru", 200.0)];
    let shifts = vec![shift(1, 1, 0, 8), shift(2, 1, 1, 8)];
    let debts = vec![debt(1, 1, 3, 50.0)];
    let adjustments = vec![adjustment(1, 1, AdjustmentKind::Penalty, 100.0)];

    assert_eq!(shifts[0].worked_hours(), 8.0);

    let report = compute_payroll(&inputs(
        &employees,
        &shifts,
        &debts,
        &adjustments,
        &[],
        Decimal::ZERO,
    ));

    assert_eq!(report.rows.len(), 1);
    let row = &report.rows[0];
    assert_eq!(row.total_shifts, 2);
    assert_eq!(row.total_hours, 16.0);
    assert_eq!(row.gross, 3200.0);
    assert_eq!(row.debt_amount, 150.0);
    assert_eq!(row.penalties, 100.0);
    assert_eq!(row.shortage_amount, 0.0);
    assert_eq!(row.net, 2950.0);
    assert_eq!(report.total_net, 2950.0);
    assert!(row.issue.is_none());
}

#[test]
fn test_daily_rate_is_flat_per_shift() {
    // A 3-hour shift and an 11-hour shift both pay the full day rate.
    let employees = vec![daily(1, "Marat", 8000.0)];
    let shifts = vec![shift(1, 1, 0, 3), shift(2, 1, 1, 11)];

    let report = compute_payroll(&inputs(&employees, &shifts, &[], &[], &[], Decimal::ZERO));

    let row = &report.rows[0];
    assert_eq!(row.gross, 16000.0);
    assert_eq!(row.total_hours, 14.0);
    assert_eq!(row.net, 16000.0);
}

#[test]
fn test_bonus_and_commission_add_to_net() {
    let employees = vec![hourly(1, "Dana", 100.0)];
    let shifts = vec![shift(1, 1, 0, 10)];
    let adjustments = vec![
        adjustment(1, 1, AdjustmentKind::Bonus, 500.0),
        adjustment(2, 1, AdjustmentKind::HookahCommission, 120.5),
        adjustment(3, 1, AdjustmentKind::HookahCommission, 79.5),
    ];

    let report = compute_payroll(&inputs(&employees, &shifts, &[], &adjustments, &[], Decimal::ZERO));

    let row = &report.rows[0];
    assert_eq!(row.gross, 1000.0);
    assert_eq!(row.bonuses, 500.0);
    assert_eq!(row.commission, 200.0);
    assert_eq!(row.net, 1700.0);
}

#[test]
fn test_shortage_shares_sum_back_exactly() {
    // 100.00 over three participants: 33.33 + 33.33 + 33.34
    let employees = vec![
        hourly(1, "A", 100.0),
        hourly(2, "B", 100.0),
        hourly(3, "C", 100.0),
        hourly(4, "D", 100.0),
    ];
    let shifts = vec![
        shift(1, 1, 0, 8),
        shift(2, 2, 0, 8),
        shift(3, 3, 0, 8),
        shift(4, 4, 0, 8),
    ];
    let participants = vec![1, 2, 3];

    let report = compute_payroll(&inputs(
        &employees,
        &shifts,
        &[],
        &[],
        &participants,
        Decimal::new(10000, 2), // 100.00
    ));

    let shares: Vec<f64> = report.rows.iter().map(|r| r.shortage_amount).collect();
    assert_eq!(shares, vec![33.33, 33.33, 33.34, 0.0]);
    let sum: f64 = shares.iter().sum();
    assert!((sum - 100.0).abs() < 1e-9);

    // Non-participant D is untouched by the shortage source
    assert_eq!(report.rows[3].shortage_amount, 0.0);
    assert_eq!(report.rows[3].net, 800.0);
}

#[test]
fn test_awkward_division_remainder_goes_to_last_participant() {
    let employees = vec![hourly(1, "A", 0.0), hourly(2, "B", 0.0), hourly(3, "C", 0.0)];
    let participants = vec![3, 1, 2]; // order of the request must not matter

    let report = compute_payroll(&inputs(
        &employees,
        &[],
        &[],
        &[],
        &participants,
        Decimal::new(1000, 2), // 10.00
    ));

    let shares: Vec<(i64, f64)> = report
        .rows
        .iter()
        .map(|r| (r.employee_id, r.shortage_amount))
        .collect();
    assert_eq!(shares, vec![(1, 3.33), (2, 3.33), (3, 3.34)]);
}

#[test]
fn test_empty_participant_set_is_zero_share_not_an_error() {
    let employees = vec![hourly(1, "A", 100.0)];
    let shifts = vec![shift(1, 1, 0, 8)];

    let report = compute_payroll(&inputs(
        &employees,
        &shifts,
        &[],
        &[],
        &[],
        Decimal::new(55500, 2),
    ));

    assert_eq!(report.rows[0].shortage_amount, 0.0);
    assert_eq!(report.rows[0].net, 800.0);
}

#[test]
fn test_zero_shift_participant_appears_with_all_zero_numbers() {
    let employees = vec![hourly(1, "A", 100.0), hourly(2, "B", 100.0)];
    let shifts = vec![shift(1, 1, 0, 8)];

    let report = compute_payroll(&inputs(&employees, &shifts, &[], &[], &[2], Decimal::ZERO));

    assert_eq!(report.rows.len(), 2);
    let idle = &report.rows[1];
    assert_eq!(idle.employee_id, 2);
    assert_eq!(idle.total_shifts, 0);
    assert_eq!(idle.total_hours, 0.0);
    assert_eq!(idle.gross, 0.0);
    assert_eq!(idle.net, 0.0);
    assert!(idle.issue.is_none());
}

#[test]
fn test_missing_pay_rate_flags_row_without_aborting_report() {
    let employees = vec![hourly(1, "Configured", 100.0), hourly(2, "Unconfigured", 0.0)];
    let shifts = vec![shift(1, 1, 0, 8), shift(2, 2, 0, 8)];

    let report = compute_payroll(&inputs(&employees, &shifts, &[], &[], &[], Decimal::ZERO));

    assert_eq!(report.rows.len(), 2);
    assert!(report.rows[0].issue.is_none());
    assert_eq!(report.rows[0].net, 800.0);

    let flagged = &report.rows[1];
    assert!(flagged.issue.as_deref().unwrap().contains("Pay rate"));
    assert_eq!(flagged.gross, 0.0);
    assert_eq!(flagged.total_shifts, 1);
}

#[test]
fn test_unknown_participant_gets_flagged_row() {
    let employees = vec![hourly(1, "A", 100.0)];
    let shifts = vec![shift(1, 1, 0, 8)];

    let report = compute_payroll(&inputs(&employees, &shifts, &[], &[], &[99], Decimal::ZERO));

    let ghost = report.rows.iter().find(|r| r.employee_id == 99).unwrap();
    assert!(ghost.issue.as_deref().unwrap().contains("No employee record"));
}

#[test]
fn test_negative_net_is_not_clamped() {
    let employees = vec![hourly(1, "A", 100.0)];
    let shifts = vec![shift(1, 1, 0, 4)];
    let debts = vec![debt(1, 1, 10, 100.0)]; // 1000 of debt against 400 gross

    let report = compute_payroll(&inputs(&employees, &shifts, &debts, &[], &[], Decimal::ZERO));

    assert_eq!(report.rows[0].net, -600.0);
    assert_eq!(report.total_net, -600.0);
}

#[test]
fn test_repeat_computation_is_bit_identical() {
    // A deliberately messy fixture: fractional hours, mixed pay units,
    // debts, all three adjustment kinds and an uneven shortage split.
    let employees = vec![
        hourly(1, "A", 173.5),
        daily(2, "B", 7250.0),
        hourly(3, "C", 99.99),
    ];
    let mut shifts = vec![
        shift(1, 1, 0, 8),
        shift(2, 2, 0, 12),
        shift(3, 3, 1, 6),
        shift(4, 1, 2, 9),
    ];
    // 7.5-hour shift
    let started_at = BASE + 3 * 24 * HOUR;
    shifts.push(ShiftRecord {
        id: 5,
        employee_id: 3,
        shift_date: "2025-07-04".to_string(),
        started_at,
        ended_at: started_at + 7 * HOUR + HOUR / 2,
        shift_type: "evening".to_string(),
        created_at: 0,
    });
    let debts = vec![debt(1, 1, 3, 50.5), debt(2, 3, 1, 1249.99)];
    let adjustments = vec![
        adjustment(1, 1, AdjustmentKind::Penalty, 100.0),
        adjustment(2, 2, AdjustmentKind::Bonus, 333.33),
        adjustment(3, 3, AdjustmentKind::HookahCommission, 75.25),
    ];
    let participants = vec![1, 2, 3];
    let shortage = Decimal::new(100001, 2); // 1000.01

    let run = || {
        compute_payroll(&inputs(
            &employees,
            &shifts,
            &debts,
            &adjustments,
            &participants,
            shortage,
        ))
    };

    let first = run();
    let second = run();
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.total_net, second.total_net);

    // Shares still conserve the total under the uneven split
    let allocated: f64 = first.rows.iter().map(|r| r.shortage_amount).sum();
    assert!((allocated - 1000.01).abs() < 1e-9);
}
