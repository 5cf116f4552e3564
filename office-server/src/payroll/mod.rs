//! Payroll aggregation engine
//!
//! A pure reduction: every input (employees, shifts, debts, adjustments,
//! participant set, period shortage total) is supplied by the caller, so
//! identical inputs always produce identical rows — payslips can be
//! regenerated and audited at any time. Assembly of the inputs from the
//! database lives in [`service`].

pub mod service;

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::*;
use shared::models::{
    AdjustmentKind, DebtRecord, Employee, PayUnit, PayrollReport, PayrollRow, ShiftAdjustment,
    ShiftRecord,
};

use crate::money::{round_money, to_decimal, to_f64};

/// Everything a payroll computation consumes. Shifts, debts and
/// adjustments are pre-filtered to the period by the caller.
pub struct PayrollInputs<'a> {
    pub period_start: &'a str,
    pub period_end: &'a str,
    pub employees: &'a [Employee],
    pub shifts: &'a [ShiftRecord],
    pub debts: &'a [DebtRecord],
    pub adjustments: &'a [ShiftAdjustment],
    /// Employees absorbing the period's unexplained shortage value
    pub participant_ids: &'a [i64],
    /// Unexplained aggregate shortage value for the period (live figure or
    /// a director-supplied override)
    pub shortage_total: Decimal,
    pub shortage_overridden: bool,
}

/// Split the shortage total evenly across the participant set.
///
/// Each share is `total / n` rounded to 2dp half-up; the last participant
/// in ascending employee-id order absorbs the rounding remainder, so the
/// shares always sum back to the total exactly. An empty set allocates
/// nothing — never an error.
fn allocate_shortage(total: Decimal, participant_ids: &[i64]) -> BTreeMap<i64, Decimal> {
    let participants: BTreeSet<i64> = participant_ids.iter().copied().collect();
    let n = participants.len();
    if n == 0 || total == Decimal::ZERO {
        return BTreeMap::new();
    }

    let share = round_money(total / Decimal::from(n as i64));
    let mut shares = BTreeMap::new();
    let mut allocated = Decimal::ZERO;
    for (idx, id) in participants.iter().enumerate() {
        let amount = if idx + 1 == n {
            total - allocated
        } else {
            share
        };
        allocated += amount;
        shares.insert(*id, amount);
    }
    shares
}

/// Hours worked across a set of shifts, as an unrounded Decimal.
fn total_hours(shifts: &[&ShiftRecord]) -> Decimal {
    shifts
        .iter()
        .map(|s| Decimal::from((s.ended_at - s.started_at).max(0)) / Decimal::from(3_600_000))
        .sum()
}

/// Gross earnings per the employee's pay unit: an hourly employee earns
/// hours × rate, a daily employee earns the full flat rate per shift
/// regardless of hours logged.
fn gross_for(employee: &Employee, shifts: &[&ShiftRecord], hours: Decimal) -> Decimal {
    match employee.pay_unit {
        PayUnit::Hourly => hours * to_decimal(employee.pay_rate),
        PayUnit::Daily => to_decimal(employee.pay_rate) * Decimal::from(shifts.len() as i64),
    }
}

/// Aggregate one payroll row per employee for the period.
///
/// Rows cover every employee with at least one shift in range plus every
/// explicitly requested participant (who appears with all-zero numbers if
/// they never worked). Output is sorted by employee id. A misconfigured
/// employee gets an inline `issue` instead of failing the whole report,
/// and a negative net is valid — it is never clamped.
pub fn compute_payroll(inputs: &PayrollInputs) -> PayrollReport {
    let employees: BTreeMap<i64, &Employee> =
        inputs.employees.iter().map(|e| (e.id, e)).collect();

    let mut shifts_by_employee: BTreeMap<i64, Vec<&ShiftRecord>> = BTreeMap::new();
    for shift in inputs.shifts {
        shifts_by_employee
            .entry(shift.employee_id)
            .or_default()
            .push(shift);
    }

    // Roster: everyone who worked, plus explicitly requested participants
    let mut roster: BTreeSet<i64> = shifts_by_employee.keys().copied().collect();
    roster.extend(inputs.participant_ids.iter().copied());

    let shortage_shares = allocate_shortage(inputs.shortage_total, inputs.participant_ids);

    let mut rows = Vec::with_capacity(roster.len());
    let mut total_net = Decimal::ZERO;

    for employee_id in roster {
        let shifts = shifts_by_employee
            .get(&employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let hours = total_hours(shifts);

        let mut issue = None;
        let (employee_name, gross) = match employees.get(&employee_id) {
            Some(&employee) => {
                let gross = if employee.pay_rate > 0.0 {
                    gross_for(employee, shifts, hours)
                } else if shifts.is_empty() {
                    Decimal::ZERO
                } else {
                    issue = Some(format!(
                        "Pay rate not configured for {}",
                        employee.display_name
                    ));
                    Decimal::ZERO
                };
                (employee.display_name.clone(), gross)
            }
            None => {
                issue = Some(format!("No employee record for id {employee_id}"));
                (String::new(), Decimal::ZERO)
            }
        };

        let debt_amount: Decimal = inputs
            .debts
            .iter()
            .filter(|d| d.employee_id == employee_id)
            .map(|d| Decimal::from(d.quantity) * to_decimal(d.unit_price))
            .sum();

        let sum_kind = |kind: AdjustmentKind| -> Decimal {
            inputs
                .adjustments
                .iter()
                .filter(|a| a.employee_id == employee_id && a.kind == kind)
                .map(|a| to_decimal(a.amount))
                .sum()
        };
        let penalties = sum_kind(AdjustmentKind::Penalty);
        let bonuses = sum_kind(AdjustmentKind::Bonus);
        let commission = sum_kind(AdjustmentKind::HookahCommission);

        let shortage_amount = shortage_shares
            .get(&employee_id)
            .copied()
            .unwrap_or(Decimal::ZERO);

        let net = gross - debt_amount - shortage_amount - penalties + bonuses + commission;
        let net = round_money(net);
        total_net += net;

        rows.push(PayrollRow {
            employee_id,
            employee_name,
            total_hours: to_f64(hours),
            total_shifts: shifts.len() as i64,
            gross: to_f64(gross),
            debt_amount: to_f64(debt_amount),
            shortage_amount: to_f64(shortage_amount),
            penalties: to_f64(penalties),
            bonuses: to_f64(bonuses),
            commission: to_f64(commission),
            net: to_f64(net),
            issue,
        });
    }

    PayrollReport {
        period_start: inputs.period_start.to_string(),
        period_end: inputs.period_end.to_string(),
        rows,
        total_net: to_f64(total_net),
        shortage_total: to_f64(inputs.shortage_total),
        shortage_overridden: inputs.shortage_overridden,
    }
}

#[cfg(test)]
mod tests;
