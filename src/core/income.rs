use super::tax::{calculate_retirement_tax, calculate_tax_with_pension_deduction};
use super::transform::{estimate_monthly_pension, to_real};
use super::types::{
    ANNUITY_RATE, IncomeComparison, ReplacementStatus, ReturnScenario, ScenarioSummary, SimParams,
    YearlyResult,
};

const GOOD_REPLACEMENT_PCT: u32 = 70;
const MODERATE_REPLACEMENT_PCT: u32 = 50;

fn displayed(nominal: f64, years: u32, inflation_rate: f64, real_mode: bool) -> f64 {
    if real_mode {
        to_real(nominal, years, inflation_rate)
    } else {
        nominal
    }
}

/// End-of-horizon totals for each return scenario, bad to good.
pub fn summarize(
    results: &[YearlyResult],
    params: &SimParams,
    real_mode: bool,
) -> Vec<ScenarioSummary> {
    let Some(last) = results.last() else {
        return Vec::new();
    };
    let years = results.len() as u32;

    let (total_contributions, total_tax_savings, total_net_cost) =
        results.iter().fold((0.0, 0.0, 0.0), |acc, row| {
            (
                acc.0 + row.total_annual_contribution,
                acc.1 + row.tax_saving,
                acc.2 + row.net_employee_cost,
            )
        });

    ReturnScenario::ALL
        .iter()
        .map(|&scenario| {
            let second = displayed(
                last.capital(scenario),
                years,
                params.inflation_rate,
                real_mode,
            );
            let third = displayed(
                last.capital_third(scenario),
                years,
                params.inflation_rate,
                real_mode,
            );
            ScenarioSummary {
                scenario,
                return_rate: scenario.rate(),
                final_capital_second: second,
                final_capital_third: third,
                total_contributions,
                total_tax_savings,
                total_net_cost,
                monthly_pension: estimate_monthly_pension(second + third, ANNUITY_RATE),
            }
        })
        .collect()
}

fn replacement_status(replacement_pct: u32) -> ReplacementStatus {
    if replacement_pct >= GOOD_REPLACEMENT_PCT {
        ReplacementStatus::Good
    } else if replacement_pct >= MODERATE_REPLACEMENT_PCT {
        ReplacementStatus::Moderate
    } else {
        ReplacementStatus::Low
    }
}

/// Net retirement income (normal scenario plus AOW) against net salary.
///
/// In real mode both sides are in today's euros: the reference salary is year 1
/// and capital is deflated. In nominal mode both sides are in final-year euros.
pub fn compare_income(
    results: &[YearlyResult],
    params: &SimParams,
    real_mode: bool,
) -> Option<IncomeComparison> {
    let first = results.first()?;
    let last = results.last()?;
    let years = results.len() as u32;

    let reference = if real_mode { first } else { last };
    let annual_tax = calculate_tax_with_pension_deduction(
        reference.gross_salary,
        reference.employee_contribution_gross,
    );
    let current_net_monthly =
        (reference.gross_salary - annual_tax - reference.employee_contribution_gross) / 12.0;

    let capital_second = displayed(last.capital_normal, years, params.inflation_rate, real_mode);
    let capital_third = displayed(
        last.capital_normal_third,
        years,
        params.inflation_rate,
        real_mode,
    );

    let monthly_second_pillar = estimate_monthly_pension(capital_second, ANNUITY_RATE);
    let monthly_third_pillar = estimate_monthly_pension(capital_third, ANNUITY_RATE);
    let monthly_aow = params.aow_monthly;

    let gross_total_monthly = monthly_second_pillar + monthly_third_pillar + monthly_aow;
    let monthly_pension_tax = calculate_retirement_tax(gross_total_monthly * 12.0) / 12.0;
    let net_total_monthly = gross_total_monthly - monthly_pension_tax;

    let replacement_ratio = if current_net_monthly > 0.0 {
        net_total_monthly / current_net_monthly
    } else {
        0.0
    };
    let replacement_pct = (replacement_ratio * 100.0).round().max(0.0) as u32;

    Some(IncomeComparison {
        current_net_monthly,
        monthly_second_pillar,
        monthly_third_pillar,
        monthly_aow,
        gross_total_monthly,
        monthly_pension_tax,
        net_total_monthly,
        replacement_ratio,
        replacement_pct,
        status: replacement_status(replacement_pct),
    })
}
