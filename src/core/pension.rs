use super::tax::get_marginal_rate;
use super::types::{
    ContributionBreakdown, JAARRUIMTE_RATE, JaarruimteResult, MAX_PENSIONABLE_SALARY,
};

/// Pension base: salary above the AOW-franchise, floored at 0.
pub fn calc_pensioengrondslag(gross_salary: f64, franchise: f64) -> f64 {
    (gross_salary - franchise).max(0.0)
}

/// One year of second-pillar contributions.
///
/// The tax saving is `employee contribution × marginal rate`, which assumes the
/// whole contribution sits in the salary's top bracket. Near the bracket limit this
/// overstates the relief compared to [`super::tax::calc_tax_saving`].
pub fn calc_contributions(
    gross_salary: f64,
    franchise: f64,
    employer_pct: f64,
    employee_pct: f64,
) -> ContributionBreakdown {
    let pensioengrondslag = calc_pensioengrondslag(gross_salary, franchise);
    let employer_contribution = pensioengrondslag * employer_pct;
    let employee_contribution_gross = pensioengrondslag * employee_pct;
    let marginal_tax_rate = get_marginal_rate(gross_salary);
    let tax_saving = employee_contribution_gross * marginal_tax_rate;
    let net_employee_cost = employee_contribution_gross - tax_saving;
    let total_funded = employer_contribution + employee_contribution_gross;
    let leverage_ratio = if net_employee_cost > 0.0 {
        total_funded / net_employee_cost
    } else {
        0.0
    };

    ContributionBreakdown {
        pensioengrondslag,
        employer_contribution,
        employee_contribution_gross,
        tax_saving,
        net_employee_cost,
        total_funded,
        marginal_tax_rate,
        leverage_ratio,
    }
}

/// Annual allowance for deductible third-pillar savings. The reduction for
/// second-pillar accrual is approximated by the contributions actually paid.
pub fn calc_jaarruimte(
    gross_salary: f64,
    franchise: f64,
    employer_contrib: f64,
    employee_contrib: f64,
) -> JaarruimteResult {
    let capped_salary = gross_salary.min(MAX_PENSIONABLE_SALARY);
    let base = calc_pensioengrondslag(capped_salary, franchise);
    let gross_allowance = base * JAARRUIMTE_RATE;
    let reduction = employer_contrib + employee_contrib;
    let available = (gross_allowance - reduction).max(0.0);

    JaarruimteResult {
        capped_salary,
        base,
        gross_allowance,
        reduction,
        available,
    }
}
