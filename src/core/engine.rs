use tracing::debug;

use super::pension::{calc_contributions, calc_jaarruimte};
use super::types::{RETURN_RATES, ReturnRateSet, SimParams, YearlyResult};

/// Running capital of one pillar under the three return scenarios.
#[derive(Debug, Default, Clone, Copy)]
struct ScenarioCapital {
    bad: f64,
    normal: f64,
    good: f64,
}

impl ScenarioCapital {
    /// Prior capital earns a year of return, then the contribution lands at year end.
    fn compound(&mut self, rates: &ReturnRateSet, contribution: f64) {
        self.bad = self.bad * (1.0 + rates.bad) + contribution;
        self.normal = self.normal * (1.0 + rates.normal) + contribution;
        self.good = self.good * (1.0 + rates.good) + contribution;
    }
}

#[derive(Debug, Clone, Copy)]
struct ThirdPillarFlow {
    annual: f64,
    tax_benefit: f64,
    net_cost: f64,
}

fn third_pillar_flow(extra_savings_monthly: f64, marginal_rate: f64) -> ThirdPillarFlow {
    let annual = extra_savings_monthly * 12.0;
    let tax_benefit = annual * marginal_rate;
    ThirdPillarFlow {
        annual,
        tax_benefit,
        net_cost: annual - tax_benefit,
    }
}

fn grown(start: f64, rate: f64, years_since_start: u32) -> f64 {
    start * (1.0 + rate).powi(years_since_start as i32)
}

/// Project second and third pillar capital year by year. Returns exactly
/// `params.years` rows, index 0 being year 1.
pub fn run_simulation(params: &SimParams) -> Vec<YearlyResult> {
    let mut results = Vec::with_capacity(params.years as usize);
    let mut second = ScenarioCapital::default();
    let mut third = ScenarioCapital::default();

    for year in 1..=params.years {
        let gross_salary = grown(params.starting_salary, params.salary_growth_rate, year - 1);
        let franchise = grown(params.franchise, params.franchise_growth_rate, year - 1);

        let breakdown = calc_contributions(
            gross_salary,
            franchise,
            params.employer_pct,
            params.employee_pct,
        );
        let marginal_rate = breakdown.marginal_tax_rate;
        let jaarruimte = calc_jaarruimte(
            gross_salary,
            franchise,
            breakdown.employer_contribution,
            breakdown.employee_contribution_gross,
        );
        let extra = third_pillar_flow(params.extra_savings_monthly, marginal_rate);

        second.compound(&RETURN_RATES, breakdown.total_funded);
        third.compound(&RETURN_RATES, extra.annual);

        results.push(YearlyResult {
            year,
            gross_salary,
            franchise,
            pensioengrondslag: breakdown.pensioengrondslag,
            marginal_tax_rate: marginal_rate,
            employer_contribution: breakdown.employer_contribution,
            employee_contribution_gross: breakdown.employee_contribution_gross,
            tax_saving: breakdown.tax_saving,
            net_employee_cost: breakdown.net_employee_cost,
            total_annual_contribution: breakdown.total_funded,
            jaarruimte_available: jaarruimte.available,
            extra_savings_annual: extra.annual,
            extra_savings_tax_benefit: extra.tax_benefit,
            extra_savings_net_cost: extra.net_cost,
            capital_bad: second.bad,
            capital_normal: second.normal,
            capital_good: second.good,
            capital_bad_third: third.bad,
            capital_normal_third: third.normal,
            capital_good_third: third.good,
        });
    }

    debug!(
        years = params.years,
        final_capital_normal = second.normal,
        final_capital_normal_third = third.normal,
        "simulation complete"
    );
    results
}
