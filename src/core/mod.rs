mod engine;
mod income;
mod pension;
mod tax;
mod transform;
mod types;

pub use engine::run_simulation;
pub use income::{compare_income, summarize};
pub use pension::{calc_contributions, calc_jaarruimte, calc_pensioengrondslag};
pub use tax::{
    apply_brackets, calc_tax_saving, calculate_retirement_tax, calculate_tax,
    calculate_tax_with_pension_deduction, get_marginal_rate, marginal_rate_in,
};
pub use transform::{estimate_monthly_pension, to_real};
pub use types::{
    ANNUITY_RATE, AOW_AGE, ContributionBreakdown, IncomeComparison, JAARRUIMTE_RATE,
    JaarruimteResult, MAX_PENSIONABLE_SALARY, MAX_YEARS, MIN_YEARS, PAYOUT_YEARS,
    RETIREMENT_BRACKETS, RETURN_RATES, ReplacementStatus, ReturnRateSet, ReturnScenario,
    ScenarioSummary, SimParams, TaxBracket, WORKING_AGE_BRACKETS, YearlyResult, horizon_years,
};
