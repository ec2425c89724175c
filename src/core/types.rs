use serde::Serialize;

/// Statutory AOW (state pension) age the projection runs up to by default.
pub const AOW_AGE: u32 = 67;
pub const MIN_YEARS: u32 = 5;
pub const MAX_YEARS: u32 = 45;

/// Fixed rate used to turn a lump sum into a monthly payout. Deliberately
/// separate from the investment return that produced the lump sum.
pub const ANNUITY_RATE: f64 = 0.015;
pub const PAYOUT_YEARS: u32 = 20;

pub const JAARRUIMTE_RATE: f64 = 0.30;
/// Ceiling on pensionable salary (2024).
pub const MAX_PENSIONABLE_SALARY: f64 = 137_800.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaxBracket {
    pub limit: f64,
    pub rate: f64,
}

/// Box 1 below AOW age (2024/2025).
pub const WORKING_AGE_BRACKETS: [TaxBracket; 2] = [
    TaxBracket {
        limit: 75_518.0,
        rate: 0.3697,
    },
    TaxBracket {
        limit: f64::INFINITY,
        rate: 0.4950,
    },
];

/// Box 1 above AOW age: the first bracket carries no AOW premium.
pub const RETIREMENT_BRACKETS: [TaxBracket; 3] = [
    TaxBracket {
        limit: 40_021.0,
        rate: 0.1907,
    },
    TaxBracket {
        limit: 75_518.0,
        rate: 0.3697,
    },
    TaxBracket {
        limit: f64::INFINITY,
        rate: 0.4950,
    },
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReturnRateSet {
    pub bad: f64,
    pub normal: f64,
    pub good: f64,
}

pub const RETURN_RATES: ReturnRateSet = ReturnRateSet {
    bad: 0.02,
    normal: 0.05,
    good: 0.08,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnScenario {
    Bad,
    Normal,
    Good,
}

impl ReturnScenario {
    pub const ALL: [ReturnScenario; 3] = [
        ReturnScenario::Bad,
        ReturnScenario::Normal,
        ReturnScenario::Good,
    ];

    pub fn rate(self) -> f64 {
        match self {
            ReturnScenario::Bad => RETURN_RATES.bad,
            ReturnScenario::Normal => RETURN_RATES.normal,
            ReturnScenario::Good => RETURN_RATES.good,
        }
    }
}

/// Inputs for one projection run. Rates are decimals (0.02 = 2%), amounts are
/// euros. Every field is required; defaulting happens in the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimParams {
    /// Annual gross salary in year 1.
    pub starting_salary: f64,
    pub starting_age: u32,
    pub salary_growth_rate: f64,
    /// Employer contribution as a fraction of the pension base.
    pub employer_pct: f64,
    /// Employee contribution as a fraction of the pension base.
    pub employee_pct: f64,
    /// Voluntary third-pillar savings per month.
    pub extra_savings_monthly: f64,
    /// AOW-franchise excluded from the pension base in year 1.
    pub franchise: f64,
    pub franchise_growth_rate: f64,
    /// Only used for nominal to real conversion of outputs.
    pub inflation_rate: f64,
    /// Simulated years, see [`horizon_years`].
    pub years: u32,
    /// Estimated AOW payout per month, for the income comparison.
    pub aow_monthly: f64,
}

/// Years between the starting age and retirement, clamped to the supported range.
pub fn horizon_years(starting_age: u32, retirement_age: u32) -> u32 {
    retirement_age
        .saturating_sub(starting_age)
        .clamp(MIN_YEARS, MAX_YEARS)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributionBreakdown {
    pub pensioengrondslag: f64,
    pub employer_contribution: f64,
    pub employee_contribution_gross: f64,
    pub tax_saving: f64,
    pub net_employee_cost: f64,
    pub total_funded: f64,
    pub marginal_tax_rate: f64,
    pub leverage_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaarruimteResult {
    pub capped_salary: f64,
    pub base: f64,
    pub gross_allowance: f64,
    pub reduction: f64,
    pub available: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyResult {
    pub year: u32,
    pub gross_salary: f64,
    pub franchise: f64,
    pub pensioengrondslag: f64,
    pub marginal_tax_rate: f64,
    // second pillar
    pub employer_contribution: f64,
    pub employee_contribution_gross: f64,
    pub tax_saving: f64,
    pub net_employee_cost: f64,
    pub total_annual_contribution: f64,
    pub jaarruimte_available: f64,
    // third pillar
    pub extra_savings_annual: f64,
    pub extra_savings_tax_benefit: f64,
    pub extra_savings_net_cost: f64,
    pub capital_bad: f64,
    pub capital_normal: f64,
    pub capital_good: f64,
    pub capital_bad_third: f64,
    pub capital_normal_third: f64,
    pub capital_good_third: f64,
}

impl YearlyResult {
    pub fn capital(&self, scenario: ReturnScenario) -> f64 {
        match scenario {
            ReturnScenario::Bad => self.capital_bad,
            ReturnScenario::Normal => self.capital_normal,
            ReturnScenario::Good => self.capital_good,
        }
    }

    pub fn capital_third(&self, scenario: ReturnScenario) -> f64 {
        match scenario {
            ReturnScenario::Bad => self.capital_bad_third,
            ReturnScenario::Normal => self.capital_normal_third,
            ReturnScenario::Good => self.capital_good_third,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub scenario: ReturnScenario,
    pub return_rate: f64,
    pub final_capital_second: f64,
    pub final_capital_third: f64,
    pub total_contributions: f64,
    pub total_tax_savings: f64,
    pub total_net_cost: f64,
    pub monthly_pension: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementStatus {
    Good,
    Moderate,
    Low,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeComparison {
    pub current_net_monthly: f64,
    pub monthly_second_pillar: f64,
    pub monthly_third_pillar: f64,
    pub monthly_aow: f64,
    pub gross_total_monthly: f64,
    pub monthly_pension_tax: f64,
    pub net_total_monthly: f64,
    pub replacement_ratio: f64,
    pub replacement_pct: u32,
    pub status: ReplacementStatus,
}
