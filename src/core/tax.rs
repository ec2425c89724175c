use super::types::{RETIREMENT_BRACKETS, TaxBracket, WORKING_AGE_BRACKETS};

/// Progressive tax over brackets ordered by ascending `limit`. Each bracket taxes
/// the slice between the previous limit and its own; the last limit is unbounded.
pub fn apply_brackets(gross_income: f64, brackets: &[TaxBracket]) -> f64 {
    if gross_income <= 0.0 {
        return 0.0;
    }

    let mut tax = 0.0;
    let mut lower = 0.0;
    for bracket in brackets {
        let slice = gross_income.min(bracket.limit) - lower;
        if slice <= 0.0 {
            break;
        }
        tax += slice * bracket.rate;
        lower = bracket.limit;
    }
    tax
}

/// Rate of the bracket containing `gross_income`. A bracket limit belongs to the
/// lower bracket.
pub fn marginal_rate_in(gross_income: f64, brackets: &[TaxBracket]) -> f64 {
    brackets
        .iter()
        .find(|bracket| gross_income <= bracket.limit)
        .or(brackets.last())
        .map(|bracket| bracket.rate)
        .unwrap_or(0.0)
}

/// Box 1 income tax below AOW age.
pub fn calculate_tax(gross_income: f64) -> f64 {
    apply_brackets(gross_income, &WORKING_AGE_BRACKETS)
}

pub fn get_marginal_rate(gross_income: f64) -> f64 {
    marginal_rate_in(gross_income, &WORKING_AGE_BRACKETS)
}

/// Tax after deducting a pre-tax pension contribution. Taxable income floors at 0.
pub fn calculate_tax_with_pension_deduction(gross_income: f64, contribution: f64) -> f64 {
    calculate_tax((gross_income - contribution).max(0.0))
}

/// Exact tax relief of a contribution, integrated across any bracket it crosses.
pub fn calc_tax_saving(gross_income: f64, contribution: f64) -> f64 {
    calculate_tax(gross_income) - calculate_tax_with_pension_deduction(gross_income, contribution)
}

/// Box 1 income tax above AOW age.
pub fn calculate_retirement_tax(gross_pension_income: f64) -> f64 {
    apply_brackets(gross_pension_income, &RETIREMENT_BRACKETS)
}
