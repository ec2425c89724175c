use super::types::PAYOUT_YEARS;

/// Deflate a year-`year` amount to today's purchasing power.
pub fn to_real(nominal_value: f64, year: u32, inflation_rate: f64) -> f64 {
    nominal_value / (1.0 + inflation_rate).powi(year as i32)
}

/// Level monthly payout that spends `capital` over twenty years at `annual_rate`.
///
/// Callers converting accumulated capital should pass
/// [`ANNUITY_RATE`](super::types::ANNUITY_RATE), not the scenario's investment return.
pub fn estimate_monthly_pension(capital: f64, annual_rate: f64) -> f64 {
    let months = PAYOUT_YEARS * 12;
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate == 0.0 {
        return capital / months as f64;
    }
    capital * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(months as i32)))
}
