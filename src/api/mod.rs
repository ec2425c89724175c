use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    AOW_AGE, IncomeComparison, ScenarioSummary, SimParams, YearlyResult, compare_income,
    horizon_years, run_simulation, summarize,
};

/// Rejected caller input. The engine itself never fails; these guard the
/// boundary where percentages and amounts come in from users.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("--starting-salary must be a positive amount")]
    StartingSalary,
    #[error("--extra-savings-monthly must be >= 0")]
    ExtraSavings,
    #[error("{0} must be between 0 and 100")]
    Percentage(&'static str),
    #[error("{0} must be > -100")]
    GrowthRate(&'static str),
    #[error("{0} must be >= 0")]
    NegativeAmount(&'static str),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    starting_salary: Option<f64>,
    starting_age: Option<u32>,
    retirement_age: Option<u32>,
    years: Option<u32>,
    salary_growth: Option<f64>,
    employer_pct: Option<f64>,
    employee_pct: Option<f64>,
    extra_savings_monthly: Option<f64>,
    franchise: Option<f64>,
    franchise_growth: Option<f64>,
    inflation: Option<f64>,
    aow_monthly: Option<f64>,
    real_mode: Option<bool>,
}

#[derive(Parser, Debug)]
#[command(
    name = "pensioen",
    about = "Dutch pension projection (employer scheme + voluntary savings, three return scenarios)"
)]
struct Cli {
    #[arg(long, default_value_t = 60_000.0, help = "Annual gross salary today")]
    starting_salary: f64,
    #[arg(long, default_value_t = 32)]
    starting_age: u32,
    #[arg(long, default_value_t = AOW_AGE)]
    retirement_age: u32,
    #[arg(
        long,
        help = "Simulated years; defaults to retirement-age minus starting-age (clamped 5-45)"
    )]
    years: Option<u32>,
    #[arg(long, default_value_t = 2.0, help = "Annual salary growth in percent")]
    salary_growth_rate: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Employer contribution in percent of the pension base"
    )]
    employer_pct: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Employee contribution in percent of the pension base"
    )]
    employee_pct: f64,
    #[arg(long, default_value_t = 0.0, help = "Voluntary third-pillar savings per month")]
    extra_savings_monthly: f64,
    #[arg(long, default_value_t = 17_545.0, help = "AOW-franchise in euros")]
    franchise: f64,
    #[arg(long, default_value_t = 1.5, help = "Annual franchise growth in percent")]
    franchise_growth_rate: f64,
    #[arg(long, default_value_t = 2.0, help = "Inflation in percent")]
    inflation_rate: f64,
    #[arg(long, default_value_t = 1_400.0, help = "Estimated AOW payout per month")]
    aow_monthly: f64,
    #[arg(long, help = "Report capital and income in today's euros")]
    real: bool,
}

#[derive(Debug)]
struct ApiRequest {
    params: SimParams,
    real_mode: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    years: u32,
    real_mode: bool,
    params: SimParams,
    scenarios: Vec<ScenarioSummary>,
    income_comparison: Option<IncomeComparison>,
    results: Vec<YearlyResult>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

fn build_params(cli: &Cli) -> Result<SimParams, ParamsError> {
    if !cli.starting_salary.is_finite() || cli.starting_salary <= 0.0 {
        return Err(ParamsError::StartingSalary);
    }

    if !cli.extra_savings_monthly.is_finite() || cli.extra_savings_monthly < 0.0 {
        return Err(ParamsError::ExtraSavings);
    }

    for (name, pct) in [
        ("--employer-pct", cli.employer_pct),
        ("--employee-pct", cli.employee_pct),
    ] {
        if !(0.0..=100.0).contains(&pct) {
            return Err(ParamsError::Percentage(name));
        }
    }

    for (name, rate) in [
        ("--salary-growth-rate", cli.salary_growth_rate),
        ("--franchise-growth-rate", cli.franchise_growth_rate),
        ("--inflation-rate", cli.inflation_rate),
    ] {
        if !rate.is_finite() || rate <= -100.0 {
            return Err(ParamsError::GrowthRate(name));
        }
    }

    for (name, amount) in [
        ("--franchise", cli.franchise),
        ("--aow-monthly", cli.aow_monthly),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ParamsError::NegativeAmount(name));
        }
    }

    let years = match cli.years {
        Some(years) => years.clamp(crate::core::MIN_YEARS, crate::core::MAX_YEARS),
        None => horizon_years(cli.starting_age, cli.retirement_age),
    };

    Ok(SimParams {
        starting_salary: cli.starting_salary,
        starting_age: cli.starting_age,
        salary_growth_rate: cli.salary_growth_rate / 100.0,
        employer_pct: cli.employer_pct / 100.0,
        employee_pct: cli.employee_pct / 100.0,
        extra_savings_monthly: cli.extra_savings_monthly,
        franchise: cli.franchise,
        franchise_growth_rate: cli.franchise_growth_rate / 100.0,
        inflation_rate: cli.inflation_rate / 100.0,
        years,
        aow_monthly: cli.aow_monthly,
    })
}

/// Parse command-line flags, run one projection and render it as pretty JSON.
pub fn run_report<I, T>(args: I) -> Result<String, ReportError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let params = build_params(&cli)?;
    let response = build_simulate_response(params, cli.real);
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "pension projection API listening");

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload).await
}

async fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "rejected simulate request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let response = build_simulate_response(request.params, request.real_mode);
    debug!(
        years = response.years,
        replacement_ratio = response
            .income_comparison
            .as_ref()
            .map(|c| c.replacement_ratio),
        "simulate request served"
    );
    json_response(StatusCode::OK, response)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn api_request_from_payload(payload: SimulatePayload) -> Result<ApiRequest, ParamsError> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.starting_salary {
        cli.starting_salary = v;
    }
    if let Some(v) = payload.starting_age {
        cli.starting_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.years {
        cli.years = Some(v);
    }
    if let Some(v) = payload.salary_growth {
        cli.salary_growth_rate = v;
    }
    if let Some(v) = payload.employer_pct {
        cli.employer_pct = v;
    }
    if let Some(v) = payload.employee_pct {
        cli.employee_pct = v;
    }
    if let Some(v) = payload.extra_savings_monthly {
        cli.extra_savings_monthly = v;
    }
    if let Some(v) = payload.franchise {
        cli.franchise = v;
    }
    if let Some(v) = payload.franchise_growth {
        cli.franchise_growth_rate = v;
    }
    if let Some(v) = payload.inflation {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.aow_monthly {
        cli.aow_monthly = v;
    }
    if let Some(v) = payload.real_mode {
        cli.real = v;
    }

    let params = build_params(&cli)?;
    Ok(ApiRequest {
        params,
        real_mode: cli.real,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        starting_salary: 60_000.0,
        starting_age: 32,
        retirement_age: AOW_AGE,
        years: None,
        salary_growth_rate: 2.0,
        employer_pct: 10.0,
        employee_pct: 5.0,
        extra_savings_monthly: 0.0,
        franchise: 17_545.0,
        franchise_growth_rate: 1.5,
        inflation_rate: 2.0,
        aow_monthly: 1_400.0,
        real: true,
    }
}

fn build_simulate_response(params: SimParams, real_mode: bool) -> SimulateResponse {
    let results = run_simulation(&params);
    let scenarios = summarize(&results, &params, real_mode);
    let income_comparison = compare_income(&results, &params, real_mode);
    SimulateResponse {
        years: params.years,
        real_mode,
        params,
        scenarios,
        income_comparison,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli_for_api()
    }

    #[test]
    fn build_params_converts_percentages_to_decimals() {
        let params = build_params(&sample_cli()).expect("valid params");
        assert_approx(params.salary_growth_rate, 0.02);
        assert_approx(params.employer_pct, 0.10);
        assert_approx(params.employee_pct, 0.05);
        assert_approx(params.franchise_growth_rate, 0.015);
        assert_approx(params.inflation_rate, 0.02);
        assert_eq!(params.years, 35);
    }

    #[test]
    fn build_params_clamps_horizon() {
        let mut cli = sample_cli();
        cli.starting_age = 65;
        assert_eq!(build_params(&cli).expect("valid").years, 5);

        cli.starting_age = 18;
        assert_eq!(build_params(&cli).expect("valid").years, 45);

        cli.starting_age = 70;
        assert_eq!(build_params(&cli).expect("valid").years, 5);

        cli.years = Some(60);
        assert_eq!(build_params(&cli).expect("valid").years, 45);
    }

    #[test]
    fn build_params_rejects_non_positive_salary() {
        let mut cli = sample_cli();
        cli.starting_salary = 0.0;
        assert_eq!(build_params(&cli).unwrap_err(), ParamsError::StartingSalary);
    }

    #[test]
    fn build_params_rejects_negative_extra_savings() {
        let mut cli = sample_cli();
        cli.extra_savings_monthly = -1.0;
        assert_eq!(build_params(&cli).unwrap_err(), ParamsError::ExtraSavings);
    }

    #[test]
    fn build_params_rejects_out_of_range_percentage() {
        let mut cli = sample_cli();
        cli.employee_pct = 120.0;
        let err = build_params(&cli).expect_err("must reject > 100%");
        assert!(err.to_string().contains("--employee-pct"));
    }

    #[test]
    fn build_params_rejects_total_deflation() {
        let mut cli = sample_cli();
        cli.inflation_rate = -100.0;
        let err = build_params(&cli).expect_err("must reject <= -100 inflation");
        assert!(err.to_string().contains("--inflation-rate"));
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "startingSalary": 48000,
          "startingAge": 40,
          "salaryGrowth": 3,
          "employerPct": 12,
          "employeePct": 6,
          "extraSavingsMonthly": 150,
          "franchise": 18000,
          "franchiseGrowth": 2,
          "inflation": 2.5,
          "aowMonthly": 1500,
          "realMode": false
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let params = request.params;

        assert_approx(params.starting_salary, 48_000.0);
        assert_eq!(params.starting_age, 40);
        assert_eq!(params.years, 27);
        assert_approx(params.salary_growth_rate, 0.03);
        assert_approx(params.employer_pct, 0.12);
        assert_approx(params.employee_pct, 0.06);
        assert_approx(params.extra_savings_monthly, 150.0);
        assert_approx(params.franchise, 18_000.0);
        assert_approx(params.franchise_growth_rate, 0.02);
        assert_approx(params.inflation_rate, 0.025);
        assert_approx(params.aow_monthly, 1_500.0);
        assert!(!request.real_mode);
    }

    #[test]
    fn api_request_explicit_years_override_ages() {
        let request = api_request_from_json(r#"{"startingAge": 30, "years": 10}"#)
            .expect("json should parse");
        assert_eq!(request.params.years, 10);
        assert!(request.real_mode);
    }

    #[test]
    fn api_request_surfaces_validation_errors() {
        let err = api_request_from_json(r#"{"employerPct": -5}"#).expect_err("must reject");
        assert!(err.contains("--employer-pct"));

        let err = api_request_from_json(r#"{"startingSalary": "lots"}"#).expect_err("must reject");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn simulate_response_serialization_contains_expected_fields() {
        let params = build_params(&sample_cli()).expect("valid params");
        let response = build_simulate_response(params, true);
        assert_eq!(response.results.len(), 35);
        assert_eq!(response.scenarios.len(), 3);
        assert!(response.income_comparison.is_some());

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"results\""));
        assert!(json.contains("\"scenarios\""));
        assert!(json.contains("\"incomeComparison\""));
        assert!(json.contains("\"replacementRatio\""));
        assert!(json.contains("\"capitalNormalThird\""));
        assert!(json.contains("\"startingSalary\""));
        assert!(json.contains("\"scenario\":\"normal\""));
    }

    #[test]
    fn run_report_parses_flags() {
        let json = run_report([
            "pensioen",
            "--starting-salary",
            "50000",
            "--years",
            "12",
            "--extra-savings-monthly",
            "200",
        ])
        .expect("report should render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["years"], 12);
        assert_eq!(value["results"].as_array().map(Vec::len), Some(12));
        assert_eq!(value["realMode"], false);
        assert_eq!(value["results"][0]["capitalNormalThird"], 2_400.0);
    }

    #[test]
    fn run_report_rejects_bad_flags() {
        let err = run_report(["pensioen", "--employee-pct", "101"]).expect_err("must reject");
        assert!(matches!(err, ReportError::Params(ParamsError::Percentage(_))));

        let err = run_report(["pensioen", "--no-such-flag"]).expect_err("must reject");
        assert!(matches!(err, ReportError::Args(_)));
    }
}
