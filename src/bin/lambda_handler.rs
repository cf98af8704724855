//! AWS Lambda handler for strategy comparisons
//!
//! Accepts loan parameters as a JSON body via a Lambda Function URL and returns
//! the comparison report: baseline, both strategies, and the summary table.
//!
//! Example body:
//! `{"principal": 300000, "annual_rate": 0.07, "term_months": 360, "overpayment": 500}`

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use aws_lambda_events::http::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use aws_lambda_events::http::HeaderMap;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::error;
use mortgage_overpayment::{ComparisonReport, LoanParameters, ScenarioRunner, SimulationError, StrategySummary};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Input for one calculation
#[derive(Debug, Deserialize)]
pub struct CalculationRequest {
    #[serde(flatten)]
    pub loan: LoanParameters,

    /// Include month-by-month schedules (default: true)
    #[serde(default = "default_include_schedules")]
    pub include_schedules: bool,
}

fn default_include_schedules() -> bool { true }

/// Output for one calculation
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub summaries: [StrategySummary; 3],
    pub report: ComparisonReport,
    pub execution_time_ms: u64,
}

fn response(status: i64, body: String) -> LambdaFunctionUrlResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    LambdaFunctionUrlResponse {
        status_code: status,
        headers,
        body: Some(body),
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status: i64, message: &str) -> LambdaFunctionUrlResponse {
    response(status, serde_json::json!({ "error": message }).to_string())
}

fn json_response(body: &CalculationResponse) -> Result<LambdaFunctionUrlResponse, Error> {
    Ok(response(200, serde_json::to_string(body)?))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = Instant::now();
    let payload = event.payload;

    if payload.is_base64_encoded {
        return Ok(error_response(400, "Binary bodies are not supported, send JSON text"));
    }

    let body = payload.body.unwrap_or_default();
    let request: CalculationRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let runner = ScenarioRunner::new();
    let mut report = match runner.run(&request.loan) {
        Ok(report) => report,
        Err(e @ SimulationError::InvalidParameter { .. }) => {
            return Ok(error_response(400, &e.to_string()));
        }
        Err(e) => {
            error!("calculation failed for {:?}: {}", request.loan, e);
            return Ok(error_response(500, &e.to_string()));
        }
    };

    let summaries = report.summaries();
    if !request.include_schedules {
        report.baseline.schedule.clear();
        report.shorten_term.schedule.clear();
        report.reduce_installment.schedule.clear();
    }

    let response = CalculationResponse {
        summaries,
        report,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_is_json() {
        let resp = error_response(400, "Invalid parameter principal: must be positive");
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(!resp.is_base64_encoded);

        let body: serde_json::Value = serde_json::from_str(resp.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["error"], "Invalid parameter principal: must be positive");
    }

    #[test]
    fn test_request_flattens_loan_parameters() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"principal": 300000, "annual_rate": 0.07, "term_months": 360, "overpayment": 500}"#,
        )
        .unwrap();
        assert_eq!(request.loan.term_months, 360);
        assert!(request.include_schedules);
    }
}
