use crate::error::Result;
use crate::types::TimetableResponse;

/// Full JSON report of the response
pub fn generate_json_report(response: &TimetableResponse) -> Result<String> {
    Ok(serde_json::to_string_pretty(response)?)
}

/// Summary statistics as JSON
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub total_required: u32,
    pub total_scheduled: u32,
    pub success_rate: f64,
    pub satisfied: bool,
    pub solve_time_ms: u64,
}

pub fn generate_json_summary(response: &TimetableResponse) -> Result<String> {
    let summary = JsonSummary {
        total_required: response.statistics.total_required,
        total_scheduled: response.statistics.total_scheduled,
        success_rate: response.statistics.success_rate,
        satisfied: response.is_satisfied(),
        solve_time_ms: response.metadata.solve_time_ms,
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
