use tabled::Tabled;

use control::{StatsError, StatsResult};

#[derive(Tabled)]
pub struct SummaryTableEntry {
    state: String,
    users: u64,
    #[tabled(rename = "rps")]
    total_rps: String,
    #[tabled(rename = "fail ratio")]
    fail_ratio: String,
    #[tabled(rename = "p50 (ms)")]
    p50: String,
    #[tabled(rename = "p95 (ms)")]
    p95: String,
}

impl SummaryTableEntry {
    pub fn new(stats: &StatsResult) -> Self {
        SummaryTableEntry {
            state: stats.state.clone(),
            users: stats.user_count,
            total_rps: format!("{:.2}", stats.total_rps),
            fail_ratio: format!("{:.2}%", stats.fail_ratio * 100.0),
            p50: format_percentile(stats.p50()),
            p95: format_percentile(stats.p95()),
        }
    }
}

#[derive(Tabled)]
pub struct ErrorTableEntry {
    method: String,
    name: String,
    error: String,
    occurrences: u64,
}

impl From<&StatsError> for ErrorTableEntry {
    fn from(e: &StatsError) -> Self {
        ErrorTableEntry {
            method: e.method.clone(),
            name: e.name.clone(),
            error: e.error.clone(),
            occurrences: e.occurrences,
        }
    }
}

fn format_percentile(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v}"))
}

#[cfg(test)]
mod tests {
    use tabled::Table;

    use control::{StatsError, StatsResult};

    use super::{ErrorTableEntry, SummaryTableEntry};

    fn stats() -> StatsResult {
        StatsResult {
            state: "running".to_string(),
            user_count: 5,
            total_rps: 9.9,
            fail_ratio: 0.25,
            current_response_time_percentile_50: Some(11.0),
            current_response_time_percentile_95: None,
            errors: vec![StatsError {
                method: "GET".to_string(),
                name: "/login".to_string(),
                error: "HTTPError('500 Server Error')".to_string(),
                occurrences: 4,
            }],
            stats: vec![],
        }
    }

    #[test]
    fn test_summary_table() {
        let t = Table::new([SummaryTableEntry::new(&stats())]).to_string();
        assert!(t.contains("running"));
        assert!(t.contains("9.90"));
        assert!(t.contains("25.00%"));
        assert!(t.contains("p95 (ms)"));
    }

    #[test]
    fn test_error_table() {
        let stats = stats();
        let t = Table::new(stats.errors.iter().map(ErrorTableEntry::from)).to_string();
        assert!(t.contains("/login"));
        assert!(t.contains("occurrences"));
    }
}
