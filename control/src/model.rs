use serde::Deserialize;

/// Answer to the swarm and stop calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionResult {
    pub message: String,
    pub success: bool,
}

/// Aggregated statistics of the running test.
///
/// The percentiles are `None` while the server has no samples yet. `stats`
/// holds the per endpoint rows untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatsResult {
    pub state: String,
    pub user_count: u64,
    pub total_rps: f64,
    pub fail_ratio: f64,
    #[serde(default)]
    pub current_response_time_percentile_50: Option<f64>,
    #[serde(default)]
    pub current_response_time_percentile_95: Option<f64>,
    #[serde(default)]
    pub errors: Vec<StatsError>,
    #[serde(default)]
    pub stats: Vec<serde_json::Value>,
}

impl StatsResult {
    pub fn is_running(&self) -> bool {
        self.state == "running"
    }

    pub fn p50(&self) -> Option<f64> {
        self.current_response_time_percentile_50
    }

    pub fn p95(&self) -> Option<f64> {
        self.current_response_time_percentile_95
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatsError {
    pub method: String,
    pub name: String,
    pub error: String,
    pub occurrences: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{
            "current_response_time_percentile_50": 11,
            "current_response_time_percentile_95": 22,
            "errors": [{"method": "GET", "name": "/", "error": "ConnectionError", "occurrences": 3, "origin": "x"}],
            "fail_ratio": 0.25,
            "state": "running",
            "stats": [{"name": "Aggregated"}],
            "total_rps": 9.9,
            "user_count": 5,
            "workers": []
        }"#;
        let stats: StatsResult = serde_json::from_str(body).expect("valid stats");
        assert!(stats.is_running());
        assert_eq!(stats.p50(), Some(11.0));
        assert_eq!(stats.p95(), Some(22.0));
        assert_eq!(stats.errors[0].occurrences, 3);
        assert_eq!(stats.errors[0].error, "ConnectionError");
        assert_eq!(stats.stats.len(), 1);
    }

    #[test]
    fn test_null_percentiles() {
        let body = r#"{
            "current_response_time_percentile_50": null,
            "current_response_time_percentile_95": null,
            "errors": [],
            "fail_ratio": 0,
            "state": "ready",
            "stats": [],
            "total_rps": 0,
            "user_count": 0
        }"#;
        let stats: StatsResult = serde_json::from_str(body).expect("valid stats");
        assert!(!stats.is_running());
        assert_eq!(stats.p50(), None);
        assert_eq!(stats.p95(), None);
    }

    #[test]
    fn test_missing_required_field() {
        let res = serde_json::from_str::<ActionResult>(r#"{"message": "ok"}"#);
        res.expect_err("success is required");
    }
}
