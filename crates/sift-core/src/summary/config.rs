//! Summary configuration
//!
//! The risk weights and thresholds are heuristics, not domain law; hosts
//! tune them through config rather than code.

use serde::{Deserialize, Serialize};

/// Risk heuristic: `watch_weight × watch rows + low_health_weight × unhealthy rows`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Status value counted as "on watch" (compared case-insensitively)
    pub watch_status: String,
    pub watch_weight: f64,
    /// Health strictly below this counts as unhealthy
    pub low_health_below: f64,
    pub low_health_weight: f64,
    /// Score at or above which risk is critical
    pub critical_at: f64,
    pub high_at: f64,
    pub medium_at: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            watch_status: "watch".to_string(),
            watch_weight: 0.5,
            low_health_below: 40.0,
            low_health_weight: 0.3,
            critical_at: 2.0,
            high_at: 1.5,
            medium_at: 0.75,
        }
    }
}

/// Row fields read by the summarizer, plus the risk heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub revenue_field: String,
    pub health_field: String,
    pub status_field: String,
    pub risk: RiskConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            revenue_field: "revenue".to_string(),
            health_field: "health".to_string(),
            status_field: "status".to_string(),
            risk: RiskConfig::default(),
        }
    }
}
