//! Aggregate metric types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Overall risk badge for a row set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Health counts in five fixed bands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDistribution {
    /// below 40
    pub critical: usize,
    /// 40 up to 60
    pub poor: usize,
    /// 60 up to 80
    pub fair: usize,
    /// 80 up to 95
    pub good: usize,
    /// 95 and above
    pub excellent: usize,
}

impl HealthDistribution {
    pub(crate) fn record(&mut self, health: f64) {
        let band = match health {
            h if h < 40.0 => &mut self.critical,
            h if h < 60.0 => &mut self.poor,
            h if h < 80.0 => &mut self.fair,
            h if h < 95.0 => &mut self.good,
            _ => &mut self.excellent,
        };
        *band += 1;
    }

    pub fn total(&self) -> usize {
        self.critical + self.poor + self.fair + self.good + self.excellent
    }
}

/// Sum and mean over the numeric entries of one field
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub total: f64,
    pub average: f64,
}

impl NumericSummary {
    pub(crate) fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let total: f64 = values.iter().sum();
        Self {
            total,
            average: total / values.len() as f64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSummary {
    pub total: f64,
    pub average: f64,
    pub distribution: HealthDistribution,
}

/// Statistics over a filtered row set, recomputed from scratch each time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub count: usize,
    pub revenue: NumericSummary,
    pub health: HealthSummary,
    pub status_distribution: BTreeMap<String, usize>,
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub description: String,
}

impl Default for AggregateMetrics {
    fn default() -> Self {
        Self {
            count: 0,
            revenue: NumericSummary::default(),
            health: HealthSummary::default(),
            status_distribution: BTreeMap::new(),
            risk_level: RiskLevel::Low,
            risk_score: 0.0,
            description: super::EMPTY_DESCRIPTION.to_string(),
        }
    }
}
