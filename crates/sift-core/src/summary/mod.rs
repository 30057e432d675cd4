//! Aggregate Summarizer
//!
//! Descriptive statistics over a (filtered) row set:
//!
//! - revenue total / average over the numeric entries of the revenue field
//! - health total / average and a five-band distribution
//! - per-status counts
//! - a risk badge from the weighted count of watch-listed and unhealthy rows
//!
//! Non-numeric entries are left out of both numerator and denominator.
//! An empty row set yields zeroed metrics with risk `low`.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sift_core::eval::JsonAccessor;
//! use sift_core::summary::{RiskLevel, Summarizer};
//!
//! let rows = vec![
//!     json!({"status": "watch", "health": 30, "revenue": 100}),
//!     json!({"status": "watch", "health": 35, "revenue": "n/a"}),
//! ];
//! let metrics = Summarizer::new(JsonAccessor::new()).summarize(&rows);
//! assert_eq!(metrics.count, 2);
//! assert_eq!(metrics.revenue.average, 100.0);
//! assert_eq!(metrics.risk_level, RiskLevel::High);
//! ```

mod config;
mod types;

pub use config::{RiskConfig, SummaryConfig};
pub use types::{AggregateMetrics, HealthDistribution, HealthSummary, NumericSummary, RiskLevel};

use crate::eval::compare::parse_number;
use crate::eval::RowAccessor;
use std::collections::BTreeMap;

pub(crate) const EMPTY_DESCRIPTION: &str = "No matching rows";

/// Computes [`AggregateMetrics`] through a host row accessor
#[derive(Debug, Clone)]
pub struct Summarizer<A> {
    accessor: A,
    config: SummaryConfig,
}

impl<A> Summarizer<A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            config: SummaryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SummaryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn summarize<'a, R, I>(&self, rows: I) -> AggregateMetrics
    where
        R: ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
        A: RowAccessor<R>,
    {
        let fields = &self.config;
        let risk = &fields.risk;

        let mut count = 0usize;
        let mut revenues = Vec::new();
        let mut healths = Vec::new();
        let mut distribution = HealthDistribution::default();
        let mut statuses: BTreeMap<String, usize> = BTreeMap::new();
        let mut watched = 0usize;
        let mut unhealthy = 0usize;

        for row in rows {
            count += 1;

            if let Some(revenue) = self.number(row, &fields.revenue_field) {
                revenues.push(revenue);
            }

            if let Some(health) = self.number(row, &fields.health_field) {
                healths.push(health);
                distribution.record(health);
                if health < risk.low_health_below {
                    unhealthy += 1;
                }
            }

            if let Some(status) = self.accessor.field(row, &fields.status_field) {
                let status = status.trim();
                if status.eq_ignore_ascii_case(&risk.watch_status) {
                    watched += 1;
                }
                *statuses.entry(status.to_string()).or_insert(0) += 1;
            }
        }

        if count == 0 {
            return AggregateMetrics::default();
        }

        let health = NumericSummary::from_values(&healths);
        let risk_score =
            watched as f64 * risk.watch_weight + unhealthy as f64 * risk.low_health_weight;
        let risk_level = classify_risk(risk_score, risk);

        AggregateMetrics {
            count,
            revenue: NumericSummary::from_values(&revenues),
            health: HealthSummary {
                total: health.total,
                average: health.average,
                distribution,
            },
            status_distribution: statuses,
            risk_level,
            risk_score,
            description: describe(count, health.average, risk_level),
        }
    }

    fn number<R: ?Sized>(&self, row: &R, field: &str) -> Option<f64>
    where
        A: RowAccessor<R>,
    {
        self.accessor
            .field(row, field)
            .and_then(|text| parse_number(&text))
    }
}

/// Map a risk score onto its badge
pub fn classify_risk(score: f64, config: &RiskConfig) -> RiskLevel {
    if score >= config.critical_at {
        RiskLevel::Critical
    } else if score >= config.high_at {
        RiskLevel::High
    } else if score >= config.medium_at {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn describe(count: usize, average_health: f64, risk: RiskLevel) -> String {
    let noun = if count == 1 { "row" } else { "rows" };
    format!("{count} {noun} · avg health {average_health:.1} · risk {risk}")
}
