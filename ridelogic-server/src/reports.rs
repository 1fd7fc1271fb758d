//! Crowd-sourced service status reports.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User id recorded when a report does not name one.
pub const ANONYMOUS_USER: &str = "anon";

/// Errors from report submission or lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// A required field was absent or empty
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The backing store cannot be used
    #[error("report store unavailable")]
    StoreUnavailable,
}

/// Where the reporter was when they submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportLocation {
    pub lat: f64,
    pub lng: f64,
    /// Accuracy radius in metres, as reported by the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// A report as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub route_id: Option<String>,
    pub stop: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub location: Option<ReportLocation>,
}

/// A stored report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdReport {
    pub route_id: String,
    pub stop: String,
    /// Free text such as "full", "late" or "on time".
    pub status: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub location: Option<ReportLocation>,
}

impl CrowdReport {
    /// Validate a submission and stamp it with `timestamp`.
    pub fn from_new(new: NewReport, timestamp: DateTime<Utc>) -> Result<Self, ReportError> {
        fn required(value: Option<String>, field: &'static str) -> Result<String, ReportError> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ReportError::MissingField(field))
        }

        Ok(Self {
            route_id: required(new.route_id, "routeId")?,
            stop: required(new.stop, "stop")?,
            status: required(new.status, "status")?,
            user_id: new
                .user_id
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| ANONYMOUS_USER.to_string()),
            timestamp,
            location: new.location,
        })
    }

    /// Whether this report passes the optional route and stop filters.
    ///
    /// The route must match exactly; the stop is compared ignoring case.
    /// Empty filters match everything.
    pub fn matches(&self, route_id: Option<&str>, stop: Option<&str>) -> bool {
        let route_ok = route_id
            .filter(|r| !r.is_empty())
            .is_none_or(|r| self.route_id == r);
        let stop_ok = stop
            .filter(|s| !s.is_empty())
            .is_none_or(|s| self.stop.to_lowercase() == s.to_lowercase());
        route_ok && stop_ok
    }
}

/// Storage for crowd reports.
pub trait ReportStore: Send + Sync {
    fn submit(&self, report: CrowdReport) -> Result<(), ReportError>;

    /// Reports passing the filters, oldest first.
    fn query(
        &self,
        route_id: Option<&str>,
        stop: Option<&str>,
    ) -> Result<Vec<CrowdReport>, ReportError>;
}

/// Process-local report store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<CrowdReport>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn submit(&self, report: CrowdReport) -> Result<(), ReportError> {
        let mut reports = self
            .reports
            .write()
            .map_err(|_| ReportError::StoreUnavailable)?;
        tracing::debug!(route = %report.route_id, stop = %report.stop, "Crowd report stored");
        reports.push(report);
        Ok(())
    }

    fn query(
        &self,
        route_id: Option<&str>,
        stop: Option<&str>,
    ) -> Result<Vec<CrowdReport>, ReportError> {
        let reports = self
            .reports
            .read()
            .map_err(|_| ReportError::StoreUnavailable)?;
        Ok(reports
            .iter()
            .filter(|r| r.matches(route_id, stop))
            .cloned()
            .collect())
    }
}
