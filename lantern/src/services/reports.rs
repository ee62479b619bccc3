use std::sync::Arc;

use chrono::Utc;
use nanoid::nanoid;

use crate::db::SafetyBackend;
use crate::error::{LanternError, Result};
use crate::geo;
use crate::models::{ReportStatus, UserReportIncident};

/// Input for a new hazard report. Length limits are enforced at the API
/// boundary; the fields here are already trusted in shape.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Option<u8>,
}

#[derive(Clone)]
pub struct ReportService {
    db: Arc<dyn SafetyBackend>,
}

impl ReportService {
    pub fn new(db: Arc<dyn SafetyBackend>) -> Self {
        Self { db }
    }

    /// Reports go live immediately; there is no approval workflow.
    pub async fn create_report(
        &self,
        reporter_id: &str,
        report: NewReport,
    ) -> Result<UserReportIncident> {
        geo::validate_point(report.latitude, report.longitude)?;
        if let Some(severity) = report.severity {
            if severity > 100 {
                return Err(LanternError::InvalidArgument(format!(
                    "severity must be within [0, 100], got {severity}"
                )));
            }
        }
        self.db
            .get_user(reporter_id)
            .await?
            .ok_or_else(|| LanternError::NotFound(format!("User '{reporter_id}' not found")))?;

        let incident = UserReportIncident {
            id: nanoid!(),
            reporter_id: reporter_id.to_string(),
            title: report.title,
            description: report.description,
            category: report.category,
            latitude: report.latitude,
            longitude: report.longitude,
            severity: report.severity,
            status: ReportStatus::Active,
            created_at: Utc::now(),
        };
        self.db.create_report(&incident).await?;

        tracing::info!(
            report_id = %incident.id,
            reporter_id = reporter_id,
            category = %incident.category,
            "User report created"
        );
        Ok(incident)
    }
}
