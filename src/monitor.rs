//! Checks today's export task and reports its outcome.

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{STATUS_COMPLETE, STATUS_IN_PROGRESS, STATUS_STARTING};
use crate::error::MonitorError;
use crate::naming::export_task_identifier;
use crate::notify::{Dispatcher, Severity};
use crate::platform::SnapshotPlatform;

/// Classification of the platform-owned export status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Running,
    Complete,
    /// Any other value: failed, canceled, or unknown.
    Other,
}

impl ExportPhase {
    pub fn classify(status: &str) -> Self {
        match status {
            STATUS_STARTING | STATUS_IN_PROGRESS => Self::Running,
            STATUS_COMPLETE => Self::Complete,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorReport {
    pub export_task_status: String,
}

pub fn complete_message(identifier: &str) -> String {
    format!(
        "The RDS snapshot export task has completed successfully. Export Task Details: {identifier}"
    )
}

pub fn unexpected_status_message(status: &str, identifier: &str) -> String {
    format!("The RDS snapshot export task has status {status}. Export Task Details: {identifier}")
}

pub fn check_error_message(db_instance_id: &str, error: &MonitorError, identifier: &str) -> String {
    format!(
        "Error occurred while checking the RDS snapshot export task for DB instance {db_instance_id}. \
         Error message: {error}. Export Task Details: {identifier}"
    )
}

/// Classify today's export task and notify on terminal states.
///
/// Any error during the check (lookup, classification or the outcome
/// notification itself) is reported through a failure notification and then
/// returned unchanged. If that failure notification cannot be delivered the
/// secondary error is logged and the original error still wins.
pub async fn run_monitor(
    platform: &dyn SnapshotPlatform,
    dispatcher: &Dispatcher<'_>,
    db_instance_id: &str,
    today: NaiveDate,
) -> Result<MonitorReport, MonitorError> {
    let identifier = export_task_identifier(db_instance_id, today);

    match check_export(platform, dispatcher, &identifier).await {
        Ok(report) => Ok(report),
        Err(err) => {
            tracing::error!(export_task = %identifier, error = %err, "Export check failed");
            let message = check_error_message(db_instance_id, &err, &identifier);
            if let Err(notify_err) = dispatcher.dispatch(&message, Severity::Failed).await {
                tracing::error!(
                    export_task = %identifier,
                    error = %notify_err,
                    original_error = %err,
                    "Failed to deliver export check failure notification"
                );
            }
            Err(err)
        }
    }
}

async fn check_export(
    platform: &dyn SnapshotPlatform,
    dispatcher: &Dispatcher<'_>,
    identifier: &str,
) -> Result<MonitorReport, MonitorError> {
    let task = platform.describe_export_task(identifier).await?;
    let status = task.status;

    match ExportPhase::classify(&status) {
        ExportPhase::Running => {
            tracing::info!(export_task = identifier, status = %status, "Export still running");
        }
        ExportPhase::Complete => {
            tracing::info!(export_task = identifier, "Export complete");
            dispatcher
                .dispatch(&complete_message(identifier), Severity::Ok)
                .await?;
        }
        ExportPhase::Other => {
            tracing::warn!(export_task = identifier, status = %status, "Export ended with unexpected status");
            dispatcher
                .dispatch(&unexpected_status_message(&status, identifier), Severity::Failed)
                .await?;
        }
    }

    Ok(MonitorReport {
        export_task_status: status,
    })
}
