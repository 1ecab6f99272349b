//! Starts today's export of the most recent automated snapshot.

use chrono::NaiveDate;

use crate::config::ExporterSettings;
use crate::constants::EXPORT_NOT_STARTED_MESSAGE;
use crate::error::{ExportError, PlatformError};
use crate::naming::export_task_identifier;
use crate::platform::{ExportRequest, ExportTask, SnapshotDescriptor, SnapshotPlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The instance had no eligible automated snapshot; nothing was requested.
    NotStarted,
    Started(ExportTask),
}

impl ExportOutcome {
    /// Text returned to the invoker: the not-started notice or the job-creation
    /// response as JSON.
    pub fn response_text(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::NotStarted => Ok(EXPORT_NOT_STARTED_MESSAGE.to_string()),
            Self::Started(task) => serde_json::to_string(task),
        }
    }
}

/// Newest snapshot by creation time. Snapshots still being created carry no
/// timestamp and are never picked.
pub fn select_latest_snapshot(snapshots: &[SnapshotDescriptor]) -> Option<&SnapshotDescriptor> {
    snapshots
        .iter()
        .filter(|s| s.created_at.is_some())
        .max_by_key(|s| s.created_at)
}

/// ARN of the newest automated snapshot of `db_instance_id`, `None` if there is none.
pub async fn latest_snapshot_arn(
    platform: &dyn SnapshotPlatform,
    db_instance_id: &str,
) -> Result<Option<String>, PlatformError> {
    let snapshots = platform.list_automated_snapshots(db_instance_id).await?;
    Ok(select_latest_snapshot(&snapshots).map(|s| s.arn.clone()))
}

pub async fn run_export(
    platform: &dyn SnapshotPlatform,
    settings: &ExporterSettings,
    today: NaiveDate,
) -> Result<ExportOutcome, ExportError> {
    let identifier = export_task_identifier(&settings.db_instance_id, today);

    let Some(source_arn) = latest_snapshot_arn(platform, &settings.db_instance_id).await? else {
        tracing::warn!(
            db_instance_id = %settings.db_instance_id,
            "No automated snapshot available, export not started"
        );
        return Ok(ExportOutcome::NotStarted);
    };

    let request = ExportRequest {
        identifier,
        source_arn,
        s3_bucket: settings.s3_bucket.clone(),
        iam_role: settings.iam_role.clone(),
        kms_key: settings.kms_key.clone(),
        s3_prefix: settings.s3_prefix.clone(),
    };
    tracing::info!(
        export_task = %request.identifier,
        source_arn = %request.source_arn,
        s3_bucket = %request.s3_bucket,
        "Starting snapshot export"
    );

    let task = platform.start_export_task(&request).await?;
    tracing::info!(
        export_task = %task.export_task_identifier,
        status = %task.status,
        "Export task created"
    );
    Ok(ExportOutcome::Started(task))
}
