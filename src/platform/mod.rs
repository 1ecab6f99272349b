pub mod rds;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::PlatformError;
use crate::serialization::display_opt;

pub use rds::RdsPlatform;

/// Read-only view of a platform snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDescriptor {
    pub arn: String,
    /// `None` while the snapshot is still being created.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub identifier: String,
    pub source_arn: String,
    pub s3_bucket: String,
    pub iam_role: String,
    pub kms_key: String,
    pub s3_prefix: Option<String>,
}

/// Export task record as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportTask {
    pub export_task_identifier: String,
    pub source_arn: Option<String>,
    pub status: String,
    #[serde(serialize_with = "display_opt")]
    pub snapshot_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "display_opt")]
    pub task_start_time: Option<DateTime<Utc>>,
    #[serde(serialize_with = "display_opt")]
    pub task_end_time: Option<DateTime<Utc>>,
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
    pub iam_role_arn: Option<String>,
    pub kms_key_id: Option<String>,
    pub percent_progress: Option<i32>,
    #[serde(rename = "TotalExtractedDataInGB")]
    pub total_extracted_data_in_gb: Option<i32>,
    pub failure_cause: Option<String>,
    pub warning_message: Option<String>,
    pub source_type: Option<String>,
    /// Tables or schemas limited by the export; empty means the whole snapshot.
    pub export_only: Vec<String>,
}

/// Control-plane operations of the managed database platform.
#[async_trait]
pub trait SnapshotPlatform: Send + Sync {
    /// All automated snapshots of `db_instance_id`, in platform order.
    async fn list_automated_snapshots(
        &self,
        db_instance_id: &str,
    ) -> Result<Vec<SnapshotDescriptor>, PlatformError>;

    async fn start_export_task(&self, request: &ExportRequest)
        -> Result<ExportTask, PlatformError>;

    /// Fails with [`PlatformError::ExportTaskNotFound`] when no task has `identifier`.
    async fn describe_export_task(&self, identifier: &str) -> Result<ExportTask, PlatformError>;
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn export_task_serializes_with_platform_field_names() {
        let task = ExportTask {
            export_task_identifier: "db-backup-orders-db-20240301".to_string(),
            source_arn: Some("arn:aws:rds:eu-west-1:123456789012:snapshot:rds:orders-db-2024-03-01-03-00".to_string()),
            status: "STARTING".to_string(),
            task_start_time: Some(Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 5).unwrap()),
            s3_bucket: Some("backups".to_string()),
            percent_progress: Some(0),
            ..Default::default()
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["ExportTaskIdentifier"], "db-backup-orders-db-20240301");
        assert_eq!(json["Status"], "STARTING");
        assert_eq!(json["TaskStartTime"], "2024-03-01 06:00:05 UTC");
        assert!(json["TaskEndTime"].is_null());
        assert_eq!(json["S3Bucket"], "backups");
        assert!(json.get("TotalExtractedDataInGB").is_some());
    }
}
