use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rds::error::DisplayErrorContext;
use aws_sdk_rds::primitives::DateTime as SdkDateTime;
use aws_sdk_rds::Client;
use chrono::{DateTime, Utc};

use super::{ExportRequest, ExportTask, SnapshotDescriptor, SnapshotPlatform};
use crate::constants::AUTOMATED_SNAPSHOT_TYPE;
use crate::error::PlatformError;

/// [`SnapshotPlatform`] backed by the RDS control-plane API.
#[derive(Debug, Clone)]
pub struct RdsPlatform {
    client: Client,
}

impl RdsPlatform {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }
}

fn to_utc(ts: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts.secs(), ts.subsec_nanos())
}

// StartExportTaskOutput 与 types::ExportTask 字段一致但类型不同
macro_rules! export_task_from_sdk {
    ($src:expr) => {{
        let src = $src;
        ExportTask {
            export_task_identifier: src.export_task_identifier().unwrap_or_default().to_string(),
            source_arn: src.source_arn().map(str::to_string),
            status: src.status().unwrap_or_default().to_string(),
            snapshot_time: src.snapshot_time().and_then(to_utc),
            task_start_time: src.task_start_time().and_then(to_utc),
            task_end_time: src.task_end_time().and_then(to_utc),
            s3_bucket: src.s3_bucket().map(str::to_string),
            s3_prefix: src.s3_prefix().map(str::to_string),
            iam_role_arn: src.iam_role_arn().map(str::to_string),
            kms_key_id: src.kms_key_id().map(str::to_string),
            percent_progress: src.percent_progress(),
            total_extracted_data_in_gb: src.total_extracted_data_in_gb(),
            failure_cause: src.failure_cause().map(str::to_string),
            warning_message: src.warning_message().map(str::to_string),
            source_type: src.source_type().map(|t| t.as_str().to_string()),
            export_only: src.export_only().to_vec(),
        }
    }};
}

#[async_trait]
impl SnapshotPlatform for RdsPlatform {
    async fn list_automated_snapshots(
        &self,
        db_instance_id: &str,
    ) -> Result<Vec<SnapshotDescriptor>, PlatformError> {
        let mut snapshots = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_db_snapshots()
                .db_instance_identifier(db_instance_id)
                .snapshot_type(AUTOMATED_SNAPSHOT_TYPE)
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| PlatformError::api("DescribeDBSnapshots", DisplayErrorContext(e)))?;

            for snapshot in output.db_snapshots() {
                let Some(arn) = snapshot.db_snapshot_arn() else {
                    tracing::warn!(
                        snapshot = snapshot.db_snapshot_identifier().unwrap_or_default(),
                        "Snapshot without ARN, skipping"
                    );
                    continue;
                };
                snapshots.push(SnapshotDescriptor {
                    arn: arn.to_string(),
                    created_at: snapshot.snapshot_create_time().and_then(to_utc),
                });
            }

            match output.marker() {
                Some(next) if !next.is_empty() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        tracing::debug!(
            db_instance_id,
            count = snapshots.len(),
            "Listed automated snapshots"
        );
        Ok(snapshots)
    }

    async fn start_export_task(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportTask, PlatformError> {
        let output = self
            .client
            .start_export_task()
            .export_task_identifier(&request.identifier)
            .source_arn(&request.source_arn)
            .s3_bucket_name(&request.s3_bucket)
            .iam_role_arn(&request.iam_role)
            .kms_key_id(&request.kms_key)
            .set_s3_prefix(request.s3_prefix.clone())
            .send()
            .await
            .map_err(|e| PlatformError::api("StartExportTask", DisplayErrorContext(e)))?;

        Ok(export_task_from_sdk!(&output))
    }

    async fn describe_export_task(&self, identifier: &str) -> Result<ExportTask, PlatformError> {
        let not_found = || PlatformError::ExportTaskNotFound {
            identifier: identifier.to_string(),
        };

        let output = match self
            .client
            .describe_export_tasks()
            .export_task_identifier(identifier)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_export_task_not_found_fault())
                {
                    return Err(not_found());
                }
                return Err(PlatformError::api(
                    "DescribeExportTasks",
                    DisplayErrorContext(err),
                ));
            }
        };

        output
            .export_tasks()
            .first()
            .map(|task| export_task_from_sdk!(task))
            .ok_or_else(not_found)
    }
}
