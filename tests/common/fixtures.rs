use chrono::{NaiveDate, TimeZone, Utc};

use rds_export_notifier::config::ExporterSettings;
use rds_export_notifier::platform::{ExportTask, SnapshotDescriptor};

pub const INSTANCE_ID: &str = "orders-db";

pub fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
}

pub fn snapshot_arn(stamp: &str) -> String {
    format!("arn:aws:rds:eu-west-1:123456789012:snapshot:rds:{INSTANCE_ID}-{stamp}")
}

/// Automated snapshot created on the export date at `hour:00` UTC.
pub fn snapshot_at(hour: u32) -> SnapshotDescriptor {
    SnapshotDescriptor {
        arn: snapshot_arn(&format!("2024-03-01-{hour:02}-00")),
        created_at: Some(
            Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
                .single()
                .expect("valid timestamp"),
        ),
    }
}

pub fn exporter_settings() -> ExporterSettings {
    ExporterSettings {
        db_instance_id: INSTANCE_ID.to_string(),
        s3_bucket: "orders-db-exports".to_string(),
        iam_role: "arn:aws:iam::123456789012:role/rds-s3-export".to_string(),
        kms_key: "arn:aws:kms:eu-west-1:123456789012:key/1234abcd".to_string(),
        s3_prefix: None,
    }
}

pub fn export_task(identifier: &str, status: &str) -> ExportTask {
    ExportTask {
        export_task_identifier: identifier.to_string(),
        source_arn: Some(snapshot_arn("2024-03-01-03-00")),
        status: status.to_string(),
        ..Default::default()
    }
}
