use chrono::NaiveDate;

use crate::constants::{EXPORT_TASK_DATE_FORMAT, EXPORT_TASK_PREFIX};

/// Export task identifier shared by the Exporter and the Monitor:
/// `db-backup-<instance-id>-<YYYYMMDD>`.
pub fn export_task_identifier(db_instance_id: &str, date: NaiveDate) -> String {
    format!(
        "{EXPORT_TASK_PREFIX}-{db_instance_id}-{}",
        date.format(EXPORT_TASK_DATE_FORMAT)
    )
}
