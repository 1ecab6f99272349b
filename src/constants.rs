/// 导出任务标识前缀，与 `{instance}-{YYYYMMDD}` 拼接
pub const EXPORT_TASK_PREFIX: &str = "db-backup";

/// 导出任务标识中的日期格式
pub const EXPORT_TASK_DATE_FORMAT: &str = "%Y%m%d";

/// Snapshot kind queried on the platform.
pub const AUTOMATED_SNAPSHOT_TYPE: &str = "automated";

pub const STATUS_STARTING: &str = "STARTING";
pub const STATUS_IN_PROGRESS: &str = "IN_PROGRESS";
pub const STATUS_COMPLETE: &str = "COMPLETE";

/// Exporter result when the instance has no eligible automated snapshot.
pub const EXPORT_NOT_STARTED_MESSAGE: &str =
    "Export task not started as no snapshots are available";

/// 默认 Slack 频道
pub const DEFAULT_CHAT_CHANNEL: &str = "#cloud-alerts";

/// 默认机器人名称（会被加上 `[OK]` / `[FAILED]` 前缀）
pub const DEFAULT_CHAT_USERNAME: &str = "DB-RDS-Backup";

pub const COLOR_OK: &str = "#00FF00";
pub const COLOR_FAILED: &str = "#FF0000";

/// Webhook 请求默认超时（秒）
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;

/// 每天 06:00 UTC 发起导出
pub const DEFAULT_EXPORT_CRON: &str = "0 0 6 * * *";

/// 导出发起后每 30 分钟检查一次（06:15 起至 23:45）。
/// Must not fire before the export: a missing task is reported as a failure.
pub const DEFAULT_MONITOR_CRON: &str = "0 15,45 6-23 * * *";
