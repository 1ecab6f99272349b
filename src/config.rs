use std::env;
use std::str::FromStr;

use std::fmt;

use crate::constants::{
    DEFAULT_CHAT_CHANNEL, DEFAULT_CHAT_USERNAME, DEFAULT_EXPORT_CRON, DEFAULT_MONITOR_CRON,
    DEFAULT_WEBHOOK_TIMEOUT_SECS,
};
use crate::error::ConfigError;

#[derive(Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub db_instance_id: Option<String>,
    pub export: ExportEnvConfig,
    pub notify: NotifyEnvConfig,
    pub aws: AwsEnvConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Default)]
pub struct ExportEnvConfig {
    pub s3_bucket: Option<String>,
    pub iam_role: Option<String>,
    pub kms_key: Option<String>,
    pub s3_prefix: Option<String>,
}

#[derive(Clone)]
pub struct NotifyEnvConfig {
    pub slack_url: Option<String>,
    pub sns_topic_arn: Option<String>,
    pub chat: ChatSettings,
    pub webhook_timeout_secs: u64,
}

#[derive(Debug, Clone, Default)]
pub struct AwsEnvConfig {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub export_cron: String,
    pub monitor_cron: String,
}

/// Fixed presentation of the chat notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHAT_CHANNEL.to_string(),
            username: DEFAULT_CHAT_USERNAME.to_string(),
            icon_emoji: String::new(),
        }
    }
}

/// Everything the Exporter needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterSettings {
    pub db_instance_id: String,
    pub s3_bucket: String,
    pub iam_role: String,
    pub kms_key: String,
    pub s3_prefix: Option<String>,
}

/// Everything the Monitor needs, validated.
#[derive(Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    pub db_instance_id: String,
    pub slack_url: String,
    pub sns_topic_arn: String,
    pub chat: ChatSettings,
    pub webhook_timeout_secs: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("enable_file_logs", &self.enable_file_logs)
            .field("log_dir", &self.log_dir)
            .field("db_instance_id", &self.db_instance_id)
            .field("export", &self.export)
            .field("notify", &self.notify)
            .field("aws", &self.aws)
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl fmt::Debug for NotifyEnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyEnvConfig")
            .field("slack_url", &self.slack_url.as_ref().map(|_| "***REDACTED***"))
            .field("sns_topic_arn", &self.sns_topic_arn)
            .field("chat", &self.chat)
            .field("webhook_timeout_secs", &self.webhook_timeout_secs)
            .finish()
    }
}

impl fmt::Debug for MonitorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorSettings")
            .field("db_instance_id", &self.db_instance_id)
            .field("slack_url", &"***REDACTED***")
            .field("sns_topic_arn", &self.sns_topic_arn)
            .field("chat", &self.chat)
            .field("webhook_timeout_secs", &self.webhook_timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            db_instance_id: env_opt("DB_INSTANCE_ID"),
            export: ExportEnvConfig {
                s3_bucket: env_opt("S3_BUCKET"),
                iam_role: env_opt("IAM_ROLE"),
                kms_key: env_opt("KMS_KEY"),
                s3_prefix: env_opt("S3_PREFIX"),
            },
            notify: NotifyEnvConfig {
                slack_url: env_opt("SLACK_URL"),
                sns_topic_arn: env_opt("SNS_TOPIC_ARN"),
                chat: ChatSettings {
                    channel: env_or("SLACK_CHANNEL", DEFAULT_CHAT_CHANNEL),
                    username: env_or("SLACK_USERNAME", DEFAULT_CHAT_USERNAME),
                    icon_emoji: env_or("SLACK_ICON_EMOJI", ""),
                },
                webhook_timeout_secs: env_or_parse(
                    "WEBHOOK_TIMEOUT_SECS",
                    DEFAULT_WEBHOOK_TIMEOUT_SECS,
                ),
            },
            aws: AwsEnvConfig {
                region: env_opt("AWS_REGION"),
                endpoint_url: env_opt("AWS_ENDPOINT_URL"),
            },
            schedule: ScheduleConfig {
                enabled: env_or_bool("SCHEDULER_ENABLED", true),
                export_cron: env_or("EXPORT_CRON", DEFAULT_EXPORT_CRON),
                monitor_cron: env_or("MONITOR_CRON", DEFAULT_MONITOR_CRON),
            },
        }
    }

    pub fn exporter_settings(&self) -> Result<ExporterSettings, ConfigError> {
        Ok(ExporterSettings {
            db_instance_id: required(&self.db_instance_id, "DB_INSTANCE_ID")?,
            s3_bucket: required(&self.export.s3_bucket, "S3_BUCKET")?,
            iam_role: required(&self.export.iam_role, "IAM_ROLE")?,
            kms_key: required(&self.export.kms_key, "KMS_KEY")?,
            s3_prefix: self.export.s3_prefix.clone(),
        })
    }

    pub fn monitor_settings(&self) -> Result<MonitorSettings, ConfigError> {
        Ok(MonitorSettings {
            db_instance_id: required(&self.db_instance_id, "DB_INSTANCE_ID")?,
            slack_url: required(&self.notify.slack_url, "SLACK_URL")?,
            sns_topic_arn: required(&self.notify.sns_topic_arn, "SNS_TOPIC_ARN")?,
            chat: self.notify.chat.clone(),
            webhook_timeout_secs: self.notify.webhook_timeout_secs,
        })
    }
}

fn required(value: &Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value.clone().ok_or(ConfigError::Missing(key))
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Trimmed value, `None` when the key is unset or blank.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
