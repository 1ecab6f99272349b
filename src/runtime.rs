//! Per-invocation wiring: settings, clients and the current date are built on
//! entry and dropped when the unit returns.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use chrono::{NaiveDate, Utc};
use tracing::Instrument;

use crate::config::{AwsEnvConfig, Config};
use crate::error::AppError;
use crate::exporter::{run_export, ExportOutcome};
use crate::monitor::{run_monitor, MonitorReport};
use crate::notify::{Dispatcher, SlackWebhook, SnsTopic};
use crate::platform::RdsPlatform;

pub async fn load_sdk_config(aws: &AwsEnvConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    // LocalStack 等兼容端点
    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}

/// Calendar date both units derive the export task identifier from.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

fn invocation_span(unit: &'static str) -> tracing::Span {
    tracing::info_span!("invocation", unit, invocation_id = %uuid::Uuid::new_v4())
}

pub async fn invoke_exporter(config: &Config) -> Result<ExportOutcome, AppError> {
    let settings = config.exporter_settings()?;

    async move {
        let sdk_config = load_sdk_config(&config.aws).await;
        let platform = RdsPlatform::new(&sdk_config);
        let outcome = run_export(&platform, &settings, today_utc()).await?;
        Ok::<_, AppError>(outcome)
    }
    .instrument(invocation_span("exporter"))
    .await
}

pub async fn invoke_monitor(config: &Config) -> Result<MonitorReport, AppError> {
    let settings = config.monitor_settings()?;

    async move {
        let sdk_config = load_sdk_config(&config.aws).await;
        let platform = RdsPlatform::new(&sdk_config);
        let topic = SnsTopic::new(&sdk_config, &settings.sns_topic_arn);
        let webhook = SlackWebhook::new(&settings.slack_url, settings.webhook_timeout_secs)?;
        let dispatcher = Dispatcher::new(&topic, &webhook, settings.chat.clone());

        let report = run_monitor(&platform, &dispatcher, &settings.db_instance_id, today_utc()).await?;
        Ok::<_, AppError>(report)
    }
    .instrument(invocation_span("monitor"))
    .await
}
