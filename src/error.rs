#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

/// Failure talking to the database platform's control plane.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("export task {identifier} not found")]
    ExportTaskNotFound { identifier: String },
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
}

impl PlatformError {
    pub fn api(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Api {
            operation,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("topic publish failed: {0}")]
    Publish(String),
    #[error("webhook request failed: {0}")]
    Webhook(String),
    #[error("failed to encode chat payload: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("failed to serialize export task response: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Top-level failure of a unit invocation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_identifier() {
        let err = PlatformError::ExportTaskNotFound {
            identifier: "db-backup-orders-db-20240301".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "export task db-backup-orders-db-20240301 not found"
        );
    }

    #[test]
    fn monitor_error_is_transparent() {
        let err: MonitorError = PlatformError::api("DescribeExportTasks", "throttled").into();
        assert_eq!(err.to_string(), "DescribeExportTasks failed: throttled");
    }
}
