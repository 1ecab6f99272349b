use std::sync::Mutex;

use async_trait::async_trait;

use rds_export_notifier::error::{NotifyError, PlatformError};
use rds_export_notifier::notify::{AlertTopic, ChatPayload, ChatWebhook, WebhookResponse};
use rds_export_notifier::platform::{
    ExportRequest, ExportTask, SnapshotDescriptor, SnapshotPlatform,
};

/// In-memory platform recording every control-plane call.
#[derive(Default)]
pub struct FakePlatform {
    pub snapshots: Vec<SnapshotDescriptor>,
    /// Tasks known to `describe_export_task`.
    pub tasks: Mutex<Vec<ExportTask>>,
    pub fail_list: Option<String>,
    pub fail_start: Option<String>,
    pub fail_describe: Option<String>,
    pub listed: Mutex<Vec<String>>,
    pub started: Mutex<Vec<ExportRequest>>,
    pub described: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn with_snapshots(snapshots: Vec<SnapshotDescriptor>) -> Self {
        Self {
            snapshots,
            ..Default::default()
        }
    }

    pub fn with_task(task: ExportTask) -> Self {
        Self {
            tasks: Mutex::new(vec![task]),
            ..Default::default()
        }
    }

    pub fn started(&self) -> Vec<ExportRequest> {
        self.started.lock().expect("started lock").clone()
    }

    pub fn described(&self) -> Vec<String> {
        self.described.lock().expect("described lock").clone()
    }
}

#[async_trait]
impl SnapshotPlatform for FakePlatform {
    async fn list_automated_snapshots(
        &self,
        db_instance_id: &str,
    ) -> Result<Vec<SnapshotDescriptor>, PlatformError> {
        self.listed
            .lock()
            .expect("listed lock")
            .push(db_instance_id.to_string());
        if let Some(msg) = &self.fail_list {
            return Err(PlatformError::api("DescribeDBSnapshots", msg));
        }
        Ok(self.snapshots.clone())
    }

    async fn start_export_task(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportTask, PlatformError> {
        self.started
            .lock()
            .expect("started lock")
            .push(request.clone());
        if let Some(msg) = &self.fail_start {
            return Err(PlatformError::api("StartExportTask", msg));
        }
        let task = ExportTask {
            export_task_identifier: request.identifier.clone(),
            source_arn: Some(request.source_arn.clone()),
            status: "STARTING".to_string(),
            s3_bucket: Some(request.s3_bucket.clone()),
            iam_role_arn: Some(request.iam_role.clone()),
            kms_key_id: Some(request.kms_key.clone()),
            percent_progress: Some(0),
            ..Default::default()
        };
        self.tasks.lock().expect("tasks lock").push(task.clone());
        Ok(task)
    }

    async fn describe_export_task(&self, identifier: &str) -> Result<ExportTask, PlatformError> {
        self.described
            .lock()
            .expect("described lock")
            .push(identifier.to_string());
        if let Some(msg) = &self.fail_describe {
            return Err(PlatformError::api("DescribeExportTasks", msg));
        }
        self.tasks
            .lock()
            .expect("tasks lock")
            .iter()
            .find(|t| t.export_task_identifier == identifier)
            .cloned()
            .ok_or_else(|| PlatformError::ExportTaskNotFound {
                identifier: identifier.to_string(),
            })
    }
}

#[derive(Default)]
pub struct FakeTopic {
    pub fail: bool,
    pub published: Mutex<Vec<String>>,
}

impl FakeTopic {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn published(&self) -> Vec<String> {
        self.published.lock().expect("published lock").clone()
    }
}

#[async_trait]
impl AlertTopic for FakeTopic {
    async fn publish(&self, message: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Publish("topic unavailable".to_string()));
        }
        self.published
            .lock()
            .expect("published lock")
            .push(message.to_string());
        Ok(())
    }
}

pub struct FakeWebhook {
    pub status_code: u16,
    pub fail: bool,
    pub posted: Mutex<Vec<ChatPayload>>,
}

impl Default for FakeWebhook {
    fn default() -> Self {
        Self {
            status_code: 200,
            fail: false,
            posted: Mutex::new(Vec::new()),
        }
    }
}

impl FakeWebhook {
    pub fn replying(status_code: u16) -> Self {
        Self {
            status_code,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn posted(&self) -> Vec<ChatPayload> {
        self.posted.lock().expect("posted lock").clone()
    }
}

#[async_trait]
impl ChatWebhook for FakeWebhook {
    async fn post(&self, payload: &ChatPayload) -> Result<WebhookResponse, NotifyError> {
        if self.fail {
            return Err(NotifyError::Webhook("connection refused".to_string()));
        }
        self.posted
            .lock()
            .expect("posted lock")
            .push(payload.clone());
        let body = if self.status_code < 300 { "ok" } else { "invalid_payload" };
        Ok(WebhookResponse {
            status_code: self.status_code,
            body: body.to_string(),
        })
    }
}
