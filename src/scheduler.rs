use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::Config;
use crate::runtime::{invoke_exporter, invoke_monitor};

/// Upper bound for a single unit invocation.
const INVOCATION_TIMEOUT: Duration = Duration::from_secs(300);

/// Drain period before scheduler shutdown to let in-flight invocations complete.
#[cfg(test)]
const DRAIN_TIMEOUT: Duration = Duration::from_millis(10);
#[cfg(not(test))]
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobName {
    SnapshotExport,
    ExportMonitor,
}

impl JobName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SnapshotExport => "snapshot_export",
            Self::ExportMonitor => "export_monitor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub name: JobName,
    pub cron: String,
    pub enabled: bool,
}

/// Triggers the Exporter and the Monitor on their own cron schedules.
pub struct UnitScheduler {
    config: Arc<Config>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl UnitScheduler {
    pub fn new(config: Arc<Config>, shutdown_rx: broadcast::Receiver<()>) -> Self {
        Self {
            config,
            shutdown_rx,
        }
    }

    /// Single source of truth for scheduled units.
    pub fn planned_jobs(&self) -> Vec<JobSpec> {
        if !self.config.schedule.enabled {
            return Vec::new();
        }

        vec![
            JobSpec {
                name: JobName::SnapshotExport,
                cron: self.config.schedule.export_cron.clone(),
                enabled: self.config.exporter_settings().is_ok(),
            },
            JobSpec {
                name: JobName::ExportMonitor,
                cron: self.config.schedule.monitor_cron.clone(),
                enabled: self.config.monitor_settings().is_ok(),
            },
        ]
    }

    /// Run until a shutdown signal arrives.
    pub async fn start(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.config.schedule.enabled {
            tracing::info!("Scheduler disabled; nothing to run");
            return Ok(());
        }

        let mut scheduler = JobScheduler::new().await?;

        self.register_jobs(&scheduler).await;

        scheduler.start().await?;

        tracing::info!("Scheduler started");
        let _ = self.shutdown_rx.recv().await;

        tracing::info!(
            "Scheduler shutting down, draining for {}s",
            DRAIN_TIMEOUT.as_secs()
        );
        tokio::time::sleep(DRAIN_TIMEOUT).await;
        let _ = scheduler.shutdown().await;
        Ok(())
    }

    async fn register_jobs(&self, scheduler: &JobScheduler) {
        for spec in &self.planned_jobs() {
            let name_str = spec.name.as_str();
            if !spec.enabled {
                tracing::warn!(name = name_str, "Skipping job: required settings missing");
                continue;
            }

            let config = self.config.clone();

            match spec.name {
                JobName::SnapshotExport => {
                    add_job(scheduler, &spec.cron, name_str, move || {
                        let config = config.clone();
                        async move {
                            match invoke_exporter(&config).await {
                                Ok(outcome) => match outcome.response_text() {
                                    Ok(text) => tracing::info!(response = %text, "Exporter finished"),
                                    Err(e) => tracing::error!(error = %e, "Failed to render exporter response"),
                                },
                                Err(e) => tracing::error!(error = %e, "Exporter failed"),
                            }
                        }
                    })
                    .await;
                }
                JobName::ExportMonitor => {
                    add_job(scheduler, &spec.cron, name_str, move || {
                        let config = config.clone();
                        async move {
                            match invoke_monitor(&config).await {
                                Ok(report) => tracing::info!(
                                    status = %report.export_task_status,
                                    "Monitor finished"
                                ),
                                Err(e) => tracing::error!(error = %e, "Monitor failed"),
                            }
                        }
                    })
                    .await;
                }
            }
            tracing::info!(name = name_str, cron = %spec.cron, "Registered job");
        }
    }
}

/// Add a job to the scheduler with an overlap guard and timeout wrapper.
async fn add_job<Fut, F>(scheduler: &JobScheduler, cron: &str, name: &'static str, mut run: F)
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let running = Arc::new(AtomicBool::new(false));

    let job = Job::new_async(cron, move |_uuid, _lock| {
        let guard = running.clone();

        if guard
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!(
                job = name,
                "Skipping invocation: previous run still in progress"
            );
            return Box::pin(async {});
        }

        let fut = run();
        Box::pin(async move {
            if tokio::time::timeout(INVOCATION_TIMEOUT, fut).await.is_err() {
                tracing::error!(
                    job = name,
                    timeout_secs = INVOCATION_TIMEOUT.as_secs(),
                    "Invocation timed out"
                );
            }
            guard.store(false, Ordering::SeqCst);
        })
    });

    match job {
        Ok(job) => {
            if let Err(err) = scheduler.add(job).await {
                tracing::error!(error = %err, cron, job = name, "Failed to add job");
            }
        }
        Err(err) => tracing::error!(error = %err, cron, job = name, "Failed to create job"),
    }
}
