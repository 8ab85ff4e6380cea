use super::Liveness;
use crate::{Error, Result, api::PredictionService, config::HealthConfig};
use chrono::{DateTime, Local};
use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// No check has resolved yet.
    Unknown,
    Online,
    Offline,
}

/// What the indicator dot should look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Pending,
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    /// A check is in flight. Takes precedence over `status` for display.
    pub checking: bool,
    pub last_checked: Option<DateTime<Local>>,
}

impl HealthSnapshot {
    fn starting() -> Self {
        Self {
            status: HealthStatus::Unknown,
            checking: true,
            last_checked: None,
        }
    }

    pub fn indicator(&self) -> Indicator {
        match (self.checking, self.status) {
            (true, _) | (false, HealthStatus::Unknown) => Indicator::Pending,
            (false, HealthStatus::Online) => Indicator::Online,
            (false, HealthStatus::Offline) => Indicator::Offline,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.checking {
            return "Checking...";
        }
        match self.status {
            HealthStatus::Unknown => "Unknown",
            HealthStatus::Online => "API Online",
            HealthStatus::Offline => "API Offline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for HealthSettings {
    fn default() -> Self {
        Self::from(&HealthConfig::default())
    }
}

impl From<&HealthConfig> for HealthSettings {
    fn from(config: &HealthConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
        }
    }
}

/// Repeating liveness probe against `/health`.
///
/// The first check is issued as soon as the monitor starts, then once per
/// interval until [`HealthMonitor::stop`] is called or the monitor is dropped.
/// Checks run one after another inside a single task.
pub struct HealthMonitor {
    snapshot: watch::Receiver<HealthSnapshot>,
    task: Option<JoinHandle<()>>,
    liveness: Liveness,
}

impl HealthMonitor {
    pub fn start(service: Arc<dyn PredictionService>, settings: HealthSettings) -> Self {
        let (tx, rx) = watch::channel(HealthSnapshot::starting());
        let liveness = Liveness::new();

        info!(
            "Starting health monitor (interval {:?}, timeout {:?})",
            settings.interval, settings.timeout
        );
        let task = tokio::spawn(poll_health(service, settings, tx, liveness.clone()));

        Self {
            snapshot: rx,
            task: Some(task),
            liveness,
        }
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
        self.snapshot.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Cancels the repeating check. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        self.liveness.teardown();
        task.abort();
        info!("Health monitor stopped");
        true
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_health(
    service: Arc<dyn PredictionService>,
    settings: HealthSettings,
    tx: watch::Sender<HealthSnapshot>,
    liveness: Liveness,
) {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if !liveness.is_alive() {
            break;
        }

        tx.send_modify(|snapshot| snapshot.checking = true);
        let status = check_once(service.as_ref(), settings.timeout).await;

        if !liveness.is_alive() {
            debug!("Discarding health result after teardown");
            break;
        }

        tx.send_modify(|snapshot| {
            if snapshot.status != status {
                match status {
                    HealthStatus::Offline => warn!("Prediction service is offline"),
                    _ => info!("Prediction service is online"),
                }
            }
            snapshot.status = status;
            snapshot.checking = false;
            snapshot.last_checked = Some(Local::now());
        });
    }
}

/// One bounded probe of `/health`. Exceeding `timeout` is an error.
pub async fn probe(service: &dyn PredictionService, timeout: Duration) -> Result<()> {
    tokio::time::timeout(timeout, service.health())
        .await
        .map_err(|_| Error::timeout("/health", timeout))?
}

/// Every failure mode maps to `Offline`.
pub async fn check_once(service: &dyn PredictionService, timeout: Duration) -> HealthStatus {
    match probe(service, timeout).await {
        Ok(()) => HealthStatus::Online,
        Err(e) => {
            debug!(error = %e, "Health check failed");
            HealthStatus::Offline
        }
    }
}
