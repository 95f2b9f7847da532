//! Periodic relay liveness ping.
//!
//! Runs on its own scheduler, independent of all user-triggered flows. The
//! ping is fire-and-forget: the response body is ignored and failures are
//! only logged.

use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts a scheduler that pings `GET {relay}/api/heartbeat` on a
/// fixed interval.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process — dropping it stops the pings.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// job cannot be registered, or the scheduler fails to start.
pub async fn start_heartbeat(
    relay_base_url: String,
    interval: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let url = format!("{}/api/heartbeat", relay_base_url.trim_end_matches('/'));
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let url = url.clone();
        Box::pin(async move {
            match reqwest::get(&url).await {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "heartbeat ping");
                }
                Err(error) => {
                    tracing::debug!(%error, "heartbeat ping failed");
                }
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}
