//! REST client for the controller's flow-scheduling endpoint.

use crate::api::schedule_dto::ScheduleRequestDto;
use crate::config::ControllerConfig;
use crate::domain::reservation::ReservationRequest;
use crate::error::{Error, Result};

/// Submits validated reservation requests to the controller.
///
/// The caller must have run the request through
/// [`validate`](crate::domain::validate::validate) first; this layer does not
/// re-check formats. No retry is performed here either; a failed submission
/// surfaces as [`Error::ControllerUnreachable`] and the caller decides.
#[derive(Debug)]
pub struct ReservationClient {
    http: reqwest::Client,
    config: ControllerConfig,
}

impl ReservationClient {
    pub fn new(config: ControllerConfig) -> Self {
        ReservationClient { http: reqwest::Client::new(), config }
    }

    /// POSTs the request to `/wm/arscheduler/schedule/json` and returns the
    /// controller's decision payload.
    ///
    /// The payload is opaque here: admission is the controller's business
    /// logic, and whatever JSON it answers with is handed back verbatim.
    /// Transport failure or a non-JSON body both collapse into
    /// [`Error::ControllerUnreachable`].
    pub async fn submit(&self, request: &ReservationRequest) -> Result<serde_json::Value> {
        let dto = ScheduleRequestDto::from(request);
        let url = self.config.schedule_url();

        log::info!(
            "Submitting reservation {} -> {} (tier {}, {}-{}) to {}",
            request.src_ip,
            request.dst_ip,
            request.bandwidth,
            request.start_time,
            request.end_time,
            url
        );

        let response = self.http.post(&url).json(&dto).send().await.map_err(|e| {
            log::error!("Scheduling request to {} failed: {}", url, e);
            Error::ControllerUnreachable
        })?;

        let decision: serde_json::Value = response.json().await.map_err(|e| {
            log::error!("Controller at {} answered with a non-JSON body: {}", url, e);
            Error::ControllerUnreachable
        })?;

        log::info!("Controller decision: {}", decision);
        Ok(decision)
    }
}
