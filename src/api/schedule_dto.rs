use serde::{Deserialize, Serialize};

use crate::domain::reservation::ReservationRequest;

/// Wire form of a flow scheduling request, exactly as the controller's
/// scheduling endpoint expects it: a flat object with string-valued fields
/// under these literal key names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequestDto {
    #[serde(rename = "srcIP")]
    pub src_ip: String,
    #[serde(rename = "srcMac")]
    pub src_mac: String,
    #[serde(rename = "dstIP")]
    pub dst_ip: String,
    #[serde(rename = "dstMac")]
    pub dst_mac: String,
    pub bandwidth: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

impl From<&ReservationRequest> for ScheduleRequestDto {
    fn from(request: &ReservationRequest) -> Self {
        ScheduleRequestDto {
            src_ip: request.src_ip.clone(),
            src_mac: request.src_mac.clone(),
            dst_ip: request.dst_ip.clone(),
            dst_mac: request.dst_mac.clone(),
            bandwidth: request.bandwidth.clone(),
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
        }
    }
}
