/// A flow scheduling request: a bandwidth reservation between two endpoints
/// over a time window, as the user hands it in.
///
/// All fields are kept as the raw strings the caller supplied. The controller
/// expects string-valued fields on the wire, and validation
/// ([`validate`](crate::domain::validate::validate)) operates on the textual
/// form. Nothing here is interpreted beyond the format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// IP address of the source host (e.g. 10.0.0.1).
    pub src_ip: String,
    /// MAC address of the source host (e.g. 00:00:00:00:00:01).
    pub src_mac: String,
    /// IP address of the destination host (e.g. 10.0.0.2).
    pub dst_ip: String,
    /// MAC address of the destination host (e.g. 00:00:00:00:00:02).
    pub dst_mac: String,
    /// Requested bandwidth tier, an index into the queue table (e.g. 2).
    pub bandwidth: String,
    /// Start of the reservation window, HH:mm (e.g. 11:20).
    pub start_time: String,
    /// End of the reservation window, HH:mm (e.g. 13:27).
    ///
    /// Whether the window may wrap past midnight is decided by the
    /// controller; no ordering against `start_time` is enforced here.
    pub end_time: String,
}
