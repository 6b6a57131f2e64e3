//! Syntactic validation of a [`ReservationRequest`].
//!
//! Every field is checked independently against a fixed format; the caller
//! always sees the full list of violations in one pass. An empty result
//! means the request may be submitted.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::reservation::ReservationRequest;
use crate::domain::tiers::{self, TIER_COUNT};

lazy_static! {
    // Purely syntactic: four dot-separated groups of 1-3 digits, octet
    // values are not range-checked.
    static ref IPV4_FORMAT: Regex = Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}$").expect("static pattern");
    // Decimal digits only; hexadecimal MAC addresses are rejected. Matches
    // the controller's documented input format (DESIGN.md, open questions).
    static ref MAC_FORMAT: Regex = Regex::new(r"^\d{2}:\d{2}:\d{2}:\d{2}:\d{2}:\d{2}$").expect("static pattern");
    static ref TIME_FORMAT: Regex = Regex::new(r"^\d{2}:\d{2}$").expect("static pattern");
    static ref BANDWIDTH_FORMAT: Regex = Regex::new(r"^\d{1,10}$").expect("static pattern");
}

/// A single violated field, carrying enough to print the user-facing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field does not match its expected textual format.
    Format { field: &'static str, example: &'static str },
    /// The bandwidth field is well-formed but names a tier with no entry in
    /// the queue table, so no switch queue could ever serve it.
    TierOutOfTable { field: &'static str, tier: u64 },
}

impl FieldError {
    /// Name of the violated field.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Format { field, .. } => field,
            FieldError::TierOutOfTable { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Format { field, example } => {
                write!(f, "Error: {} does not match format e.g. {}", field, example)
            }
            FieldError::TierOutOfTable { field, tier } => {
                write!(f, "Error: {} tier {} has no queue table entry (valid tiers are 1-{})", field, tier, TIER_COUNT)
            }
        }
    }
}

/// Checks all seven fields of `request` and returns every violation found.
/// Never short-circuits; an empty list means the request is submittable.
pub fn validate(request: &ReservationRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !IPV4_FORMAT.is_match(&request.src_ip) {
        errors.push(FieldError::Format { field: "Source IP", example: "10.0.0.1" });
    }
    if !MAC_FORMAT.is_match(&request.src_mac) {
        errors.push(FieldError::Format { field: "Source MAC", example: "00:00:00:00:00:01" });
    }
    if !IPV4_FORMAT.is_match(&request.dst_ip) {
        errors.push(FieldError::Format { field: "Destination IP", example: "10.0.0.2" });
    }
    if !MAC_FORMAT.is_match(&request.dst_mac) {
        errors.push(FieldError::Format { field: "Destination MAC", example: "00:00:00:00:00:02" });
    }
    errors.extend(check_bandwidth(&request.bandwidth));
    if !TIME_FORMAT.is_match(&request.start_time) {
        errors.push(FieldError::Format { field: "Start Time", example: "11:20" });
    }
    if !TIME_FORMAT.is_match(&request.end_time) {
        errors.push(FieldError::Format { field: "End Time", example: "13:27" });
    }

    errors
}

/// The bandwidth field must be an unsigned decimal number *and* name an
/// existing tier; a tier outside the table would silently never be served
/// by any provisioned queue, so it is rejected here instead.
fn check_bandwidth(bandwidth: &str) -> Option<FieldError> {
    const FIELD: &str = "Bandwidth";

    if !BANDWIDTH_FORMAT.is_match(bandwidth) {
        return Some(FieldError::Format { field: FIELD, example: "2" });
    }

    // 10 digits fit in a u64; the regex already capped the length.
    let tier: u64 = match bandwidth.parse() {
        Ok(tier) => tier,
        Err(_) => return Some(FieldError::Format { field: FIELD, example: "2" }),
    };

    match u32::try_from(tier).ok().and_then(tiers::rate_for_tier) {
        Some(_) => None,
        None => Some(FieldError::TierOutOfTable { field: FIELD, tier }),
    }
}
