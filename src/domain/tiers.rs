//! The static bandwidth-tier table.
//!
//! A tier is a small integer standing in for a literal bandwidth value. The
//! table is a policy artifact, not computed: tiers 1-10 share 1 Gbps of
//! reserved capacity, higher tiers step up to larger per-tier allocations,
//! topping out at the 10 Gbps line rate.

/// Number of bits per Gigabit - used to make 1Gb to 10Gb queues.
pub const BITS_PER_GBPS: u64 = 1_000_000_000;

/// Overall rate cap of the QoS object every queue ladder hangs under.
pub const MAX_LINE_RATE_BPS: u64 = 10 * BITS_PER_GBPS;

/// Per-tier reserved rate in Gbps. Index 0 is tier 1. Monotonically
/// non-decreasing.
const TIER_RATES_GBPS: [u64; 27] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // tiers 1-10
    2, 2, 2, 2, 2, // tiers 11-15
    3, 3, 3, // tiers 16-18
    4, 4, // tiers 19-20
    5, 5, // tiers 21-22
    6, 7, 8, 9, 10, // tiers 23-27
];

/// Number of entries in the tier table, and therefore the number of queues
/// provisioned on every port.
pub const TIER_COUNT: u32 = TIER_RATES_GBPS.len() as u32;

/// A single rate-limiting queue as it will exist on a switch port.
/// Identity is the tier id; min and max are equal, so a tier gets exactly
/// its reserved rate and nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    pub queue_id: u32,
    pub min_rate_bps: u64,
    pub max_rate_bps: u64,
}

/// The reserved rate for a tier, or `None` for ids outside the table.
/// Tier 0 does not exist; the table starts at 1.
pub fn rate_for_tier(tier: u32) -> Option<u64> {
    if tier == 0 {
        return None;
    }
    TIER_RATES_GBPS.get((tier - 1) as usize).map(|gbps| gbps * BITS_PER_GBPS)
}

/// The full queue ladder, one [`QueueConfig`] per tier, in tier order.
/// Every port on every switch gets this identical ladder.
pub fn queue_ladder() -> Vec<QueueConfig> {
    TIER_RATES_GBPS
        .iter()
        .enumerate()
        .map(|(index, gbps)| {
            let rate = gbps * BITS_PER_GBPS;
            QueueConfig { queue_id: index as u32 + 1, min_rate_bps: rate, max_rate_bps: rate }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_round_trips_through_the_queue_ladder() {
        let ladder = queue_ladder();
        assert_eq!(ladder.len(), TIER_COUNT as usize);

        for queue in &ladder {
            let rate = rate_for_tier(queue.queue_id).expect("ladder entries must be table entries");
            assert_eq!(queue.min_rate_bps, rate, "tier {} min rate", queue.queue_id);
            assert_eq!(queue.max_rate_bps, rate, "tier {} max rate", queue.queue_id);
        }
    }

    #[test]
    fn tier_rates_are_monotonically_non_decreasing() {
        let ladder = queue_ladder();
        for pair in ladder.windows(2) {
            assert!(pair[0].min_rate_bps <= pair[1].min_rate_bps, "tier {} must not shrink", pair[1].queue_id);
        }
    }

    #[test]
    fn boundary_tiers_map_to_the_documented_rates() {
        assert_eq!(rate_for_tier(1), Some(BITS_PER_GBPS));
        assert_eq!(rate_for_tier(10), Some(BITS_PER_GBPS));
        assert_eq!(rate_for_tier(11), Some(2 * BITS_PER_GBPS));
        assert_eq!(rate_for_tier(27), Some(10 * BITS_PER_GBPS));
    }

    #[test]
    fn out_of_table_tiers_have_no_rate() {
        assert_eq!(rate_for_tier(0), None);
        assert_eq!(rate_for_tier(28), None);
        assert_eq!(rate_for_tier(u32::MAX), None);
    }
}
