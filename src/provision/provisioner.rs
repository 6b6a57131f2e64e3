//! Builds the bandwidth queue ladder on every port of every switch.
//!
//! Per switch, a single combined `ovs-vsctl` invocation points every port's
//! QoS reference at one new linux-htb QoS object capped at the 10 Gbps line
//! rate, and creates the 27-queue tier ladder under it. The ladder is
//! identical everywhere; only the port list is topology-shaped.

use std::collections::HashSet;

use crate::domain::id::{PortId, SwitchId};
use crate::domain::tiers::{self, MAX_LINE_RATE_BPS};
use crate::domain::topology::{self, Topology};
use crate::error::Result;
use crate::provision::command::CommandRunner;

/// external-ids key stamped on every QoS object we create. Makes
/// re-provisioning detectable: a switch whose marker already exists in the
/// QoS table is skipped instead of growing a duplicate ladder.
pub const QOS_MARKER_KEY: &str = "arsched-switch";

/// Per-run outcome, switch by switch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Switches that received a fresh QoS object and queue ladder.
    pub provisioned: Vec<SwitchId>,
    /// Switches whose marker was already present; left untouched.
    pub skipped: Vec<SwitchId>,
}

pub struct QueueProvisioner<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> QueueProvisioner<R> {
    pub fn new(runner: R) -> Self {
        QueueProvisioner { runner }
    }

    /// Hands the runner back, e.g. to inspect a recording mock.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Dumps the switch database and parses it into a [`Topology`] snapshot.
    pub async fn discover(&self) -> Result<Topology> {
        let dump = self.runner.run("ovs-vsctl", &["show".to_string()]).await?;
        Ok(topology::discover(&dump)?)
    }

    /// Applies the queue ladder to every port of every switch in `topology`.
    ///
    /// Aborts with [`PermissionDenied`](crate::error::Error::PermissionDenied)
    /// before any device mutation if the runner lacks privilege. Safe to
    /// re-run: already-marked switches are reported as skipped.
    pub async fn provision(&self, topology: &Topology) -> Result<ProvisionReport> {
        self.runner.check_privilege()?;

        let configured = self.configured_switches().await?;
        let mut report = ProvisionReport::default();

        for switch in topology.switches() {
            if configured.contains(switch.as_str()) {
                log::info!("Switch {} already carries its queue ladder, skipping", switch);
                report.skipped.push(switch.clone());
                continue;
            }

            let ports = topology.ports_of(switch);
            if ports.is_empty() {
                log::warn!("Switch {} has no usable ports, nothing to provision", switch);
                continue;
            }

            let args = build_switch_command(switch, ports);
            self.runner.run("ovs-vsctl", &args).await?;

            log::info!("Provisioned {} queue(s) on {} port(s) of switch {}", tiers::TIER_COUNT, ports.len(), switch);
            report.provisioned.push(switch.clone());
        }

        Ok(report)
    }

    /// Switch ids already carrying a marked QoS object.
    async fn configured_switches(&self) -> Result<HashSet<String>> {
        let listing = self
            .runner
            .run("ovs-vsctl", &["--bare".to_string(), "--columns=external_ids".to_string(), "list".to_string(), "qos".to_string()])
            .await?;

        Ok(parse_marked_switches(&listing))
    }
}

/// Extracts the switch ids stamped under [`QOS_MARKER_KEY`] from a bare
/// `external_ids` column listing. Lines look like `{arsched-switch=s1}` or
/// `arsched-switch=s1`, one record per line.
fn parse_marked_switches(listing: &str) -> HashSet<String> {
    listing
        .lines()
        .flat_map(|line| line.trim().trim_matches(|c| c == '{' || c == '}').split(','))
        .filter_map(|entry| entry.trim().split_once('='))
        .filter(|(key, _)| key.trim() == QOS_MARKER_KEY)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .collect()
}

/// The combined per-switch invocation: one `set port` clause per port, the
/// QoS object, then one `create queue` clause per tier.
pub fn build_switch_command(switch: &SwitchId, ports: &[PortId]) -> Vec<String> {
    let ladder = tiers::queue_ladder();
    let mut args: Vec<String> = Vec::new();

    for port in ports {
        args.push("--".to_string());
        args.push("set".to_string());
        args.push("port".to_string());
        args.push(port.as_str().to_string());
        args.push("qos=@defaultqos".to_string());
    }

    args.push("--".to_string());
    args.push("--id=@defaultqos".to_string());
    args.push("create".to_string());
    args.push("qos".to_string());
    args.push("type=linux-htb".to_string());
    args.push(format!("other-config:max-rate={}", MAX_LINE_RATE_BPS));
    args.push(format!("external-ids:{}={}", QOS_MARKER_KEY, switch));

    let queue_refs: Vec<String> = ladder.iter().map(|queue| format!("{}=@q{}", queue.queue_id, queue.queue_id)).collect();
    args.push(format!("queues={}", queue_refs.join(",")));

    for queue in &ladder {
        args.push("--".to_string());
        args.push(format!("--id=@q{}", queue.queue_id));
        args.push("create".to_string());
        args.push("queue".to_string());
        args.push(format!("other-config:min-rate={}", queue.min_rate_bps));
        args.push(format!("other-config:max-rate={}", queue.max_rate_bps));
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_parsing_handles_braced_and_bare_listings() {
        let listing = "{arsched-switch=s1}\n\n{other-key=x, arsched-switch=\"s2\"}\narsched-switch=s3\n{}\n";

        let marked = parse_marked_switches(listing);

        assert_eq!(marked.len(), 3);
        assert!(marked.contains("s1"));
        assert!(marked.contains("s2"));
        assert!(marked.contains("s3"));
    }

    #[test]
    fn marker_parsing_ignores_foreign_qos_records() {
        let marked = parse_marked_switches("{stamp=manual}\n{}\n");
        assert!(marked.is_empty());
    }
}
