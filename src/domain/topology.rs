//! Switch/port topology discovery from an `ovs-vsctl show` dump.
//!
//! The dump is treated as a line-oriented grammar: a `Bridge <name>` line
//! opens a switch scope, and every `Port <name>` line attaches a port to the
//! enclosing switch. Names may be double-quoted. Anything else (Interface
//! lines, option maps, the database UUID header) is skipped.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::id::{PortId, SwitchId};

/// A structural defect in the configuration dump. Garbage input yields a
/// typed error instead of a garbage topology.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: port \"{port}\" appears outside of any bridge block")]
    OrphanPort { line: usize, port: String },

    #[error("line {line}: {keyword} entry is missing a name")]
    MissingName { line: usize, keyword: &'static str },
}

/// An immutable snapshot of the switch/port topology, rebuilt from scratch
/// on every discovery pass. Carries no identity across discoveries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    switches: Vec<SwitchId>,
    ports: BTreeMap<SwitchId, Vec<PortId>>,
}

impl Topology {
    /// Discovered switches, in dump order.
    pub fn switches(&self) -> &[SwitchId] {
        &self.switches
    }

    /// Usable ports of one switch, in dump order. Empty for unknown switches.
    pub fn ports_of(&self, switch: &SwitchId) -> &[PortId] {
        self.ports.get(switch).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn port_count(&self) -> usize {
        self.ports.values().map(Vec::len).sum()
    }
}

/// Parses the textual output of `ovs-vsctl show` into a [`Topology`].
///
/// The bridge-internal port (the port named identically to its bridge) is
/// excluded from the usable-port list; it never carries host traffic.
pub fn discover(dump: &str) -> Result<Topology, ParseError> {
    let mut switches: Vec<SwitchId> = Vec::new();
    let mut ports: BTreeMap<SwitchId, Vec<PortId>> = BTreeMap::new();
    let mut current: Option<SwitchId> = None;

    for (index, raw_line) in dump.lines().enumerate() {
        let line_number = index + 1;
        let mut words = raw_line.split_whitespace();

        match words.next() {
            Some("Bridge") => {
                let name = words.next().ok_or(ParseError::MissingName { line: line_number, keyword: "Bridge" })?;
                let switch = SwitchId::new(unquote(name));
                ports.entry(switch.clone()).or_default();
                switches.push(switch.clone());
                current = Some(switch);
            }
            Some("Port") => {
                let name = words.next().ok_or(ParseError::MissingName { line: line_number, keyword: "Port" })?;
                let name = unquote(name);
                match &current {
                    Some(switch) => {
                        // The internal port mirrors the bridge name.
                        if name != switch.as_str() {
                            ports.entry(switch.clone()).or_default().push(PortId::new(name));
                        }
                    }
                    None => {
                        return Err(ParseError::OrphanPort { line: line_number, port: name.to_string() });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(Topology { switches, ports })
}

fn unquote(token: &str) -> &str {
    token.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_internal_port_is_not_usable() {
        let dump = r#"
    Bridge "s1"
        Port "s1"
            Interface "s1"
                type: internal
        Port "s1-eth1"
            Interface "s1-eth1"
"#;
        let topology = discover(dump).expect("well-formed dump");

        let s1 = SwitchId::new("s1");
        assert_eq!(topology.ports_of(&s1), &[PortId::new("s1-eth1")]);
    }

    #[test]
    fn port_before_any_bridge_is_an_orphan() {
        let dump = "    Port \"s1-eth1\"\n    Bridge \"s1\"\n";

        let err = discover(dump).expect_err("orphan port must be rejected");
        assert_eq!(err, ParseError::OrphanPort { line: 1, port: "s1-eth1".to_string() });
    }

    #[test]
    fn bridge_without_a_name_is_rejected() {
        let err = discover("    Bridge\n").expect_err("nameless bridge must be rejected");
        assert_eq!(err, ParseError::MissingName { line: 1, keyword: "Bridge" });
    }
}
