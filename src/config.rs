/// Connection coordinates of the Floodlight controller.
///
/// Passed explicitly to every component that talks to the controller, so
/// several controller targets can coexist in one process (and in tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// IP address or hostname of the controller.
    pub host: String,
    /// Port of the controller's REST API.
    pub rest_port: u16,
    /// OpenFlow listening port of the controller. Not used by the REST
    /// client itself; carried for callers that wire up switches.
    pub openflow_port: u16,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig { host: "127.0.0.1".to_string(), rest_port: 8080, openflow_port: 6653 }
    }
}

impl ControllerConfig {
    /// URL of the flow-scheduling endpoint.
    pub fn schedule_url(&self) -> String {
        format!("http://{}:{}/wm/arscheduler/schedule/json", self.host, self.rest_port)
    }

    /// URL of the topology-state endpoint.
    pub fn state_url(&self) -> String {
        format!("http://{}:{}/wm/arscheduler/state/json", self.host, self.rest_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_follow_the_controller_module_layout() {
        let config = ControllerConfig { host: "192.168.1.10".to_string(), rest_port: 8081, openflow_port: 6653 };

        assert_eq!(config.schedule_url(), "http://192.168.1.10:8081/wm/arscheduler/schedule/json");
        assert_eq!(config.state_url(), "http://192.168.1.10:8081/wm/arscheduler/state/json");
    }

    #[test]
    fn default_config_targets_the_local_controller() {
        let config = ControllerConfig::default();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.rest_port, 8080);
        assert_eq!(config.openflow_port, 6653);
    }
}
