use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};

use arscheduler::client::ReservationClient;
use arscheduler::config::ControllerConfig;
use arscheduler::convergence::{ConvergencePoller, RestStateFetcher};
use arscheduler::domain::reservation::ReservationRequest;
use arscheduler::domain::validate;
use arscheduler::error::Result;
use arscheduler::logger;
use arscheduler::provision::command::OvsRunner;
use arscheduler::provision::provisioner::QueueProvisioner;

#[derive(Parser)]
#[command(
    name = "arscheduler",
    about = "Submit flow scheduling requests to the controller and provision bandwidth queues on the switches"
)]
struct Cli {
    /// IP address of the controller host
    #[arg(long, default_value = "127.0.0.1")]
    controller: String,

    /// Port of the controller's REST API
    #[arg(long, default_value_t = 8080)]
    rest_port: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a flow scheduling request and submit it to the controller
    Schedule {
        /// IP address of source host (e.g. 10.0.0.1)
        src_ip: String,
        /// MAC address of source host (e.g. 00:00:00:00:00:01)
        src_mac: String,
        /// IP address of destination host (e.g. 10.0.0.2)
        dst_ip: String,
        /// MAC address of destination host (e.g. 00:00:00:00:00:02)
        dst_mac: String,
        /// Requested bandwidth tier (e.g. 2)
        bandwidth: String,
        /// Start time in HH:mm format (e.g. 11:20 for 11:20 AM)
        start_time: String,
        /// Ending time in HH:mm format (e.g. 13:27 for 1:27 PM)
        end_time: String,
    },
    /// Discover the switch topology and build the queue ladder on every port
    BuildQueues,
    /// Block until the controller reports the expected number of network nodes
    AwaitState {
        /// Expected node count (hosts + switches)
        #[arg(long)]
        expected: usize,
        /// Initial poll interval in seconds
        #[arg(long, default_value_t = 3)]
        interval: u64,
        /// Give up after this many polls
        #[arg(long, default_value_t = 20)]
        max_attempts: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    let config =
        ControllerConfig { host: cli.controller, rest_port: cli.rest_port, ..ControllerConfig::default() };

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: ControllerConfig) -> Result<()> {
    match command {
        Command::Schedule { src_ip, src_mac, dst_ip, dst_mac, bandwidth, start_time, end_time } => {
            let request = ReservationRequest { src_ip, src_mac, dst_ip, dst_mac, bandwidth, start_time, end_time };

            let errors = validate::validate(&request);
            if !errors.is_empty() {
                // Reported in aggregate; the request is withheld but the
                // process still exits 0 (see DESIGN.md).
                for error in &errors {
                    println!("{}", error);
                }
                return Ok(());
            }

            let client = ReservationClient::new(config);
            let decision = client.submit(&request).await?;
            println!("{}", decision);
            Ok(())
        }

        Command::BuildQueues => {
            let provisioner = QueueProvisioner::new(OvsRunner);

            let topology = provisioner.discover().await?;
            log::info!("Discovered {} switch(es), {} usable port(s)", topology.switch_count(), topology.port_count());

            let report = provisioner.provision(&topology).await?;
            println!(
                "Provisioned {} switch(es), skipped {} already-configured switch(es)",
                report.provisioned.len(),
                report.skipped.len()
            );
            Ok(())
        }

        Command::AwaitState { expected, interval, max_attempts } => {
            let fetcher = RestStateFetcher::new(config);
            let poller =
                ConvergencePoller::new(expected, Duration::from_secs(interval)).with_max_attempts(max_attempts);

            let polls = poller.await_convergence(&fetcher).await?;
            println!("Controller topology converged after {} poll(s)", polls);
            Ok(())
        }
    }
}
