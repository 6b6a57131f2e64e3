//! Execution seam for the switch management interface.

use async_trait::async_trait;
use nix::unistd::Uid;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Runs `ovs-vsctl`-style commands. Provisioning goes through this trait so
/// tests can substitute a recording mock for the live switch database.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Whether the caller may mutate device state. The default is
    /// unconditional; runners that touch real devices override this.
    fn check_privilege(&self) -> Result<()> {
        Ok(())
    }

    /// Runs `program` with `args` and returns its standard output.
    async fn run(&self, program: &str, args: &[String]) -> Result<String>;
}

/// Executes commands against the live Open vSwitch database. Mutating the
/// switch database requires root.
#[derive(Debug, Default)]
pub struct OvsRunner;

#[async_trait]
impl CommandRunner for OvsRunner {
    fn check_privilege(&self) -> Result<()> {
        if Uid::effective().is_root() { Ok(()) } else { Err(Error::PermissionDenied) }
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<String> {
        log::debug!("Running: {} {}", program, args.join(" "));

        let output = Command::new(program).args(args).output().await?;
        if !output.status.success() {
            log::warn!("{} exited with {}: {}", program, output.status, String::from_utf8_lossy(&output.stderr).trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
