use thiserror::Error;

use crate::domain::topology::ParseError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    Io(#[from] std::io::Error),

    /// The controller did not answer, or answered with a body that is not JSON.
    /// Transport details are logged at the call site; callers only see this
    /// single signal.
    #[error("controller unreachable")]
    ControllerUnreachable,

    /// Queue provisioning was attempted without root permissions. Raised
    /// before any device state is touched.
    #[error("Root permissions required")]
    PermissionDenied,

    /// The controller never reported the expected node count within the
    /// configured poll budget.
    #[error(
        "controller topology did not converge: expected {expected} nodes, last saw {last_seen} after {attempts} polls"
    )]
    TopologyMismatch { expected: usize, last_seen: usize, attempts: u32 },

    #[error("Failed to parse switch configuration dump: {0}")]
    DumpParse(#[from] ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
