//! Storage access negotiation.
//!
//! The library is only scanned once access to the music root is granted. A
//! gate answers with granted, denied, or a request to explain why access is
//! needed; on the latter the request is simply made again.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{info, warn};

/// One answer from a permission gate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    Denied,
    RationaleRequested,
}

/// Final result of a negotiation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

pub trait PermissionGate {
    /// Ask for access the first time.
    fn check(&mut self) -> PermissionOutcome;
    /// Repeat the request after a rationale was asked for.
    fn continue_request(&mut self) -> PermissionOutcome;
}

/// Run the negotiation to completion: re-request once per rationale event.
///
/// There is no limit on rationale rounds; a gate that keeps asking keeps
/// the negotiation pending.
pub fn negotiate<G: PermissionGate>(gate: &mut G) -> Access {
    let mut outcome = gate.check();
    let mut rounds = 0usize;

    while outcome == PermissionOutcome::RationaleRequested {
        rounds += 1;
        info!(round = rounds, "rationale requested; asking again");
        outcome = gate.continue_request();
    }

    match outcome {
        PermissionOutcome::Granted => {
            info!("storage access granted");
            Access::Granted
        }
        _ => {
            warn!("storage access denied");
            Access::Denied
        }
    }
}

/// Filesystem gate: access is denied only when listing the root is refused.
///
/// A missing root counts as granted; the scan then finds nothing.
pub struct FsPermission {
    root: PathBuf,
}

impl FsPermission {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PermissionGate for FsPermission {
    fn check(&mut self) -> PermissionOutcome {
        match fs::read_dir(&self.root) {
            Err(e) if e.kind() == ErrorKind::PermissionDenied => PermissionOutcome::Denied,
            _ => PermissionOutcome::Granted,
        }
    }

    fn continue_request(&mut self) -> PermissionOutcome {
        self.check()
    }
}
