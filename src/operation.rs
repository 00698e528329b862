//! Common interface for the unpack and pack operations.

use crate::error::Result;

/// A validated archive operation that is ready to run.
///
/// Values implementing this trait have already passed all of their
/// construction-time checks, so `run` only fails on I/O.
pub trait ArchiveOperation {
    /// Perform the operation.
    fn run(&self) -> Result<()>;

    /// Short human-readable description, used for logging.
    fn describe(&self) -> String;
}

/// Run a batch of operations in order, stopping at the first failure.
pub fn run_all(operations: &[&dyn ArchiveOperation]) -> Result<()> {
    for op in operations {
        log::info!("Running {}", op.describe());
        op.run()?;
    }
    Ok(())
}
