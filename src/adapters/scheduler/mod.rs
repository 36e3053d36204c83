//! Background maintenance services.

mod cleanup;

pub use cleanup::{sweep_inactive, CleanupError, CleanupScheduler, CleanupSchedulerConfig};
