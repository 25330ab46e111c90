use thiserror::Error;

/// Failures from the backing table, one variant per operation so logs name
/// what was being attempted.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Scan failed: {0}")]
    Scan(String),

    #[error("Put failed: {0}")]
    Put(String),

    #[error("Delete failed: {0}")]
    Delete(String),
}
