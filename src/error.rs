use thiserror::Error;

/// Rejected cache configuration. Only returned when constructing a [`crate::Cache`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("cache capacity must be greater than zero")]
    ZeroCapacity,

    #[error("cache capacity {0} is out of range, it must be a positive integer")]
    CapacityOutOfRange(i64),
}
