use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("History is full: saving needs {needed_bytes} bytes but the limit is {limit_bytes}")]
    CapacityExceeded { limit_bytes: usize, needed_bytes: usize },

    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History document is corrupt: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// What to tell the user when a save is refused for lack of space.
    pub fn capacity_hint(&self) -> Option<String> {
        match self {
            StoreError::CapacityExceeded { limit_bytes, .. } => Some(format!(
                "history is full ({} byte limit). Delete old analyses with `workbench history delete <ID>` or `workbench history clear`.",
                limit_bytes
            )),
            _ => None,
        }
    }
}
