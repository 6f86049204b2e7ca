use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the engine. Duplicate incorporation is not an error
/// (it reports `Ok(false)` and leaves the index unchanged); everything here
/// is a real fault.
#[derive(Debug, Error)]
pub enum Error {
    /// The URL table has no free slot left for another distinct URL.
    #[error("url table full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// A persisted artifact could not be opened, created, read, or written.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A persisted artifact failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// The metadata artifact failed to encode or decode.
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Persisted data is internally inconsistent (record counts, unknown
    /// format version, postings referencing unknown document ids).
    #[error("corrupt index: {0}")]
    Corrupt(String),
}
