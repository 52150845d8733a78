/// All errors that can be returned by a FilterSetStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No saved filter set has this name.
    #[error("saved filter set not found: {name}")]
    NotFound { name: String },

    /// Saved sets need a non-blank name to be recalled by.
    #[error("saved filter set name must not be blank")]
    BlankName,

    /// Reading or writing the backing file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not valid saved-filter JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backend-specific storage error.
    #[error("storage backend error: {0}")]
    Backend(String),
}
