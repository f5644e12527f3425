#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    #[error("'{0}' is already in favorites")]
    Duplicate(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
