use thiserror::Error;

/// Errors raised while wiring filters to a controller.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("A controller has already been published")]
    AlreadyPublished,

    #[error("Filter registration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type FilterResult<T> = Result<T, FilterError>;
