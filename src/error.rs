use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Count-up target must be finite, got {0}")]
    NonFiniteTarget(f64),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
