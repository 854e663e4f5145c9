use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Backend initialization failed: {0}")]
    InitFailed(String),
    #[error("Backend not initialized")]
    NotInitialized,
    #[error("Present failed: {0}")]
    PresentFailed(String),
    #[error("Frame has {actual} bytes, backend expects {expected}")]
    InvalidFrame { expected: usize, actual: usize },
}
