use thiserror::Error;

/// Errors produced while generating or drawing a clock.
#[derive(Debug, Error)]
pub enum ClockError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("plot backend error: {0}")]
    Plot(String),
}
