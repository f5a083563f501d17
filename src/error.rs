use thiserror::Error;

/// Errors surfaced by the public engine API.
///
/// There is deliberately no `Overflow` variant: `Engine::roman` degrades
/// gracefully to a decimal string for `n >= 4000` instead of failing.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("engine used before construction completed: {0}")]
    PreconditionFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
