use ising_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation has not been initialized")]
    NotInitialized,

    #[error("operation requires the clock to be stopped")]
    AlreadyRunning,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("failed to spawn {what} thread: {source}")]
    Spawn {
        what:   &'static str,
        source: std::io::Error,
    },

    #[error("{0} thread panicked")]
    Thread(&'static str),
}

pub type SimResult<T> = Result<T, SimError>;
