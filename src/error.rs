pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("task panicked: {0}")]
    TaskPanicked(String),

    #[error("task abandoned before it ran")]
    TaskAbandoned,

    #[error("worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error("grid error: {0}")]
    Grid(String),
}

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn grid<S: Into<String>>(msg: S) -> Self {
        Error::Grid(msg.into())
    }
}
