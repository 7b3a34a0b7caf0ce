use std::io;

use thiserror::Error;
use tokio::task::JoinError;

/// Failure to establish the outbound connection.
#[derive(Debug, Error)]
#[error("failed to connect to {host}:{port}")]
pub struct ConnectionError {
    pub host: String,
    pub port: u16,
    #[source]
    pub source: io::Error,
}

/// Failure while writing a payload to the connection.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The connection was already closed locally.
    #[error("connection is closed")]
    Closed,
    #[error("write failed")]
    Io(#[from] io::Error),
}

/// Failure inside the reader task, surfaced when it is joined.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("read failed")]
    Io(#[from] io::Error),
    /// The reader task panicked instead of running to completion.
    #[error("reader task failed")]
    Task(#[from] JoinError),
}
