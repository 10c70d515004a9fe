//! # Query sessions
//!
//! The live query engine sits behind two traits. A [`QueryEngine`] opens one
//! [`QuerySession`] per document parse; every query block of that document
//! runs through the same session, so later blocks see the data earlier
//! blocks created. Dropping the session tears it down.

pub mod command;

use std::process::ExitStatus;

pub use command::{CommandEngine, CommandSession};

#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Failed to start query engine '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("IO error talking to query engine: {0}")]
    Io(#[from] std::io::Error),
    #[error("Query engine exited with {status} running:\n{query}\n{stderr}")]
    Failed {
        query: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("query engine error: {0}")]
    Engine(String),
}

/// Opens isolated query sessions.
pub trait QueryEngine {
    type Session: QuerySession;

    fn open(&self) -> Result<Self::Session, ExecutionError>;
}

/// A live session against one database instance.
pub trait QuerySession {
    /// Runs `query` and returns the result as printable text.
    fn execute(&mut self, query: &str) -> Result<String, ExecutionError>;
}
