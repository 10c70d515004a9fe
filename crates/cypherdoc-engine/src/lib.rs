pub mod blocks;
pub mod document;
pub mod error;
pub mod session;
pub mod snippet;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use blocks::{Block, BlockKind, RawBlock};
pub use document::{CypherDoc, EOL, parse};
pub use error::ParseError;
pub use session::{CommandEngine, CommandSession, ExecutionError, QueryEngine, QuerySession};
pub use snippet::{QueryResultSnippet, ResultFormatter};
