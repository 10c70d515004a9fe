use crate::session::ExecutionError;

/// Everything that can abort a document parse.
///
/// A parse never recovers locally: the first error is the whole result.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Too little content, only {lines} lines")]
    MalformedInput { lines: usize },

    #[error("No block kind matches the block starting with: '{first_line}'")]
    UnclassifiableBlock { first_line: String },

    #[error("Query block needs an opening and a closing '----' line, found {fences}:\n{block}")]
    MalformedQueryBlock { fences: usize, block: String },

    #[error("Query result doesn't contain the string: '{assertion}'. The query:{block}\n\n{result}")]
    AssertionFailed {
        assertion: String,
        block: String,
        result: String,
    },

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}
