use crate::error::ParseError;

use super::RawBlock;

/// Documents shorter than this cannot hold a renderable unit.
pub const MIN_LINES: usize = 3;

/// Groups lines into [`RawBlock`]s, closing a group at each blank line.
#[derive(Debug, Default)]
pub struct BlockSplitter {
    current: Vec<String>,
    out: Vec<RawBlock>,
}

impl BlockSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.flush();
            return;
        }
        // Stored verbatim: only the blank test trims.
        self.current.push(line.to_string());
    }

    pub fn finish(mut self) -> Vec<RawBlock> {
        // EOF flush
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.out
                .push(RawBlock::new(std::mem::take(&mut self.current)));
        }
    }
}

/// Splits a whole document into raw blocks.
///
/// Lines are separated by `\n` with an optional trailing `\r` removed. Empty
/// lines at the very end are not counted, so a final newline does not add a
/// line. Fails with [`ParseError::MalformedInput`] below [`MIN_LINES`].
pub fn split(text: &str) -> Result<Vec<RawBlock>, ParseError> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.len() < MIN_LINES {
        return Err(ParseError::MalformedInput { lines: lines.len() });
    }

    let mut splitter = BlockSplitter::new();
    for line in lines {
        splitter.push(line);
    }
    Ok(splitter.finish())
}
