//! # Blocks
//!
//! A document is processed as a flat sequence of blocks.
//!
//! ## Phases
//!
//! 1. **Splitting** (`split`): lines are grouped into `RawBlock`s, one per run of
//!    non-blank lines
//! 2. **Classification** (`classify`): each `RawBlock` becomes a `Block` tagged
//!    with the first `BlockKind` whose predicate accepts it
//! 3. **Rendering** (`kinds`): each kind owns its syntax knowledge and turns its
//!    lines into output text
//!
//! ## Key Invariants
//!
//! - Classification is total: `Text` accepts everything and is always last
//! - A block's kind never changes after classification
//! - Blocks are rendered in document order against one shared query session

pub mod classify;
pub mod kinds;
pub mod split;

use std::fmt;

pub use classify::BlockKind;
pub use split::{BlockSplitter, split};

use crate::document::EOL;
use crate::error::ParseError;
use crate::session::QuerySession;
use crate::snippet::ResultFormatter;

/// A run of non-blank lines, bounded by blank lines or the document edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub lines: Vec<String>,
}

impl RawBlock {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Tags this block with the first matching kind in [`BlockKind::ORDER`].
    pub fn classify(self) -> Block {
        let kind = BlockKind::classify(&self.lines);
        Block {
            lines: self.lines,
            kind,
        }
    }
}

/// A block tagged with exactly one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub lines: Vec<String>,
    pub kind: BlockKind,
}

impl Block {
    /// Renders this block to output text.
    ///
    /// `previous` is the block rendered just before this one, if any. No current
    /// kind reads it.
    pub fn render<S>(
        &self,
        _previous: Option<&Block>,
        session: &mut S,
        formatter: &dyn ResultFormatter,
    ) -> Result<String, ParseError>
    where
        S: QuerySession + ?Sized,
    {
        match self.kind {
            BlockKind::Title => Ok(kinds::Title::render(&self.lines)),
            BlockKind::Query => kinds::Query::render(self, session, formatter),
            BlockKind::Text => Ok(kinds::Text::render(&self.lines)),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block [[{}]]:{EOL}", self.kind.name())?;
        write!(f, "{}{EOL}", self.lines.join(EOL))
    }
}
