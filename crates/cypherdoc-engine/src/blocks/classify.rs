use crate::error::ParseError;

use super::kinds::{Query, Title};

/// The kind of a block, decided by ordered first-match classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A section heading, rendered with a generated anchor.
    Title,
    /// A fenced Cypher query, executed and verified against its assertions.
    Query,
    /// Anything else; passed through unchanged.
    Text,
}

impl BlockKind {
    /// Classification order. `Text` accepts everything and must stay last.
    pub const ORDER: [BlockKind; 3] = [BlockKind::Title, BlockKind::Query, BlockKind::Text];

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Title => "TITLE",
            BlockKind::Query => "QUERY",
            BlockKind::Text => "TEXT",
        }
    }

    /// Whether a block made of `lines` belongs to this kind.
    pub fn matches(self, lines: &[String]) -> bool {
        match self {
            BlockKind::Title => Title::is_title(lines),
            BlockKind::Query => Query::is_query(lines),
            BlockKind::Text => true,
        }
    }

    /// Classifies against [`BlockKind::ORDER`]. Never fails.
    pub fn classify(lines: &[String]) -> BlockKind {
        Self::ORDER
            .into_iter()
            .find(|kind| kind.matches(lines))
            .unwrap_or(BlockKind::Text)
    }

    /// Classifies against an explicit kind order, first match wins.
    ///
    /// Without a catch-all in `order` a block can go unmatched, reported as
    /// [`ParseError::UnclassifiableBlock`].
    pub fn classify_with(order: &[BlockKind], lines: &[String]) -> Result<BlockKind, ParseError> {
        order
            .iter()
            .copied()
            .find(|kind| kind.matches(lines))
            .ok_or_else(|| ParseError::UnclassifiableBlock {
                first_line: lines.first().cloned().unwrap_or_default(),
            })
    }
}
