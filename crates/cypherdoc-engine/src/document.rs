use crate::blocks::{Block, split};
use crate::error::ParseError;
use crate::session::QueryEngine;
use crate::snippet::{QueryResultSnippet, ResultFormatter};

/// Line terminator used for all rendered output.
pub const EOL: &str = "\n";

/// Renders cypherdoc documents against a query engine.
pub struct CypherDoc<'a, E> {
    engine: &'a E,
    formatter: &'a dyn ResultFormatter,
}

impl<'a, E: QueryEngine> CypherDoc<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        Self {
            engine,
            formatter: &QueryResultSnippet,
        }
    }

    pub fn with_formatter(mut self, formatter: &'a dyn ResultFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Splits, classifies and renders a whole document.
    ///
    /// All query blocks run in document order through one session, opened
    /// here and dropped on every return path. The first error aborts the
    /// parse and no partial output is returned.
    pub fn parse(&self, input: &str) -> Result<String, ParseError> {
        let blocks: Vec<Block> = split(input)?
            .into_iter()
            .map(|raw| raw.classify())
            .collect();

        for (index, block) in blocks.iter().enumerate() {
            log::debug!(
                "block {index}: {} ({} lines)",
                block.kind.name(),
                block.lines.len()
            );
        }

        let mut session = self.engine.open()?;
        let mut output = String::with_capacity(4096);
        let mut previous: Option<&Block> = None;

        for block in &blocks {
            output.push_str(&block.render(previous, &mut session, self.formatter)?);
            output.push_str(EOL);
            output.push_str(EOL);
            previous = Some(block);
        }

        Ok(output)
    }
}

/// Renders `input` with the default `[queryresult]` formatter.
pub fn parse<E: QueryEngine>(input: &str, engine: &E) -> Result<String, ParseError> {
    CypherDoc::new(engine).parse(input)
}
