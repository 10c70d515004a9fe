use crate::blocks::Block;
use crate::document::EOL;
use crate::error::ParseError;
use crate::session::QuerySession;
use crate::snippet::ResultFormatter;

/// Cypher query block type with owned delimiter constants.
///
/// A query block is laid out as
///
/// ```text
/// [source,cypher]        <- header, kept as-is
/// ----
/// MATCH (n) RETURN n     <- query, sent to the session
/// ----
/// expected text          <- assertions, one substring per line
/// ```
pub struct Query;

impl Query {
    /// Opening and closing delimiter of the query body.
    pub const FENCE: &'static str = "----";
    /// Prefix shared by header and anchor lines.
    pub const HEADER_PREFIX: &'static str = "[";
    /// Prefix of an anchor line preceding the header.
    pub const ANCHOR_PREFIX: &'static str = "[[";

    /// Line count an anchored query block must exceed.
    const ANCHORED_MIN_LINES: usize = 4;

    pub fn is_fence(line: &str) -> bool {
        line.starts_with(Self::FENCE)
    }

    fn is_cypher_header(line: &str) -> bool {
        line.contains("source") && line.contains("cypher")
    }

    /// `[source,cypher]` on the first line, or on the second after a `[[anchor]]`.
    pub fn is_query(lines: &[String]) -> bool {
        let Some(first) = lines.first() else {
            return false;
        };
        if !first.starts_with(Self::HEADER_PREFIX) {
            return false;
        }
        if Self::is_cypher_header(first) {
            return true;
        }
        lines.len() > Self::ANCHORED_MIN_LINES
            && first.starts_with(Self::ANCHOR_PREFIX)
            && Self::is_cypher_header(&lines[1])
    }

    /// Executes the block's query and checks every assertion against the result.
    ///
    /// Stops at the first assertion the result does not contain.
    pub fn render<S>(
        block: &Block,
        session: &mut S,
        formatter: &dyn ResultFormatter,
    ) -> Result<String, ParseError>
    where
        S: QuerySession + ?Sized,
    {
        let parts = QueryParts::parse(block)?;
        let query = parts.query_text();

        log::debug!("executing query:\n{query}");
        let result = session.execute(&query)?;

        if let Some(assertion) = parts.first_failed_assertion(&result) {
            return Err(ParseError::AssertionFailed {
                assertion: assertion.to_string(),
                block: block.to_string(),
                result,
            });
        }

        let mut output = String::with_capacity(512);
        output.push_str(&parts.header.join(EOL));
        output.push_str(EOL);
        output.push_str(Self::FENCE);
        output.push_str(EOL);
        output.push_str(&parts.query.join(EOL));
        output.push_str(EOL);
        output.push_str(Self::FENCE);
        output.push_str(EOL);
        output.push_str(EOL);
        output.push_str(&formatter.format(&result));
        Ok(output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryState {
    BeforeQuery,
    InQuery,
    AfterQuery,
}

impl QueryState {
    fn fences_seen(self) -> usize {
        match self {
            QueryState::BeforeQuery => 0,
            QueryState::InQuery => 1,
            QueryState::AfterQuery => 2,
        }
    }
}

/// The three regions of a query block.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct QueryParts<'a> {
    pub header: Vec<&'a str>,
    pub query: Vec<&'a str>,
    pub assertions: Vec<&'a str>,
}

impl<'a> QueryParts<'a> {
    /// Splits a block at its first two fence lines.
    ///
    /// Fence lines after the second one are plain assertions.
    pub fn parse(block: &'a Block) -> Result<Self, ParseError> {
        let (state, parts) = block.lines.iter().fold(
            (QueryState::BeforeQuery, QueryParts::default()),
            |(state, mut parts), line| {
                let state = parts.push(state, line);
                (state, parts)
            },
        );

        if state != QueryState::AfterQuery {
            return Err(ParseError::MalformedQueryBlock {
                fences: state.fences_seen(),
                block: block.to_string(),
            });
        }
        Ok(parts)
    }

    fn push(&mut self, state: QueryState, line: &'a str) -> QueryState {
        match state {
            QueryState::BeforeQuery if Query::is_fence(line) => QueryState::InQuery,
            QueryState::BeforeQuery => {
                self.header.push(line);
                state
            }
            QueryState::InQuery if Query::is_fence(line) => QueryState::AfterQuery,
            QueryState::InQuery => {
                self.query.push(line);
                state
            }
            QueryState::AfterQuery => {
                self.assertions.push(line);
                state
            }
        }
    }

    /// The literal text sent to the session. Always `\n`-joined.
    pub fn query_text(&self) -> String {
        self.query.join("\n")
    }

    pub fn first_failed_assertion(&self, result: &str) -> Option<&'a str> {
        self.assertions
            .iter()
            .copied()
            .find(|assertion| !result.contains(assertion))
    }
}
