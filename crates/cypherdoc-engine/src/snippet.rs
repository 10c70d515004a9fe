/// Wraps raw query result text in presentation markup.
pub trait ResultFormatter {
    fn format(&self, result: &str) -> String;
}

/// Formats results as an AsciiDoc `[queryresult]` listing block.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryResultSnippet;

impl QueryResultSnippet {
    pub const HEADER: &'static str = "[queryresult]";
}

impl ResultFormatter for QueryResultSnippet {
    fn format(&self, result: &str) -> String {
        let mut snippet = String::with_capacity(result.len() + 32);
        snippet.push_str(Self::HEADER);
        snippet.push_str("\n----\n");
        snippet.push_str(result);
        if !result.ends_with('\n') {
            snippet.push('\n');
        }
        snippet.push_str("----\n");
        snippet
    }
}

impl<F> ResultFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format(&self, result: &str) -> String {
        self(result)
    }
}
