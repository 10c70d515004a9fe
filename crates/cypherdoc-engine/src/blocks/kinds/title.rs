use crate::document::EOL;

/// Section heading block type with owned syntax constants.
pub struct Title;

impl Title {
    /// The heading marker character.
    pub const MARKER: char = '=';
    /// Namespace prepended to every generated anchor id.
    pub const ANCHOR_PREFIX: &'static str = "cypherdoc-";

    /// A heading on the first line, or an underline-style marker on the second.
    pub fn is_title(lines: &[String]) -> bool {
        let starts_heading = |line: &String| line.starts_with(Self::MARKER);
        lines.first().is_some_and(starts_heading) || lines.get(1).is_some_and(starts_heading)
    }

    /// The heading text: first line without any markers, trimmed.
    pub fn text(first_line: &str) -> String {
        first_line.replace(Self::MARKER, "").trim().to_string()
    }

    /// Anchor id derived from the heading text.
    pub fn anchor_id(title: &str) -> String {
        format!("{}{}", Self::ANCHOR_PREFIX, title.to_lowercase().replace(' ', "-"))
    }

    pub fn render(lines: &[String]) -> String {
        let title = Self::text(lines.first().map(String::as_str).unwrap_or_default());
        let id = Self::anchor_id(&title);
        format!("[[{id}]]{EOL}= {title} ={EOL}")
    }
}
