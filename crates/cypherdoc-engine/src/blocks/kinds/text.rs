use crate::document::EOL;

/// Prose and anything not recognised as another kind.
pub struct Text;

impl Text {
    /// Passes the lines through unchanged.
    pub fn render(lines: &[String]) -> String {
        lines.join(EOL)
    }
}
