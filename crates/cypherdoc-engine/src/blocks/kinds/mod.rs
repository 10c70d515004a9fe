pub mod query;
pub mod text;
pub mod title;

pub use query::{Query, QueryParts};
pub use text::Text;
pub use title::Title;
