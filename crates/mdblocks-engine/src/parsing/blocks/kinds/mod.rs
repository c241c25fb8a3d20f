pub mod block_quote;
pub mod code_fence;
pub mod front_matter;
pub mod heading;
pub mod html;
pub mod indented_code;
pub mod list;
pub mod math;
pub mod paragraph;
pub mod table;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use front_matter::FrontMatter;
pub use heading::Heading;
pub use html::HtmlBlock;
pub use indented_code::IndentedCode;
pub use list::List;
pub use math::MathBlock;
pub use paragraph::ParagraphAccumulator;
pub use table::Table;
