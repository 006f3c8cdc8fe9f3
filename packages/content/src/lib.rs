//! # Copy-Edit Content
//!
//! Content trees for editable page copy and the extractor that flattens
//! them into plain text.
//!
//! ```rust
//! use copyedit_content::{extract, ContentNode};
//!
//! let title = ContentNode::sequence([
//!     ContentNode::text("Line one"),
//!     ContentNode::line_break(),
//!     ContentNode::text("Line two"),
//! ]);
//!
//! assert_eq!(extract(&title), "Line one\nLine two");
//! ```

mod extract;
mod node;

pub use extract::{extract, extract_all};
pub use node::{format_number, ContentNode, Group, LINE_BREAK_TAG};
