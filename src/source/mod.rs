//! Source system adapters
//!
//! Each adapter knows where its source keeps categories, tags and
//! content, how to map a source record into a `DestinationResource`,
//! and how to order records so parents precede children.

pub mod joomla;
mod traits;
pub mod wordpress;

pub use joomla::JoomlaSource;
pub use traits::SourceAdapter;
pub use wordpress::WordpressSource;
