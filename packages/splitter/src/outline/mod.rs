//! Document outline built from the TOC listing.
//!
//! The listing is a flat, ordered list of headings. Nesting is implied by
//! the level of each heading, and a heading's content runs until the next
//! heading at the same or a shallower level.

mod parser;
mod resolver;
mod types;

pub use parser::{parse_toc, read_toc};
pub use resolver::{Outline, OutlineEntry};
pub use types::{Level, LineRange, SkipReason, SkippedLine, TocListing, TocRecord};
