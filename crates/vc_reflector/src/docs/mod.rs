//! Parsing of documentation comments attached to registered members.
//!
//! Doc comments are stored exactly as registered, in conventional block form:
//!
//! ```text
//! /**
//!  * Summary line.
//!  *
//!  * @param string $name  Who to greet.
//!  */
//! ```
//!
//! - [`doc_comment`]: return the raw block, or its prose with tags stripped.
//! - [`param_tags`]: collect `@param` tags into a [`DocTagMap`].

// -----------------------------------------------------------------------------
// Modules

mod comment;
mod tags;

// -----------------------------------------------------------------------------
// Exports

pub use comment::doc_comment;
pub use tags::{DocTag, DocTagMap, param_tags};
