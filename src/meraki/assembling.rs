//! Assembling module
//!
//!     Assembling stages operate on the finished tree rather than on tokens. Comments were
//!     lifted out before structural parsing so the grammar never has to deal with them; only
//!     with every node in place, each carrying its line, can they be put back where they
//!     belong.
//!
//! Current stages:
//!
//!     - `attach_comments`: Attaches extracted comments to the node they document, or to the
//!       root as orphans. See [attach_comments](stages::attach_comments) for the rules.

pub mod stages;

pub use stages::attach_comments::{attach_comments, AttachComments, Parsed};
