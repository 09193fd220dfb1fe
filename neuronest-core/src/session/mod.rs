//! Conversation state
//!
//! A session holds the ordered turns of one conversation together with the
//! draft input, the request gate and the view selectors. Nothing here is
//! written to disk.

pub mod store;
pub mod turn;

pub use store::Session;
pub use turn::{Role, Turn};
