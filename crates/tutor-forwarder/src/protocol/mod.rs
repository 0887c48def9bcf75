//! Wire formats
//!
//! `upstream` is what the chat-completion provider speaks; `completion` is
//! the canonical body returned to the study pages.

pub mod completion;
pub mod upstream;
