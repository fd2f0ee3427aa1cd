//! Order documents stored by the primary store.

mod actions;
pub mod entity;

pub use actions::*;
