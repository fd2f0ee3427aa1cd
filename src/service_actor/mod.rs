//! Service documents: schema checks, admin patches and the rating aggregate.

mod actions;
pub mod entity;

pub use actions::*;
