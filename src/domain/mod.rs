//! Business documents, free of actor and transport concerns.

pub mod order;
pub mod review;
pub mod service;

pub use order::*;
pub use review::*;
pub use service::*;
