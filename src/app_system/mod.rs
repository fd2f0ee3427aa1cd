//! System orchestration, startup, and shutdown logic.

pub mod booking_system;
pub mod tracing;

pub use booking_system::*;
pub use self::tracing::*;
