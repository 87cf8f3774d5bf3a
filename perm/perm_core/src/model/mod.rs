//! Policy model.
//!
//! Roles and the rights granted to them.

pub mod right;
pub mod role;

pub use right::Right;
pub use role::Role;
