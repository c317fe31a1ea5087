//! Port definitions (interfaces to the outside world)
//!
//! Adapters implementing these live in the infrastructure layer.

pub mod completion;
pub mod role_registry;
pub mod session_store;
