//! Role registry adapters

pub mod registry;

pub use registry::BuiltinRoleRegistry;
