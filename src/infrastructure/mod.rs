//! Infrastructure layer: concrete implementations of the storage ports.

pub mod in_memory;
