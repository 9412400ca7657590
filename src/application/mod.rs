//! Application layer: the business engines that orchestrate domain types
//! over the storage ports. Each engine is a stateless unit of work; the
//! document store's per-document write semantics provide the atomicity.

pub mod notifications;
pub mod payouts;
pub mod reconciler;
