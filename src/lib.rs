//! Payment lifecycle core for an event-ticketing platform: deposit
//! initiation against a mobile-money provider, asynchronous callback
//! reconciliation, the admin payout workflow and best-effort notification
//! broadcasts.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
