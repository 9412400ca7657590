//! Domain layer: pure types, value objects and the storage ports.

pub mod currency;
pub mod deposit;
pub mod notification;
pub mod payout;
pub mod plan;
pub mod ports;
pub mod ticket;
pub mod user;
