//! Interface layer: the HTTP edges of the service.

pub mod http;
pub mod provider;
