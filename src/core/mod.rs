// src/core/mod.rs

pub mod net;
pub mod retry;
pub mod sanitize;

pub use net::{HttpClient, NetError, Requester, Transport};
pub use retry::RetryPolicy;
