//! HTTP transport for the registry API.

mod client;
mod transport;

pub use client::HttpTransport;
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{HttpResponse, Transport};
