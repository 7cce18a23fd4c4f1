use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

use crate::args::QueryType;
use crate::error::ProbeError;

/// One question sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeQuery {
    pub name: String,
    pub record_type: QueryType,
}

impl ProbeQuery {
    /// Builds a query for `host`, making the name fully qualified.
    #[must_use]
    pub fn new(host: &str, record_type: QueryType) -> Self {
        let name = if host.ends_with('.') {
            host.to_owned()
        } else {
            format!("{}.", host)
        };
        Self { name, record_type }
    }
}

/// What the resolver saw for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub answers: usize,
    pub rtt: Duration,
}

#[async_trait]
pub trait Resolver: Send + Sync {
    /// Sends `query` to `server` and waits for the matching response.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError` when the exchange fails at the transport or
    /// protocol level. An answerless response is not an error.
    async fn exchange(&self, query: &ProbeQuery, server: SocketAddr)
    -> Result<Exchange, ProbeError>;
}
