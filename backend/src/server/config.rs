//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::Key;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use mockable::{Clock, DefaultClock};

use crate::outbound::persistence::DbPool;

/// Builder-style configuration consumed by [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) clock: Arc<dyn Clock>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Start a configuration backed by the in-memory store and system clock.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            bind_addr,
            db_pool: None,
            clock: Arc::new(DefaultClock),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Use PostgreSQL through `pool` instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the clock that dates new enrollments.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether a database pool has been attached.
    #[must_use]
    pub fn uses_database(&self) -> bool {
        self.db_pool.is_some()
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware; a default registry is built otherwise.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
