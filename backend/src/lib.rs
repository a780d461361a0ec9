//! Registrar backend: enrollment rules, HTTP adapters and record stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::{TRACE_ID_HEADER, TraceId};
pub use middleware::Trace;
