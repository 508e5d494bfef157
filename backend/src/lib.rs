//! Articles backend library modules.
//!
//! `domain` holds the article rules and ports, `inbound` the HTTP adapter,
//! and `outbound` the Diesel and in-memory persistence adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
