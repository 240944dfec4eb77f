//! HTTP demo server.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum router built from config)
//!     → route handler (static body, only_vary_on / dont_vary_on layers)
//!     → upstream.rs (adds the configured Vary names)
//!     → VaryRewriteLayer (applies the route's directives)
//!     → TraceLayer → client
//! ```

pub mod server;
pub mod upstream;

pub use server::VaryServer;
pub use upstream::{UpstreamVary, UpstreamVaryLayer};
