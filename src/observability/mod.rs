//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! vary post-processor, HTTP server, config loader produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (rewrite counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Metrics calls are no-ops until a recorder is installed
//! - Log level comes from config unless `RUST_LOG` is set

pub mod logging;
pub mod metrics;
