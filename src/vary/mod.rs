//! Per-handler control over the `Vary` response header.
//!
//! # Data Flow
//! ```text
//! handler
//!     → annotate.rs (only_vary_on / dont_vary_on record VaryDirectives)
//!     → upstream stages add to Vary
//!     → process.rs (VaryRewriteLayer applies the directives)
//!         → headers.rs (split / filter / join the Vary list)
//!     → cache layer reads the final Vary
//! ```
//!
//! # Design Decisions
//! - Directives travel in response extensions, not in headers
//! - `only_vary_on` replaces, `dont_vary_on` accumulates
//! - Rewrites never fail the request; problems are logged and skipped

pub mod annotate;
pub mod directives;
pub mod error;
pub mod headers;
pub mod process;
pub mod service;

pub use annotate::{
    dont_vary_on, only_vary_on, DontVaryOn, DontVaryOnLayer, OnlyVaryOn, OnlyVaryOnLayer,
};
pub use directives::VaryDirectives;
pub use error::{VaryError, VaryResult};
pub use headers::{patch_vary_headers, remove_vary_headers, vary_tokens, VaryOutcome};
pub use process::{
    apply_vary_directives, process_response, rewrite_response, RewriteVary, VaryRewriteLayer,
};
pub use service::{HookLayer, HookService, ResponseHook};
