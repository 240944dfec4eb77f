//! Per-handler control of the HTTP `Vary` header for axum/tower services.
//!
//! Handlers declare the headers their response should vary on exclusively
//! ([`only_vary_on`]) or the headers it must not vary on ([`dont_vary_on`]).
//! [`VaryRewriteLayer`] applies those declarations after every other stage
//! that touches `Vary` has run, so the cache in front sees the final list.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod vary;

pub use config::schema::ServerConfig;
pub use http::VaryServer;
pub use lifecycle::Shutdown;
pub use vary::{
    dont_vary_on, only_vary_on, process_response, remove_vary_headers, DontVaryOn, OnlyVaryOn,
    VaryDirectives, VaryRewriteLayer,
};
