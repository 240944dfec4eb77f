//! Upstream `Vary` stage.
//!
//! Stands in for the middleware that usually grows `Vary` behind a
//! handler's back (compression adds `Accept-Encoding`, sessions add
//! `Cookie`). It sits between the handlers and the post-processor.

use std::sync::Arc;

use axum::http::Response;

use crate::vary::headers::patch_vary_headers;
use crate::vary::service::{HookLayer, ResponseHook};

/// Hook adding a fixed list of names to `Vary`.
#[derive(Debug, Clone)]
pub struct UpstreamVary {
    names: Arc<[String]>,
}

impl UpstreamVary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl ResponseHook for UpstreamVary {
    fn on_response<B>(&self, response: &mut Response<B>) {
        if let Err(e) = patch_vary_headers(response.headers_mut(), &self.names[..]) {
            tracing::warn!(error = %e, "Upstream stage could not extend Vary");
        }
    }
}

/// Layer running [`UpstreamVary`].
pub type UpstreamVaryLayer = HookLayer<UpstreamVary>;

impl UpstreamVaryLayer {
    pub fn upstream<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        HookLayer::new(UpstreamVary::new(names))
    }
}
