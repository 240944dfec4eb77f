//! The `Vary` post-processor.
//!
//! # Responsibilities
//! - Read the [`VaryDirectives`] left on a response by its handler
//! - Replace `Vary` for `only_vary_on`, filter it for `dont_vary_on`
//! - Record what happened in logs and metrics
//!
//! # Placement
//! ```text
//! handler (annotated)
//!     → stages that add to Vary (compression, cache-control, ...)
//!     → VaryRewriteLayer
//!     → stages that read the final Vary (shared cache, cache key)
//! ```
//! Nothing checks this order at runtime; it is up to whoever builds the
//! router. With tower, "later on the way out" means "added with `.layer`
//! after".

use std::collections::BTreeSet;

use axum::http::{header::VARY, HeaderMap, Response};

use crate::observability::metrics;
use crate::vary::directives::VaryDirectives;
use crate::vary::error::VaryResult;
use crate::vary::headers::{remove_vary_headers, set_vary, VaryOutcome};
use crate::vary::service::{HookLayer, ResponseHook};

/// Apply `directives` to `headers`.
///
/// A non-empty `only_vary_on` always wins; `dont_vary_on` is then ignored.
pub fn rewrite_vary(
    directives: &VaryDirectives,
    headers: &mut HeaderMap,
) -> VaryResult<VaryOutcome> {
    if !directives.only_vary_on().is_empty() {
        let exclusive: BTreeSet<&str> = directives
            .only_vary_on()
            .iter()
            .map(String::as_str)
            .collect();
        let value = exclusive.into_iter().collect::<Vec<_>>().join(", ");
        set_vary(headers, value)?;
        return Ok(VaryOutcome::Replaced);
    }

    if !directives.dont_vary_on().is_empty() {
        return remove_vary_headers(headers, directives.dont_vary_on());
    }

    Ok(VaryOutcome::Untouched)
}

/// Apply whatever directives `response` carries.
///
/// The directives stay attached afterwards; applying them twice gives the
/// same header.
pub fn apply_vary_directives<B>(response: &mut Response<B>) -> VaryResult<VaryOutcome> {
    let Some(directives) = response.extensions_mut().remove::<VaryDirectives>() else {
        return Ok(VaryOutcome::Untouched);
    };

    let result = rewrite_vary(&directives, response.headers_mut());
    response.extensions_mut().insert(directives);
    result
}

/// Rewrite `Vary` in place. Never fails: a rewrite that cannot be applied is
/// logged and the header is left as it was.
pub fn rewrite_response<B>(response: &mut Response<B>) {
    match apply_vary_directives(response) {
        Ok(outcome) => {
            metrics::record_vary_rewrite(outcome.label());
            if outcome != VaryOutcome::Untouched {
                tracing::debug!(
                    outcome = outcome.label(),
                    vary = ?response.headers().get(VARY),
                    "Rewrote Vary header"
                );
            }
        }
        Err(e) => {
            metrics::record_vary_error(e.kind());
            tracing::warn!(error = %e, "Leaving Vary header unchanged");
        }
    }
}

/// Post-process a response and hand it back.
pub fn process_response<B>(mut response: Response<B>) -> Response<B> {
    rewrite_response(&mut response);
    response
}

/// Hook that runs the post-processor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteVary;

impl ResponseHook for RewriteVary {
    fn on_response<B>(&self, response: &mut Response<B>) {
        rewrite_response(response);
    }
}

/// Layer running the post-processor on every response of its service.
pub type VaryRewriteLayer = HookLayer<RewriteVary>;

impl VaryRewriteLayer {
    pub fn rewrite() -> Self {
        HookLayer::new(RewriteVary)
    }
}

impl Default for VaryRewriteLayer {
    fn default() -> Self {
        Self::rewrite()
    }
}
