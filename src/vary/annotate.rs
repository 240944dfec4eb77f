//! Handler annotations: `only_vary_on` and `dont_vary_on`.
//!
//! Both wrap a handler (any tower service, or an axum handler through
//! `Handler::layer`) and record a [`VaryDirectives`] entry on the response
//! it returns. They never touch the request, and an error from the wrapped
//! service is passed through without recording anything.
//!
//! ```ignore
//! Router::new()
//!     .route("/", get(home.layer(dont_vary_on(["Cookie"]))))
//!     .route("/logo", get(logo).route_layer(only_vary_on(["Accept-Encoding"])));
//! ```
//!
//! The two markers are also response parts, for handlers that would rather
//! say it in their return value:
//!
//! ```ignore
//! async fn home() -> impl IntoResponse {
//!     (DontVaryOn::new(["Cookie"]), "welcome")
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;

use axum::http::Response;
use axum::response::{IntoResponseParts, ResponseParts};

use crate::vary::directives::VaryDirectives;
use crate::vary::service::{HookLayer, ResponseHook};

fn collect_names<I, S>(names: I) -> Arc<[String]>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Exclusive `Vary` declaration.
///
/// Not chainable: applying it again on the same response replaces the
/// earlier list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlyVaryOn {
    names: Arc<[String]>,
}

impl OnlyVaryOn {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: collect_names(names),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl ResponseHook for OnlyVaryOn {
    fn on_response<B>(&self, response: &mut Response<B>) {
        VaryDirectives::set_only_vary_on(response, self.names.iter().cloned());
    }
}

impl IntoResponseParts for OnlyVaryOn {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        VaryDirectives::update(res.extensions_mut(), |d| {
            d.replace_only_vary_on(self.names.iter().cloned())
        });
        Ok(res)
    }
}

/// Subtractive `Vary` declaration.
///
/// Chainable: every application on the same response adds its names to the
/// exclusion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DontVaryOn {
    names: Arc<[String]>,
}

impl DontVaryOn {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: collect_names(names),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl ResponseHook for DontVaryOn {
    fn on_response<B>(&self, response: &mut Response<B>) {
        VaryDirectives::append_dont_vary_on(response, self.names.iter().cloned());
    }
}

impl IntoResponseParts for DontVaryOn {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        VaryDirectives::update(res.extensions_mut(), |d| {
            d.extend_dont_vary_on(self.names.iter().cloned())
        });
        Ok(res)
    }
}

/// Layer recording an [`OnlyVaryOn`] declaration.
pub type OnlyVaryOnLayer = HookLayer<OnlyVaryOn>;

/// Layer recording a [`DontVaryOn`] declaration.
pub type DontVaryOnLayer = HookLayer<DontVaryOn>;

/// Make the wrapped handler's responses vary on exactly `names`.
///
/// The final `Vary` is the sorted, de-duplicated set of `names`, whatever
/// else was added. Last write wins when stacked.
pub fn only_vary_on<I, S>(names: I) -> OnlyVaryOnLayer
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HookLayer::new(OnlyVaryOn::new(names))
}

/// Strip `names` from the `Vary` header of the wrapped handler's responses.
///
/// Stacking accumulates: every layer's names are removed.
pub fn dont_vary_on<I, S>(names: I) -> DontVaryOnLayer
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HookLayer::new(DontVaryOn::new(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use axum::response::IntoResponse;
    use tower::{service_fn, Layer, ServiceBuilder, ServiceExt};

    async fn ok_handler(_req: Request<()>) -> Result<Response<()>, Infallible> {
        Ok(Response::new(()))
    }

    #[tokio::test]
    async fn test_dont_vary_on_layers_accumulate() {
        let svc = ServiceBuilder::new()
            .layer(dont_vary_on(["B"]))
            .layer(dont_vary_on(["A"]))
            .service_fn(ok_handler);

        let response = svc.oneshot(Request::new(())).await.unwrap();
        let directives = VaryDirectives::of(&response).unwrap();
        // Inner layer records first.
        assert_eq!(directives.dont_vary_on(), ["A", "B"]);
    }

    #[tokio::test]
    async fn test_only_vary_on_outer_layer_wins() {
        let svc = ServiceBuilder::new()
            .layer(only_vary_on(["Outer"]))
            .layer(only_vary_on(["Inner", "Other"]))
            .service_fn(ok_handler);

        let response = svc.oneshot(Request::new(())).await.unwrap();
        assert_eq!(
            VaryDirectives::of(&response).unwrap().only_vary_on(),
            ["Outer"]
        );
    }

    #[tokio::test]
    async fn test_error_passes_through_without_annotation() {
        let failing = service_fn(|_req: Request<()>| async {
            Err::<Response<()>, _>("handler failed")
        });
        let svc = dont_vary_on(["Cookie"]).layer(failing);

        let err = svc.oneshot(Request::new(())).await.unwrap_err();
        assert_eq!(err, "handler failed");
    }

    #[test]
    fn test_layer_keeps_inner_service() {
        let inner = service_fn(ok_handler);
        let svc = only_vary_on(["Cookie"]).layer(inner);
        assert_eq!(svc.hook().names(), ["Cookie"]);
        let _inner = svc.into_inner();
    }

    #[test]
    fn test_names_passed_through_uninterpreted() {
        let marker = DontVaryOn::new(["", "not a header"]);
        assert_eq!(marker.names(), ["", "not a header"]);
    }

    #[test]
    fn test_response_parts() {
        let response = (
            DontVaryOn::new(["Cookie"]),
            OnlyVaryOn::new(["Accept"]),
            "body",
        )
            .into_response();

        let directives = VaryDirectives::of(&response).unwrap();
        assert_eq!(directives.dont_vary_on(), ["Cookie"]);
        assert_eq!(directives.only_vary_on(), ["Accept"]);
    }
}
