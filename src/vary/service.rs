//! Tower plumbing shared by the `Vary` layers.
//!
//! Every layer in this crate does the same thing: let the inner service
//! produce a response, then run a small synchronous hook over it. Errors from
//! the inner service are returned as-is and the hook never sees them.

use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use axum::http::{Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

/// A step that runs on every successful response of a wrapped service.
pub trait ResponseHook {
    fn on_response<B>(&self, response: &mut Response<B>);
}

/// Layer that applies a [`ResponseHook`] to the responses of its service.
#[derive(Debug, Clone)]
pub struct HookLayer<H> {
    hook: H,
}

impl<H> HookLayer<H> {
    pub fn new(hook: H) -> Self {
        Self { hook }
    }

    /// The hook this layer installs.
    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<S, H: Clone> Layer<S> for HookLayer<H> {
    type Service = HookService<S, H>;

    fn layer(&self, inner: S) -> Self::Service {
        HookService {
            inner,
            hook: self.hook.clone(),
        }
    }
}

/// Service produced by [`HookLayer`].
///
/// The wrapped service stays reachable through [`get_ref`](Self::get_ref)
/// and [`into_inner`](Self::into_inner).
#[derive(Debug, Clone)]
pub struct HookService<S, H> {
    inner: S,
    hook: H,
}

impl<S, H> HookService<S, H> {
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl<S, H, ReqBody, ResBody> Service<Request<ReqBody>> for HookService<S, H>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    H: ResponseHook + Clone,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = ResponseFuture<S::Future, H>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        ResponseFuture {
            inner: self.inner.call(req),
            hook: self.hook.clone(),
        }
    }
}

pin_project! {
    /// Response future of [`HookService`].
    pub struct ResponseFuture<F, H> {
        #[pin]
        inner: F,
        hook: H,
    }
}

impl<F, H, B, E> Future for ResponseFuture<F, H>
where
    F: Future<Output = Result<Response<B>, E>>,
    H: ResponseHook,
{
    type Output = Result<Response<B>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = ready!(this.inner.poll(cx))?;
        this.hook.on_response(&mut response);
        Poll::Ready(Ok(response))
    }
}
