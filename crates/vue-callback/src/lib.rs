//! HTTP endpoint for bundles emitted in external resource mode.
//!
//! [`VueCallbackLayer`] wraps any `tower` service over `http` requests.
//! `GET <prefix>/<key>` answers with the cached bundle exactly once and
//! `GET /pingm` answers `Ok`; every other request reaches the inner service
//! untouched.

use futures_util::future::{ready, Either, Ready};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Request, Response, StatusCode};
use regex::Regex;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use vue_helpers::{CacheStore, Environment, KEY_LEN};

/// Path answered with a liveness reply.
pub const PING_PATH: &str = "/pingm";

/// Layer adding the callback endpoint in front of a service.
#[derive(Debug, Clone)]
pub struct VueCallbackLayer {
    cache: CacheStore,
    prefix: Arc<str>,
    pattern: Arc<Regex>,
}

impl VueCallbackLayer {
    /// Serve bundles from `cache` under `prefix`.
    pub fn new(cache: CacheStore, prefix: &str) -> Result<Self, regex::Error> {
        let prefix = prefix.trim_end_matches('/');
        let pattern = Regex::new(&format!(
            r"^{}/([A-Za-z0-9\-_]{{{}}})$",
            regex::escape(prefix),
            KEY_LEN
        ))?;
        Ok(Self {
            cache,
            prefix: Arc::from(prefix),
            pattern: Arc::new(pattern),
        })
    }

    /// Serve the environment's cache under its configured prefix.
    pub fn from_environment(env: &Environment) -> Result<Self, regex::Error> {
        Self::new(env.cache().clone(), &env.config().callback_prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Classify a request path.
    pub fn route<'a>(&self, path: &'a str) -> Route<'a> {
        if path == PING_PATH {
            return Route::Ping;
        }
        match self.pattern.captures(path).and_then(|c| c.get(1)) {
            Some(key) => Route::Bundle(key.as_str()),
            None => Route::Pass,
        }
    }
}

impl<S> Layer<S> for VueCallbackLayer {
    type Service = VueCallback<S>;

    fn layer(&self, inner: S) -> Self::Service {
        VueCallback {
            inner,
            layer: self.clone(),
        }
    }
}

/// What a request path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Bundle(&'a str),
    Ping,
    Pass,
}

/// Service created by [`VueCallbackLayer`].
#[derive(Debug, Clone)]
pub struct VueCallback<S> {
    inner: S,
    layer: VueCallbackLayer,
}

impl<S> VueCallback<S> {
    pub fn new(inner: S, layer: VueCallbackLayer) -> Self {
        Self { inner, layer }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn bundle<B: From<String>>(&self, key: &str) -> Response<B> {
        match self.layer.cache.take(key) {
            Some(js) => respond(StatusCode::OK, "text/javascript", js),
            None => {
                tracing::debug!(key, "bundle missing or already served");
                respond(StatusCode::NOT_FOUND, "text/html", String::new())
            }
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for VueCallback<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: From<String>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Either<Ready<Result<Response<ResBody>, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let answered = match self.layer.route(req.uri().path()) {
            _ if req.method() != Method::GET => None,
            Route::Bundle(key) => Some(self.bundle(key)),
            Route::Ping => Some(respond(StatusCode::OK, "text/javascript", "Ok".to_string())),
            Route::Pass => None,
        };

        match answered {
            Some(response) => Either::Left(ready(Ok(response))),
            None => Either::Right(self.inner.call(req)),
        }
    }
}

fn respond<B: From<String>>(
    status: StatusCode,
    content_type: &'static str,
    body: String,
) -> Response<B> {
    let mut response = Response::new(B::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn call(cache: &CacheStore, request: Request<()>) -> Response<String> {
        let inner = service_fn(|req: Request<()>| async move {
            Ok::<_, Infallible>(Response::new(format!("inner {}", req.uri().path())))
        });
        VueCallbackLayer::new(cache.clone(), "/vuecallback")
            .unwrap()
            .layer(inner)
            .oneshot(request)
            .await
            .unwrap()
    }

    fn get(path: &str) -> Request<()> {
        Request::get(path).body(()).unwrap()
    }

    fn content_type(response: &Response<String>) -> &str {
        response.headers()[CONTENT_TYPE].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_bundle_served_once() {
        let cache = CacheStore::new();
        let key = cache.insert("var VueApp = new Vue({})");
        let path = format!("/vuecallback/{key}");

        let response = call(&cache, get(&path)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/javascript");
        assert_eq!(response.body(), "var VueApp = new Vue({})");

        let response = call(&cache, get(&path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(content_type(&response), "text/html");
        assert_eq!(response.body(), "");
    }

    #[tokio::test]
    async fn test_ping() {
        let response = call(&CacheStore::new(), get("/pingm")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "Ok");
    }

    #[tokio::test]
    async fn test_other_paths_pass_through() {
        let cache = CacheStore::new();
        for path in ["/", "/vuecallback/short", "/vuecallback", "/other/pingm"] {
            let response = call(&cache, get(path)).await;
            assert_eq!(response.body(), &format!("inner {path}"));
        }
    }

    #[tokio::test]
    async fn test_non_get_passes_through() {
        let cache = CacheStore::new();
        let key = cache.insert("js");
        let request = Request::post(format!("/vuecallback/{key}")).body(()).unwrap();
        let response = call(&cache, request).await;
        assert!(response.body().starts_with("inner "));
        assert!(cache.contains(&key));
    }

    #[test]
    fn test_route() {
        let layer = VueCallbackLayer::new(CacheStore::new(), "/assets.v1/").unwrap();
        let key = "a".repeat(KEY_LEN);
        assert_eq!(layer.prefix(), "/assets.v1");
        assert_eq!(layer.route(&format!("/assets.v1/{key}")), Route::Bundle(&key));
        assert_eq!(layer.route(&format!("/assetsXv1/{key}")), Route::Pass);
        assert_eq!(layer.route(&format!("/assets.v1/{key}x")), Route::Pass);
        assert_eq!(layer.route("/pingm"), Route::Ping);
    }
}
