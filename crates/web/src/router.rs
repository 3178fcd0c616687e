//! Fixed route table and request dispatch.
//!
//! Routes are matched in declaration order by comparing the request method and the
//! `/`-separated path segments against each pattern. The first match wins; anything
//! unmatched is answered with an empty `404 Not Found`.

use async_trait::async_trait;
use http::Method;
use http::header::{CONTENT_TYPE, USER_AGENT};
use tern_http::handler::Handler;
use tern_http::protocol::{Request, Response};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{FileStore, StoreError};

/// One element of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// Matches a path segment equal to the literal
    Literal(&'static str),
    /// Matches any single path segment and captures it
    Param,
}

/// What a matched route does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Root,
    Echo,
    UserAgent,
    ReadFile,
    WriteFile,
}

#[derive(Debug)]
struct Route {
    method: Method,
    pattern: &'static [Segment],
    endpoint: Endpoint,
}

/// Result of matching a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<'req> {
    pub endpoint: Endpoint,
    /// The captured segment, empty for patterns without a parameter
    pub param: &'req str,
}

impl Route {
    fn new(method: Method, pattern: &'static [Segment], endpoint: Endpoint) -> Self {
        Self { method, pattern, endpoint }
    }

    fn matches<'req>(&self, method: &Method, segments: &[&'req str]) -> Option<RouteMatch<'req>> {
        if self.method != *method || self.pattern.len() != segments.len() {
            return None;
        }

        let mut param = "";
        for (segment, value) in self.pattern.iter().zip(segments) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Param => param = value,
            }
        }

        Some(RouteMatch { endpoint: self.endpoint, param })
    }
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("file store error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },
}

/// Dispatches requests over the fixed route table.
///
/// The file store is handed in at construction; the router keeps no other state.
#[derive(Debug)]
pub struct Router<S> {
    routes: Vec<Route>,
    store: S,
}

impl<S: FileStore> Router<S> {
    pub fn new(store: S) -> Self {
        use Segment::{Literal, Param};

        let routes = vec![
            Route::new(Method::GET, &[Literal(""), Literal("")], Endpoint::Root),
            Route::new(Method::GET, &[Literal(""), Literal("echo"), Param], Endpoint::Echo),
            Route::new(Method::GET, &[Literal(""), Literal("user-agent")], Endpoint::UserAgent),
            Route::new(Method::GET, &[Literal(""), Literal("files"), Param], Endpoint::ReadFile),
            Route::new(Method::POST, &[Literal(""), Literal("files"), Param], Endpoint::WriteFile),
        ];

        Self { routes, store }
    }

    /// Matches a request against the route table
    ///
    /// Returns `None` when no route accepts the method and path.
    pub fn at<'req>(&self, method: &Method, path: &'req str) -> Option<RouteMatch<'req>> {
        let segments = path.split('/').collect::<Vec<_>>();
        self.routes.iter().find_map(|route| route.matches(method, &segments))
    }

    async fn read_file(&self, name: &str) -> Result<Response, RouteError> {
        // `/files/` names the root directory itself, never a file
        if name.is_empty() {
            return Ok(Response::not_found());
        }

        match self.store.read(name).await {
            Ok(contents) => Ok(Response::ok().with_header(CONTENT_TYPE, "application/octet-stream").with_body(contents)),
            Err(e) if e.is_not_found() => {
                debug!(file = name, "file not found");
                Ok(Response::not_found())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<S: FileStore> Handler for Router<S> {
    type Error = RouteError;

    async fn call(&self, req: Request) -> Result<Response, Self::Error> {
        let Some(matched) = self.at(req.method(), req.path()) else {
            debug!(method = %req.method(), path = req.path(), "no route matched");
            return Ok(Response::not_found());
        };

        match matched.endpoint {
            Endpoint::Root => Ok(Response::ok()),
            Endpoint::Echo => Ok(text_plain(matched.param.to_owned())),
            Endpoint::UserAgent => match req.headers().get(USER_AGENT) {
                Some(user_agent) => Ok(text_plain(user_agent.to_owned())),
                None => {
                    warn!("user-agent route requested without user-agent header");
                    Ok(Response::bad_request())
                }
            },
            Endpoint::ReadFile => self.read_file(matched.param).await,
            Endpoint::WriteFile => {
                self.store.write(matched.param, req.body().clone()).await?;
                Ok(Response::created())
            }
        }
    }
}

fn text_plain(body: String) -> Response {
    Response::ok().with_header(CONTENT_TYPE, "text/plain").with_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockFileStore;
    use bytes::Bytes;
    use http::{StatusCode, Version};
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;
    use tern_http::protocol::Headers;

    #[derive(Debug, Default)]
    struct MemoryStore {
        files: Mutex<HashMap<String, Bytes>>,
    }

    #[async_trait]
    impl FileStore for MemoryStore {
        async fn read(&self, name: &str) -> Result<Bytes, StoreError> {
            self.files.lock().unwrap().get(name).cloned().ok_or_else(|| StoreError::NotFound { name: name.to_owned() })
        }

        async fn write(&self, name: &str, contents: Bytes) -> Result<(), StoreError> {
            self.files.lock().unwrap().insert(name.to_owned(), contents);
            Ok(())
        }
    }

    fn request(method: Method, path: &str, headers: &[(&str, &str)], body: &'static [u8]) -> Request {
        let headers = headers.iter().copied().collect::<Headers>();
        Request::new(method, path, Version::HTTP_11, headers, Bytes::from_static(body))
    }

    fn router() -> Router<MemoryStore> {
        Router::new(MemoryStore::default())
    }

    #[test]
    fn route_table_matching() {
        let router = router();

        assert_eq!(router.at(&Method::GET, "/"), Some(RouteMatch { endpoint: Endpoint::Root, param: "" }));
        assert_eq!(router.at(&Method::GET, "/echo/abc"), Some(RouteMatch { endpoint: Endpoint::Echo, param: "abc" }));
        assert_eq!(router.at(&Method::GET, "/user-agent"), Some(RouteMatch { endpoint: Endpoint::UserAgent, param: "" }));
        assert_eq!(router.at(&Method::GET, "/files/a.txt"), Some(RouteMatch { endpoint: Endpoint::ReadFile, param: "a.txt" }));
        assert_eq!(router.at(&Method::POST, "/files/a.txt"), Some(RouteMatch { endpoint: Endpoint::WriteFile, param: "a.txt" }));
    }

    #[test]
    fn segment_count_must_match() {
        let router = router();

        assert_eq!(router.at(&Method::GET, "/echo"), None);
        assert_eq!(router.at(&Method::GET, "/echo/a/b"), None);
        assert_eq!(router.at(&Method::GET, "/user-agent/x"), None);
        assert_eq!(router.at(&Method::GET, "/index.html"), None);
        assert_eq!(router.at(&Method::POST, "/"), None);
        assert_eq!(router.at(&Method::DELETE, "/files/a.txt"), None);
    }

    #[tokio::test]
    async fn root_is_empty_ok() {
        let response = router().call(request(Method::GET, "/", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn echo_returns_segment() {
        let response = router().call(request(Method::GET, "/echo/grape", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(&response.body()[..], b"grape");
    }

    #[tokio::test]
    async fn user_agent_is_reflected() {
        let response =
            router().call(request(Method::GET, "/user-agent", &[("User-Agent", "foobar/1.2.3")], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_TYPE), Some("text/plain"));
        assert_eq!(&response.body()[..], b"foobar/1.2.3");
    }

    #[tokio::test]
    async fn missing_user_agent_is_bad_request() {
        let response = router().call(request(Method::GET, "/user-agent", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn post_then_get_file() {
        let router = router();

        let created = router.call(request(Method::POST, "/files/notes", &[], b"12345")).await.unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        assert!(created.body().is_empty());

        let fetched = router.call(request(Method::GET, "/files/notes", &[], b"")).await.unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(fetched.headers().get(CONTENT_TYPE), Some("application/octet-stream"));
        assert_eq!(&fetched.body()[..], b"12345");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let response = router().call(request(Method::GET, "/files/nope", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn unmatched_route_is_not_found_without_headers() {
        let response = router().call(request(Method::PUT, "/echo/abc", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains(CONTENT_TYPE));
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn empty_file_name_is_not_found_without_touching_store() {
        let router = Router::new(MockFileStore::new());

        let response = router.call(request(Method::GET, "/files/", &[], b"")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn store_fault_is_an_error() {
        let mut store = MockFileStore::new();
        store
            .expect_read()
            .withf(|name| name == "locked")
            .returning(|name| Err(StoreError::from_io(name, io::Error::from(io::ErrorKind::PermissionDenied))));
        store.expect_write().returning(|name, _| Err(StoreError::from_io(name, io::Error::other("disk full"))));

        let router = Router::new(store);

        let read = router.call(request(Method::GET, "/files/locked", &[], b"")).await;
        assert!(matches!(read, Err(RouteError::Store { source: StoreError::Io { .. } })));

        let write = router.call(request(Method::POST, "/files/locked", &[], b"abc")).await;
        assert!(write.is_err());
    }
}
