//! Request handler abstraction.
//!
//! A [`Handler`] turns one [`Request`] into one [`Response`]. Errors returned by a
//! handler are logged by the connection and answered with `500 Internal Server Error`.

use std::error::Error;
use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, req: Request) -> Result<Response, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>>,
    Fut: Future<Output = Result<Response, Err>> + Send,
{
    type Error = Err;

    async fn call(&self, req: Request) -> Result<Response, Self::Error> {
        (self.f)(req).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<Response, Err>>,
    F: Fn(Request) -> Ret,
{
    HandlerFn { f }
}
