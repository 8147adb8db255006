use std::{future::Future, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};

/// Status and fully read body of a source response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Reply {
        Reply {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: Request) -> Result<Reply>;
}

#[async_trait]
impl<F, Fut> HttpSender for F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Reply>> + Send + 'static,
{
    async fn send(&self, request: Request) -> Result<Reply> {
        (self)(request).await
    }
}

/// Pins a closure to the `HttpSender` signature so its argument and future
/// types are inferred at the call site.
pub fn sender_fn<F, Fut>(f: F) -> F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Reply>> + Send + 'static,
{
    f
}

/// Hands out one sender per aggregation task.
pub trait SenderFactory: Send + Sync {
    fn sender(&self) -> Box<dyn HttpSender>;
}

impl<F> SenderFactory for F
where
    F: Fn() -> Box<dyn HttpSender> + Send + Sync,
{
    fn sender(&self) -> Box<dyn HttpSender> {
        (self)()
    }
}

pub fn factory_fn<F, S>(f: F) -> impl SenderFactory
where
    F: Fn() -> S + Send + Sync,
    S: HttpSender + 'static,
{
    move || -> Box<dyn HttpSender> { Box::new(f()) }
}

pub struct ReqwestSender {
    client: Arc<Client>,
    timeout: Duration,
}

impl ReqwestSender {
    pub fn new(client: Arc<Client>, timeout: Duration) -> ReqwestSender {
        ReqwestSender { client, timeout }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, mut request: Request) -> Result<Reply> {
        // covers connect, headers and body
        *request.timeout_mut() = Some(self.timeout);
        let resp_payload = self.client.execute(request).await?;
        let status = resp_payload.status();
        let body = resp_payload.bytes().await?;
        Ok(Reply::new(status, body.to_vec()))
    }
}

/// Shares one connection pool between senders; `reqwest::Client` is safe
/// for concurrent use, each sender only carries the timeout.
pub struct ReqwestSenderFactory {
    client: Arc<Client>,
    timeout: Duration,
}

impl ReqwestSenderFactory {
    pub fn new(timeout: Duration) -> ReqwestSenderFactory {
        ReqwestSenderFactory::with_client(Arc::new(Client::new()), timeout)
    }

    pub fn with_client(client: Arc<Client>, timeout: Duration) -> ReqwestSenderFactory {
        ReqwestSenderFactory { client, timeout }
    }
}

impl SenderFactory for ReqwestSenderFactory {
    fn sender(&self) -> Box<dyn HttpSender> {
        Box::new(ReqwestSender::new(self.client.clone(), self.timeout))
    }
}
